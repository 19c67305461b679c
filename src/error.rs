use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColetaError {
    /// Nenhum par de seletores aceitou as credenciais, nem no documento
    /// principal nem dentro dos frames.
    #[error("Falha de autenticação: {0}")]
    Autenticacao(String),

    #[error("Tempo esgotado: {0}")]
    Timeout(String),

    /// Ponto fixo atingido com zero produtos — a estrutura da vitrine mudou.
    #[error("Extração vazia: nenhum produto encontrado na vitrine")]
    ExtracaoVazia,

    #[error("Erro de WebDriver: {0}")]
    WebDriver(String),

    #[error("Erro de rede: {0}")]
    Rede(#[from] reqwest::Error),

    #[error("Erro de serialização: {0}")]
    Serializacao(#[from] serde_json::Error),

    #[error("Variável de ambiente ausente: {0}")]
    Config(String),
}

impl From<fantoccini::error::CmdError> for ColetaError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        ColetaError::WebDriver(err.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for ColetaError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        ColetaError::WebDriver(format!("sessão não criada: {}", err))
    }
}

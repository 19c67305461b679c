mod retry;

pub use retry::PoliticaRetry;

use crate::config::Config;
use crate::error::ColetaError;
use crate::precos::PrecosCombustiveis;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::time::Duration;

/// Status sentinela para falha de rede em todas as tentativas — não há
/// resposta HTTP para reportar.
pub const STATUS_REDE: u16 = 0;

/// Resultado de uma sequência de tentativas de sincronização.
#[derive(Debug, Clone)]
pub struct ResultadoSync {
    pub status: u16,
    pub corpo: String,
    pub tentativas: u32,
}

impl ResultadoSync {
    pub fn sucesso(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Cliente do PostgREST do Supabase para a tabela de preços.
///
/// O UPSERT é idempotente por construção: a chave de conflito é
/// `(data_coleta, empresa)` e o header `Prefer: resolution=merge-duplicates`
/// pede merge por campo no servidor — reenviar o mesmo registro não muda o
/// estado final.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    tabela: String,
    http: reqwest::Client,
    retry: PoliticaRetry,
}

impl SupabaseClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        tabela: &str,
        timeout: Duration,
        retry: PoliticaRetry,
    ) -> Result<Self, ColetaError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            tabela: tabela.to_string(),
            http,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ColetaError> {
        Self::new(
            &config.supabase_url,
            &config.supabase_key,
            &config.tabela,
            Duration::from_millis(config.http_timeout_ms),
            PoliticaRetry::new(
                config.retry_max,
                Duration::from_millis(config.retry_base_ms),
            ),
        )
    }

    /// UPSERT do registro do dia. Nunca devolve `Err`: 5xx e falha de rede
    /// são retentados dentro da política; esgotadas as tentativas, o
    /// resultado carrega o último status (ou o sentinela de rede) e o
    /// número de tentativas feitas.
    pub async fn upsert(
        &self,
        precos: &PrecosCombustiveis,
        return_representation: bool,
    ) -> ResultadoSync {
        let url = format!(
            "{}/rest/v1/{}?on_conflict=data_coleta,empresa",
            self.base_url, self.tabela
        );
        let prefer = format!(
            "resolution=merge-duplicates,{}",
            if return_representation {
                "return=representation"
            } else {
                "return=minimal"
            }
        );

        let max = self.retry.max_tentativas;
        for tentativa in 1..=max {
            let envio = self
                .http
                .post(&url)
                .header("apikey", &self.api_key)
                .bearer_auth(&self.api_key)
                .header("Prefer", &prefer)
                .json(precos)
                .send()
                .await;

            match envio {
                Ok(resposta) => {
                    let status = resposta.status().as_u16();
                    let corpo = resposta.text().await.unwrap_or_default();

                    if (200..300).contains(&status) {
                        tracing::info!("📤 UPSERT ok na tentativa {}: {}", tentativa, status);
                        return ResultadoSync {
                            status,
                            corpo,
                            tentativas: tentativa,
                        };
                    }

                    if status >= 500 && tentativa < max {
                        tracing::warn!(
                            "⚠️ Supabase {} na tentativa {}, aguardando retry...",
                            status,
                            tentativa
                        );
                        tokio::time::sleep(self.retry.atraso(tentativa)).await;
                        continue;
                    }

                    // 4xx não melhora repetindo, e 5xx na última tentativa acabou
                    tracing::error!("❌ UPSERT falhou: {} {}", status, corpo);
                    return ResultadoSync {
                        status,
                        corpo,
                        tentativas: tentativa,
                    };
                }
                Err(e) => {
                    if tentativa == max {
                        tracing::error!("❌ Erro de rede na última tentativa: {}", e);
                        return ResultadoSync {
                            status: STATUS_REDE,
                            corpo: format!("Erro de rede: {}", e),
                            tentativas: tentativa,
                        };
                    }
                    tracing::warn!("⚠️ Erro de rede na tentativa {}: {}", tentativa, e);
                    tokio::time::sleep(self.retry.atraso(tentativa)).await;
                }
            }
        }

        ResultadoSync {
            status: STATUS_REDE,
            corpo: "Erro desconhecido".to_string(),
            tentativas: max,
        }
    }

    /// Consulta os últimos registros da empresa, mais recentes primeiro.
    /// Leitura pura de conferência; não altera nada no servidor.
    pub async fn consultar(
        &self,
        empresa: &str,
        limite: u32,
    ) -> Result<ResultadoSync, ColetaError> {
        let filtro = utf8_percent_encode(empresa, NON_ALPHANUMERIC);
        let url = format!(
            "{}/rest/v1/{}?empresa=eq.{}&order=data_coleta.desc&limit={}",
            self.base_url, self.tabela, filtro, limite
        );

        let resposta = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = resposta.status().as_u16();
        let corpo = resposta.text().await?;

        Ok(ResultadoSync {
            status,
            corpo,
            tentativas: 1,
        })
    }
}

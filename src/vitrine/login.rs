use crate::config::Config;
use crate::error::ColetaError;
use crate::utils::{com_prazo, mascarar};
use crate::vitrine::selectors::VitrineSelectors;
use async_trait::async_trait;
use fantoccini::{Client, Locator};
use std::time::Duration;

/// Estratégia de localização dos campos de login: tenta os pares de
/// seletores e retorna `true` quando usuário e senha aceitaram entrada.
#[async_trait]
trait EstrategiaCampos: Send + Sync {
    fn nome(&self) -> &'static str;

    async fn preencher(
        &self,
        client: &Client,
        usuario: &str,
        senha: &str,
        prazo: Duration,
    ) -> Result<bool, ColetaError>;
}

/// Pares de seletores no documento principal.
struct CamposTopo;

#[async_trait]
impl EstrategiaCampos for CamposTopo {
    fn nome(&self) -> &'static str {
        "documento principal"
    }

    async fn preencher(
        &self,
        client: &Client,
        usuario: &str,
        senha: &str,
        prazo: Duration,
    ) -> Result<bool, ColetaError> {
        preencher_pares(client, usuario, senha, prazo).await
    }
}

/// Mesmos pares, tentados dentro de cada frame que não é o principal.
/// O primeiro frame que aceitar os dois campos vira o contexto ativo do
/// formulário — a sessão permanece dentro dele para o submit.
struct CamposFrames;

#[async_trait]
impl EstrategiaCampos for CamposFrames {
    fn nome(&self) -> &'static str {
        "frames"
    }

    async fn preencher(
        &self,
        client: &Client,
        usuario: &str,
        senha: &str,
        prazo: Duration,
    ) -> Result<bool, ColetaError> {
        let total = client
            .find_all(Locator::Css(VitrineSelectors::FRAMES))
            .await?
            .len();

        for idx in 0..total {
            // Reencontra a cada iteração: a troca de contexto invalida
            // as referências antigas
            let quadros = client
                .find_all(Locator::Css(VitrineSelectors::FRAMES))
                .await?;
            let Some(quadro) = quadros.into_iter().nth(idx) else {
                break;
            };

            quadro.enter_frame().await?;

            // Só vale tentar se o frame tem um campo de senha
            if client
                .find(Locator::Css(VitrineSelectors::CAMPO_SENHA))
                .await
                .is_ok()
                && preencher_pares(client, usuario, senha, prazo).await?
            {
                tracing::info!("✅ Formulário encontrado no frame {}", idx);
                return Ok(true);
            }

            client.enter_parent_frame().await?;
        }

        Ok(false)
    }
}

async fn preencher_pares(
    client: &Client,
    usuario: &str,
    senha: &str,
    prazo: Duration,
) -> Result<bool, ColetaError> {
    for &(sel_usuario, sel_senha) in VitrineSelectors::PARES_LOGIN {
        tracing::debug!("  → Tentando par: {} / {}", sel_usuario, sel_senha);

        let campo_usuario = match client
            .wait()
            .at_most(prazo)
            .for_element(Locator::Css(sel_usuario))
            .await
        {
            Ok(elem) => elem,
            Err(_) => continue,
        };
        let campo_senha = match client.find(Locator::Css(sel_senha)).await {
            Ok(elem) => elem,
            Err(_) => continue,
        };

        if campo_usuario.send_keys(usuario).await.is_err() {
            continue;
        }
        if campo_senha.send_keys(senha).await.is_err() {
            continue;
        }

        tracing::info!("  ✅ Campos aceitos: {} / {}", sel_usuario, sel_senha);
        return Ok(true);
    }

    Ok(false)
}

/// Estratégia de submit, tentada em ordem após o preenchimento.
#[async_trait]
trait EstrategiaSubmit: Send + Sync {
    fn nome(&self) -> &'static str;

    async fn acionar(&self, client: &Client) -> Result<bool, ColetaError>;
}

/// Clica no primeiro botão da lista de seletores que existir.
struct SubmitPorSeletor;

#[async_trait]
impl EstrategiaSubmit for SubmitPorSeletor {
    fn nome(&self) -> &'static str {
        "seletor"
    }

    async fn acionar(&self, client: &Client) -> Result<bool, ColetaError> {
        for &seletor in VitrineSelectors::BOTOES_SUBMIT {
            tracing::debug!("  → Tentando botão: {}", seletor);
            if let Ok(botao) = client.find(Locator::Css(seletor)).await {
                if botao.click().await.is_ok() {
                    tracing::info!("  ✅ Botão clicado: {}", seletor);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Procura por texto de botão via JavaScript (SPAs escondem o submit
/// atrás de componentes sem atributos úteis).
struct SubmitPorTexto;

#[async_trait]
impl EstrategiaSubmit for SubmitPorTexto {
    fn nome(&self) -> &'static str {
        "texto do botão"
    }

    async fn acionar(&self, client: &Client) -> Result<bool, ColetaError> {
        let alvos = serde_json::to_string(VitrineSelectors::TEXTOS_SUBMIT)?;
        let script = format!(
            r#"
            const alvos = {alvos};
            const botoes = Array.from(
                document.querySelectorAll('button, input[type="submit"], [role="button"]')
            );
            for (const btn of botoes) {{
                const texto = (btn.innerText || btn.value || '').trim().toUpperCase();
                if (alvos.some(alvo => texto.includes(alvo))) {{
                    btn.click();
                    return {{ clicado: true, texto: texto }};
                }}
            }}
            return {{ clicado: false }};
            "#,
        );

        let resultado = client.execute(&script, vec![]).await?;
        let clicado = resultado
            .get("clicado")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if clicado {
            tracing::info!("  ✅ Botão clicado por texto: {:?}", resultado.get("texto"));
        }
        Ok(clicado)
    }
}

/// Faz o login no portal: localiza os campos pelas estratégias em ordem,
/// submete o formulário e confere se a navegação saiu da página de login.
pub async fn login_vitrine(client: &Client, config: &Config) -> Result<(), ColetaError> {
    let prazo_navegacao = Duration::from_millis(config.navegacao_timeout_ms);
    let prazo_campo = Duration::from_millis(config.campo_timeout_ms);

    tracing::info!("🔐 Acessando página de login: {}", config.url_login);
    tracing::info!("👤 Usuário: {}", mascarar(&config.usuario));

    com_prazo(prazo_navegacao, "navegação para o login", async {
        client
            .goto(&config.url_login)
            .await
            .map_err(ColetaError::from)
    })
    .await?;

    // A SPA monta o formulário depois do load
    tokio::time::sleep(Duration::from_millis(2_000)).await;

    let estrategias_campos: [&dyn EstrategiaCampos; 2] = [&CamposTopo, &CamposFrames];
    let mut preenchido = false;
    for estrategia in estrategias_campos {
        tracing::debug!("🔍 Estratégia de campos: {}", estrategia.nome());
        if estrategia
            .preencher(client, &config.usuario, &config.senha, prazo_campo)
            .await?
        {
            preenchido = true;
            break;
        }
    }

    if !preenchido {
        return Err(ColetaError::Autenticacao(
            "campos de login não encontrados em nenhum seletor nem frame".to_string(),
        ));
    }

    let estrategias_submit: [&dyn EstrategiaSubmit; 2] = [&SubmitPorSeletor, &SubmitPorTexto];
    let mut acionado = false;
    for estrategia in estrategias_submit {
        tracing::debug!("🔍 Estratégia de submit: {}", estrategia.nome());
        if estrategia.acionar(client).await? {
            acionado = true;
            break;
        }
    }

    if !acionado {
        // Último recurso: Enter direto no campo de senha
        tracing::warn!("⚠️ Nenhum botão de submit; enviando Enter no campo de senha");
        if let Ok(campo) = client
            .find(Locator::Css(VitrineSelectors::CAMPO_SENHA))
            .await
        {
            let _ = campo.send_keys("\n").await;
        }
    }

    tokio::time::sleep(Duration::from_millis(config.pos_login_espera_ms)).await;

    let url_atual = client.current_url().await?;
    if url_atual.as_str().to_lowercase().contains("login") {
        return Err(ColetaError::Autenticacao(format!(
            "navegação não saiu da página de login: {}",
            url_atual
        )));
    }

    tracing::info!("✅ Login concluído: {}", url_atual);
    Ok(())
}

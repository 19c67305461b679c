mod login;
mod scroll;
mod selectors;

pub use login::login_vitrine;
pub use scroll::{rolar_ate_ponto_fixo, FonteVitrine, VitrineBrowser};
pub use selectors::VitrineSelectors;

use crate::config::Config;
use crate::error::ColetaError;
use crate::precos::ItemVitrine;
use crate::utils::com_prazo;
use fantoccini::{Client, Locator};
use std::time::Duration;

/// Navega até a vitrine já autenticado, espera os cards renderizarem e
/// rola a lista até o ponto fixo. Retorna as observações cruas.
pub async fn coletar_vitrine(
    client: &Client,
    config: &Config,
) -> Result<Vec<ItemVitrine>, ColetaError> {
    let prazo_navegacao = Duration::from_millis(config.navegacao_timeout_ms);

    tracing::info!("➡️ Navegando para a vitrine: {}", config.url_vitrine);
    com_prazo(prazo_navegacao, "navegação para a vitrine", async {
        client
            .goto(&config.url_vitrine)
            .await
            .map_err(ColetaError::from)
    })
    .await?;

    tracing::info!("⏳ Aguardando a vitrine carregar...");
    client
        .wait()
        .at_most(prazo_navegacao)
        .for_element(Locator::Css(VitrineSelectors::CARD_PRODUTO))
        .await
        .map_err(|_| {
            ColetaError::Timeout(format!(
                "nenhum '{}' apareceu em {}ms",
                VitrineSelectors::CARD_PRODUTO,
                prazo_navegacao.as_millis()
            ))
        })?;

    tracing::info!("🔄 Rolando a vitrine para carregar todos os produtos...");
    let mut fonte = VitrineBrowser::new(client);
    let itens = rolar_ate_ponto_fixo(
        &mut fonte,
        config.scroll_max_tentativas,
        Duration::from_millis(config.scroll_intervalo_ms),
    )
    .await?;

    tracing::info!("✅ {} produtos extraídos da vitrine", itens.len());

    // Registro visual opcional para auditoria
    if let Some(caminho) = &config.screenshot_path {
        match client.screenshot().await {
            Ok(png) => {
                if std::fs::write(caminho, png).is_ok() {
                    tracing::info!("🖼️ Screenshot salva em {}", caminho);
                }
            }
            Err(e) => tracing::warn!("⚠️ Screenshot falhou: {}", e),
        }
    }

    Ok(itens)
}

use crate::error::ColetaError;
use crate::precos::ItemVitrine;
use crate::vitrine::selectors::VitrineSelectors;
use async_trait::async_trait;
use fantoccini::Client;
use std::collections::HashSet;
use std::time::Duration;

/// Fonte de itens da lista virtualizada: o que está visível agora e como
/// avançar a rolagem. Abstraída para o laço de ponto fixo rodar em teste
/// sem browser.
#[async_trait]
pub trait FonteVitrine {
    async fn itens_visiveis(&mut self) -> Result<Vec<ItemVitrine>, ColetaError>;
    async fn avancar(&mut self) -> Result<(), ColetaError>;
}

/// Rola a vitrine até o ponto fixo: quando uma amostra não traz nenhum
/// item inédito, a lista parou de crescer e o laço termina. Única outra
/// condição de parada é o teto de iterações.
///
/// Assume crescimento monotônico para frente; virtualização que descarta
/// itens antigos ao rolar não é tratada.
pub async fn rolar_ate_ponto_fixo<F>(
    fonte: &mut F,
    max_tentativas: u32,
    intervalo: Duration,
) -> Result<Vec<ItemVitrine>, ColetaError>
where
    F: FonteVitrine + Send,
{
    let mut vistos: HashSet<String> = HashSet::new();
    let mut acumulado: Vec<ItemVitrine> = Vec::new();

    for tentativa in 1..=max_tentativas {
        let visiveis = fonte.itens_visiveis().await?;
        let novos: Vec<ItemVitrine> = visiveis
            .into_iter()
            .filter(|item| !vistos.contains(&item.texto))
            .collect();

        if novos.is_empty() {
            tracing::info!(
                "🏁 Ponto fixo na tentativa {} ({} itens)",
                tentativa,
                acumulado.len()
            );
            break;
        }

        tracing::debug!("🔄 Tentativa {}: {} itens novos", tentativa, novos.len());
        for item in novos {
            vistos.insert(item.texto.clone());
            acumulado.push(item);
        }

        fonte.avancar().await?;
        tokio::time::sleep(intervalo).await;
    }

    if acumulado.is_empty() {
        return Err(ColetaError::ExtracaoVazia);
    }

    Ok(acumulado)
}

/// Implementação real sobre o WebDriver: amostra os cards por JavaScript e
/// rola o container da vitrine (com fallback para a janela).
pub struct VitrineBrowser<'a> {
    client: &'a Client,
}

impl<'a> VitrineBrowser<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FonteVitrine for VitrineBrowser<'_> {
    async fn itens_visiveis(&mut self) -> Result<Vec<ItemVitrine>, ColetaError> {
        let script = format!(
            r#"
            const cards = Array.from(document.querySelectorAll('{cards}'));
            return cards.map(card => {{
                const desc = card.querySelector('{descricao}');
                const titulo = desc
                    ? desc.textContent
                    : ((card.innerText || '').split('\n')[0] || '');
                return {{
                    descricao: titulo.trim(),
                    texto: (card.innerText || '').trim(),
                }};
            }});
            "#,
            cards = VitrineSelectors::CARD_PRODUTO,
            descricao = VitrineSelectors::ITEM_DESCRICAO,
        );

        let resultado = self.client.execute(&script, vec![]).await?;
        let itens: Vec<ItemVitrine> = serde_json::from_value(resultado)?;
        Ok(itens)
    }

    async fn avancar(&mut self) -> Result<(), ColetaError> {
        let script = format!(
            r#"
            const container = document.querySelector('{container}');
            if (container) {{
                container.scrollBy(0, container.scrollHeight);
                return 'container';
            }}
            window.scrollBy(0, 1000);
            return 'janela';
            "#,
            container = VitrineSelectors::SCROLL_CONTAINER,
        );

        self.client.execute(&script, vec![]).await?;
        Ok(())
    }
}

use crate::browser::criar_cliente_webdriver;
use crate::config::Config;
use crate::error::ColetaError;
use crate::precos::{
    e_produto_combustivel, montar_payload, parse_preco, remover_duplicatas, Classificador,
    ItemExtraido, ItemVitrine, PrecosCombustiveis,
};
use crate::supabase::{ResultadoSync, SupabaseClient};
use crate::vitrine::{coletar_vitrine, login_vitrine};
use chrono::Local;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Tudo que um ciclo produz: os itens observados, o registro canônico e o
/// desfecho da sincronização.
#[derive(Debug)]
pub struct ResultadoCiclo {
    pub itens: Vec<ItemExtraido>,
    pub precos: PrecosCombustiveis,
    pub sync: ResultadoSync,
}

/// Extrai (rótulo, valor) de cada card: prefiltra por palavra-chave e
/// tenta o parser no texto completo. Card sem valor parseável é pulado,
/// nunca aborta o ciclo.
pub fn extrair_itens(brutos: &[ItemVitrine]) -> Vec<ItemExtraido> {
    let mut itens = Vec::new();

    for bruto in brutos {
        if !e_produto_combustivel(&bruto.descricao) {
            tracing::debug!("🚫 Não é combustível: {:?}", bruto.descricao);
            continue;
        }

        match parse_preco(&bruto.texto) {
            Some(valor) => itens.push(ItemExtraido {
                produto: bruto.descricao.trim().to_string(),
                valor,
            }),
            None => tracing::debug!("🚫 Sem preço parseável: {:?}", bruto.descricao),
        }
    }

    itens
}

/// Classifica cada item na sua chave canônica; rótulo sem regra é
/// descartado. Rótulos diferentes na mesma chave: o último vence.
pub fn montar_campos(
    classificador: &Classificador,
    itens: &[ItemExtraido],
) -> BTreeMap<String, Decimal> {
    let mut campos = BTreeMap::new();

    for item in itens {
        match classificador.classificar(&item.produto) {
            Some(combustivel) => {
                campos.insert(combustivel.campo().to_string(), item.valor);
            }
            None => tracing::debug!("🚫 Sem classificação: {:?}", item.produto),
        }
    }

    campos
}

/// Executa um ciclo completo de coleta e sincronização. Falhas de login,
/// navegação e extração vazia abortam o ciclo; falha de sincronização é
/// reportada no resultado sem descartar o que já foi coletado.
pub async fn executar_ciclo(config: &Config) -> Result<ResultadoCiclo, ColetaError> {
    let client = criar_cliente_webdriver(config).await?;

    // O browser precisa fechar mesmo quando a coleta falha
    let brutos = {
        let resultado = async {
            login_vitrine(&client, config).await?;
            coletar_vitrine(&client, config).await
        }
        .await;

        let _ = client.clone().close().await;
        resultado?
    };

    let itens = remover_duplicatas(extrair_itens(&brutos));
    tracing::info!("✅ {} produtos válidos extraídos", itens.len());

    let classificador = Classificador::new();
    let campos = montar_campos(&classificador, &itens);

    let precos = montar_payload(Local::now().date_naive(), &config.empresa, campos);
    tracing::info!("📦 Dados prontos para envio: {:?}", precos);

    let supabase = SupabaseClient::from_config(config)?;
    let sync = supabase.upsert(&precos, false).await;

    if sync.sucesso() {
        tracing::info!("📤 Dados enviados com sucesso ao Supabase");

        // Conferência: os últimos registros da empresa, mais novos primeiro
        match supabase.consultar(&config.empresa, 5).await {
            Ok(consulta) => {
                tracing::info!("📡 GET de conferência: {}", consulta.status);
                tracing::debug!("📄 {}", consulta.corpo);
            }
            Err(e) => tracing::warn!("⚠️ GET de conferência falhou: {}", e),
        }
    } else {
        tracing::error!(
            "❌ Erro ao enviar para Supabase: {} {} ({} tentativas)",
            sync.status,
            sync.corpo,
            sync.tentativas
        );
    }

    Ok(ResultadoCiclo { itens, precos, sync })
}

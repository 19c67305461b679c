use robo_precos::config::Config;
use robo_precos::pipeline::executar_ciclo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    match dotenvy::dotenv() {
        Ok(path) => eprintln!("✅ .env carregado de: {:?}", path),
        Err(e) => eprintln!("⚠️  .env não encontrado: {}", e),
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,robo_precos=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Robô de preços iniciando...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuração inválida: {}", e);
            std::process::exit(2);
        }
    };

    tracing::info!("✅ Config carregada");
    tracing::info!("   Empresa: {}", config.empresa);
    tracing::info!("   Vitrine: {}", config.url_vitrine);
    tracing::info!("   WebDriver: {}", config.webdriver_url);
    tracing::info!("   Headless: {}", config.headless);
    tracing::info!("   Tabela: {}", config.tabela);

    let resultado = match executar_ciclo(&config).await {
        Ok(resultado) => resultado,
        Err(e) => {
            tracing::error!("❌ Ciclo abortado: {}", e);
            std::process::exit(1);
        }
    };

    println!("📡 UPSERT Status: {}", resultado.sync.status);
    println!("🔁 Tentativas: {}", resultado.sync.tentativas);
    println!(
        "📄 Resposta: {}",
        if resultado.sync.corpo.is_empty() {
            "(vazio)"
        } else {
            resultado.sync.corpo.as_str()
        }
    );

    // Backup local dos itens coletados
    if let Some(caminho) = &config.backup_path {
        match serde_json::to_string_pretty(&resultado.itens) {
            Ok(json) => match std::fs::write(caminho, json) {
                Ok(()) => tracing::info!("📄 Backup salvo em {}", caminho),
                Err(e) => tracing::warn!("⚠️ Backup não salvo: {}", e),
            },
            Err(e) => tracing::warn!("⚠️ Backup não serializado: {}", e),
        }
    }

    if !resultado.sync.sucesso() {
        std::process::exit(1);
    }
}

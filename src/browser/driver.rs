use crate::config::Config;
use crate::error::ColetaError;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;

/// Abre uma sessão Chrome via chromedriver com as capacidades do ciclo.
pub async fn criar_cliente_webdriver(config: &Config) -> Result<Client, ColetaError> {
    let mut caps = serde_json::Map::new();

    let mut chrome_opts = serde_json::Map::new();

    let mut args = vec![
        "--disable-gpu".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--window-size=1280,800".to_string(),
        "--lang=pt-BR".to_string(),
    ];

    if config.headless {
        args.push("--headless=new".to_string());
    }

    chrome_opts.insert("args".to_string(), json!(args));

    // Sem gerenciador de senhas atrapalhando o preenchimento do login
    let mut prefs = serde_json::Map::new();
    prefs.insert("credentials_enable_service".to_string(), json!(false));
    prefs.insert("profile.password_manager_enabled".to_string(), json!(false));
    chrome_opts.insert("prefs".to_string(), json!(prefs));

    caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
    caps.insert("browserName".to_string(), json!("chrome"));
    // O portal usa certificados intermediários problemáticos em homologação
    caps.insert("acceptInsecureCerts".to_string(), json!(true));

    tracing::info!("🌐 Conectando ao WebDriver: {}", config.webdriver_url);

    let client = ClientBuilder::native()
        .capabilities(caps)
        .connect(&config.webdriver_url)
        .await?;

    let ua_script = format!(
        r#"
        Object.defineProperty(navigator, 'userAgent', {{
            get: () => '{}'
        }});
        "#,
        config.user_agent
    );

    if let Err(e) = client.execute(&ua_script, vec![]).await {
        tracing::warn!("⚠️ Override de user-agent falhou: {:?}", e);
    }

    tracing::info!("✅ Sessão WebDriver criada");

    Ok(client)
}

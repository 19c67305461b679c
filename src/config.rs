use crate::error::ColetaError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Vitrine Vibra
    pub url_login: String,
    pub url_vitrine: String,
    pub usuario: String,
    pub senha: String,
    pub empresa: String,

    // Supabase
    pub supabase_url: String,
    pub supabase_key: String,
    pub tabela: String,

    // Browser
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,

    // Timeouts
    pub navegacao_timeout_ms: u64,
    pub campo_timeout_ms: u64,
    pub pos_login_espera_ms: u64,
    pub scroll_max_tentativas: u32,
    pub scroll_intervalo_ms: u64,
    pub http_timeout_ms: u64,
    pub retry_max: u32,
    pub retry_base_ms: u64,

    // Saídas opcionais do ciclo
    pub backup_path: Option<String>,
    pub screenshot_path: Option<String>,
}

fn obrigatoria(nome: &str) -> Result<String, ColetaError> {
    env::var(nome)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ColetaError::Config(nome.to_string()))
}

impl Config {
    pub fn from_env() -> Result<Self, ColetaError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            url_login: env::var("URL_LOGIN")
                .unwrap_or_else(|_| "https://cn.vibraenergia.com.br/login/".to_string()),
            url_vitrine: env::var("URL_VITRINE").unwrap_or_else(|_| {
                "https://cn.vibraenergia.com.br/central-de-pedidos/#/vitrine".to_string()
            }),
            usuario: obrigatoria("VIBRA_MARQUES_USER")?,
            senha: obrigatoria("VIBRA_MARQUES_PASS")?,
            empresa: env::var("EMPRESA").unwrap_or_else(|_| "VIBRA MARQUES".to_string()),

            supabase_url: obrigatoria("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_key: obrigatoria("SUPABASE_KEY")?,
            tabela: env::var("TABELA").unwrap_or_else(|_| "precos_combustiveis".to_string()),

            webdriver_url: env::var("WEBDRIVER_URL")
                .unwrap_or_else(|_| "http://localhost:9515".to_string()),
            headless: env::var("HEADLESS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| {
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
                    .to_string()
            }),

            navegacao_timeout_ms: env_u64("NAVEGACAO_TIMEOUT_MS", 45_000),
            campo_timeout_ms: env_u64("CAMPO_TIMEOUT_MS", 2_500),
            pos_login_espera_ms: env_u64("POS_LOGIN_ESPERA_MS", 5_000),
            scroll_max_tentativas: env_u64("SCROLL_MAX_TENTATIVAS", 20) as u32,
            scroll_intervalo_ms: env_u64("SCROLL_INTERVALO_MS", 1_500),
            http_timeout_ms: env_u64("HTTP_TIMEOUT_MS", 30_000),
            retry_max: env_u64("RETRY_MAX", 3) as u32,
            retry_base_ms: env_u64("RETRY_BASE_MS", 1_500),

            backup_path: env::var("BACKUP_PATH").ok().filter(|s| !s.is_empty()),
            screenshot_path: env::var("SCREENSHOT_PATH").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn env_u64(nome: &str, padrao: u64) -> u64 {
    env::var(nome)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(padrao)
}

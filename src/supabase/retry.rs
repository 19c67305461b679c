use std::time::Duration;

/// Política de retry do envio: quantas tentativas e quanto esperar entre
/// elas. O atraso cresce linearmente com o número da tentativa, o mesmo
/// ritmo do coletor antigo.
#[derive(Debug, Clone, Copy)]
pub struct PoliticaRetry {
    pub max_tentativas: u32,
    pub atraso_base: Duration,
}

impl PoliticaRetry {
    pub fn new(max_tentativas: u32, atraso_base: Duration) -> Self {
        Self {
            max_tentativas: max_tentativas.max(1),
            atraso_base,
        }
    }

    /// Espera antes da próxima tentativa, dado o número da que falhou.
    pub fn atraso(&self, tentativa: u32) -> Duration {
        self.atraso_base * tentativa
    }
}

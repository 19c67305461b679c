mod mask;

pub use mask::mascarar;

use crate::error::ColetaError;
use std::future::Future;
use std::time::Duration;

/// Limita qualquer operação de browser/rede a um prazo explícito.
pub async fn com_prazo<T, F>(prazo: Duration, contexto: &str, fut: F) -> Result<T, ColetaError>
where
    F: Future<Output = Result<T, ColetaError>>,
{
    match tokio::time::timeout(prazo, fut).await {
        Ok(resultado) => resultado,
        Err(_) => Err(ColetaError::Timeout(format!(
            "{} não concluiu em {}ms",
            contexto,
            prazo.as_millis()
        ))),
    }
}

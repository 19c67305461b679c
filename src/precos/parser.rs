use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

// Aceita "5.411,20", "5 411,20", "5,54", "5.54", com sinal opcional.
static NUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?\d{1,3}(?:[.\s]\d{3})*(?:[.,]\d{2,4})|[-+]?\d+[.,]\d{2,4}")
        .expect("regex de preço inválida")
});

/// Extrai um preço de texto livre no formato brasileiro.
/// Exemplos: "R$ 5,54", "5.411,20", "GASOLINA COMUM - R$ 5,4058".
///
/// Se ponto e vírgula aparecem juntos, o ponto é separador de milhar;
/// vírgula sozinha é o separador decimal. Resultado arredondado para
/// 4 casas. Retorna `None` quando nenhum número plausível aparece.
pub fn parse_preco(texto: &str) -> Option<Decimal> {
    let token = NUM_RE.find(texto)?.as_str().replace(' ', "");

    let normalizado = if token.contains(',') && token.contains('.') {
        token.replace('.', "").replace(',', ".")
    } else {
        token.replace(',', ".")
    };

    Decimal::from_str(&normalizado).ok().map(|v| v.round_dp(4))
}

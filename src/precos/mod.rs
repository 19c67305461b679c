mod classifier;
mod dedup;
mod parser;
mod payload;

pub use classifier::{e_produto_combustivel, Classificador, Combustivel};
pub use dedup::remover_duplicatas;
pub use parser::parse_preco;
pub use payload::{montar_payload, PrecosCombustiveis, CAMPO_LEGADO_GRID};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Observação crua vinda da varredura do DOM: o título do card e o texto
/// completo de onde o preço será extraído.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemVitrine {
    pub descricao: String,
    pub texto: String,
}

/// Produto com preço já extraído, ainda com o rótulo livre do site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemExtraido {
    pub produto: String,
    pub valor: Decimal,
}

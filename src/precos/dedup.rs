use super::ItemExtraido;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Remove observações repetidas de (produto, valor) mantendo a primeira
/// ocorrência e a ordem original. A vitrine re-renderiza cards durante o
/// scroll, então o mesmo produto aparece mais de uma vez.
pub fn remover_duplicatas(itens: Vec<ItemExtraido>) -> Vec<ItemExtraido> {
    let mut vistos: HashSet<(String, Decimal)> = HashSet::with_capacity(itens.len());
    let mut unicos = Vec::with_capacity(itens.len());

    for item in itens {
        if vistos.insert((item.produto.clone(), item.valor)) {
            unicos.push(item);
        }
    }

    unicos
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(produto: &str, valor: Decimal) -> ItemExtraido {
        ItemExtraido {
            produto: produto.to_string(),
            valor,
        }
    }

    #[test]
    fn mantem_primeira_ocorrencia_e_ordem() {
        let entrada = vec![
            item("A", dec!(1.0)),
            item("B", dec!(2.0)),
            item("A", dec!(1.0)),
        ];
        let saida = remover_duplicatas(entrada);
        assert_eq!(saida, vec![item("A", dec!(1.0)), item("B", dec!(2.0))]);
    }

    #[test]
    fn mesmo_produto_com_valor_diferente_permanece() {
        let entrada = vec![item("A", dec!(1.0)), item("A", dec!(1.5))];
        assert_eq!(remover_duplicatas(entrada).len(), 2);
    }
}

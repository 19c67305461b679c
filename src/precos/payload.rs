use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nome antigo do campo da gasolina aditivada, ainda emitido por coletores
/// legados. Renomeado no normalizador; quando os dois nomes chegam juntos,
/// o valor legado prevalece (regra de compatibilidade documentada, mantida
/// como está no histórico da tabela).
pub const CAMPO_LEGADO_GRID: &str = "gasolina_grid";

/// Registro canônico sincronizado no Supabase, um por (data_coleta, empresa).
/// Campos ausentes são serializados como `null`, nunca omitidos — o merge
/// por conflito no servidor depende de ver a coluna.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecosCombustiveis {
    pub data_coleta: NaiveDate,
    pub empresa: String,
    pub gasolina_comum: Option<Decimal>,
    pub gasolina_aditivada: Option<Decimal>,
    pub etanol_hidratado: Option<Decimal>,
    pub diesel_s10: Option<Decimal>,
    pub diesel_s10_aditivado: Option<Decimal>,
}

/// Monta o registro final a partir do mapa de campos classificados.
/// Aplica a regra de renomeação legada e arredonda tudo para 4 casas.
pub fn montar_payload(
    data_coleta: NaiveDate,
    empresa: &str,
    mut campos: BTreeMap<String, Decimal>,
) -> PrecosCombustiveis {
    if let Some(valor) = campos.remove(CAMPO_LEGADO_GRID) {
        campos.insert("gasolina_aditivada".to_string(), valor);
    }

    let mut pega = |nome: &str| campos.remove(nome).map(|v| v.round_dp(4));

    PrecosCombustiveis {
        data_coleta,
        empresa: empresa.to_string(),
        gasolina_comum: pega("gasolina_comum"),
        gasolina_aditivada: pega("gasolina_aditivada"),
        etanol_hidratado: pega("etanol_hidratado"),
        diesel_s10: pega("diesel_s10"),
        diesel_s10_aditivado: pega("diesel_s10_aditivado"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn data() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()
    }

    #[test]
    fn renomeia_campo_legado() {
        let mut campos = BTreeMap::new();
        campos.insert(CAMPO_LEGADO_GRID.to_string(), dec!(5.541));

        let payload = montar_payload(data(), "VIBRA MARQUES", campos);
        assert_eq!(payload.gasolina_aditivada, Some(dec!(5.541)));
    }

    #[test]
    fn valor_legado_prevalece_sobre_o_atual() {
        let mut campos = BTreeMap::new();
        campos.insert(CAMPO_LEGADO_GRID.to_string(), dec!(5.0));
        campos.insert("gasolina_aditivada".to_string(), dec!(6.0));

        let payload = montar_payload(data(), "VIBRA MARQUES", campos);
        assert_eq!(payload.gasolina_aditivada, Some(dec!(5.0)));
    }

    #[test]
    fn arredonda_para_quatro_casas() {
        let mut campos = BTreeMap::new();
        campos.insert("gasolina_comum".to_string(), dec!(5.40583));

        let payload = montar_payload(data(), "VIBRA MARQUES", campos);
        assert_eq!(payload.gasolina_comum, Some(dec!(5.4058)));
    }

    #[test]
    fn data_em_iso_e_ausentes_como_null() {
        let mut campos = BTreeMap::new();
        campos.insert("etanol_hidratado".to_string(), dec!(4.2442));

        let payload = montar_payload(data(), "VIBRA MARQUES", campos);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["data_coleta"], "2025-09-02");
        assert_eq!(json["empresa"], "VIBRA MARQUES");
        assert_eq!(json["etanol_hidratado"], 4.2442);
        // null explícito, nunca chave omitida
        assert!(json.as_object().unwrap().contains_key("diesel_s10"));
        assert!(json["diesel_s10"].is_null());
        assert!(json["gasolina_comum"].is_null());
    }
}

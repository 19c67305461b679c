use regex::Regex;

/// Chave canônica usada na tabela `precos_combustiveis`, independente de
/// como a vitrine escreve o nome do produto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combustivel {
    GasolinaComum,
    GasolinaAditivada,
    EtanolHidratado,
    DieselS10,
    DieselS10Aditivado,
}

impl Combustivel {
    pub fn campo(&self) -> &'static str {
        match self {
            Combustivel::GasolinaComum => "gasolina_comum",
            Combustivel::GasolinaAditivada => "gasolina_aditivada",
            Combustivel::EtanolHidratado => "etanol_hidratado",
            Combustivel::DieselS10 => "diesel_s10",
            Combustivel::DieselS10Aditivado => "diesel_s10_aditivado",
        }
    }
}

/// Palavras que identificam um card de combustível na vitrine; o resto
/// (lubrificantes, ARLA, acessórios) nem chega ao parser.
pub const PALAVRAS_CHAVE: &[&str] = &["GASOLINA", "ETANOL", "DIESEL", "ÓLEO", "COMBUSTÍVEL"];

pub fn e_produto_combustivel(descricao: &str) -> bool {
    let maiusculo = descricao.to_uppercase();
    PALAVRAS_CHAVE.iter().any(|p| maiusculo.contains(p))
}

struct Regra {
    // None = descarte explícito (o rótulo casa mas não vira campo)
    combustivel: Option<Combustivel>,
    padroes: Vec<Regex>,
    exclui: Vec<Regex>,
}

/// Tabela de regras em ordem fixa de prioridade: a primeira chave cujo
/// padrão casa vence e a avaliação para.
///
/// Variantes aditivadas ("ADITIVADA"/"GRID") têm prioridade sobre a base,
/// e a regra base exclui o marcador de aditivo explicitamente — um rótulo
/// como "GASOLINA COMUM ADITIVADA" nunca cai em `gasolina_comum`.
pub struct Classificador {
    regras: Vec<Regra>,
}

impl Default for Classificador {
    fn default() -> Self {
        Self::new()
    }
}

impl Classificador {
    pub fn new() -> Self {
        let regra = |combustivel, padroes: &[&str], exclui: &[&str]| Regra {
            combustivel,
            padroes: padroes.iter().map(|p| compilar(p)).collect(),
            exclui: exclui.iter().map(|p| compilar(p)).collect(),
        };

        Classificador {
            regras: vec![
                // S-500 fica de fora da tabela por decisão de negócio
                regra(None, &[r"s\s*-?\s*500"], &[]),
                regra(
                    Some(Combustivel::GasolinaAditivada),
                    &[r"gasolina.*aditivad", r"gasolina.*\bgrid\b"],
                    &[],
                ),
                regra(
                    Some(Combustivel::GasolinaComum),
                    &[r"gasolina\s*comum"],
                    &[r"aditivad", r"\bgrid\b"],
                ),
                regra(Some(Combustivel::EtanolHidratado), &[r"etanol"], &[]),
                regra(
                    Some(Combustivel::DieselS10Aditivado),
                    &[r"diesel\s*s\s*-?\s*10.*aditivad", r"óleo\s*diesel"],
                    &[],
                ),
                regra(
                    Some(Combustivel::DieselS10),
                    &[r"diesel\s*s\s*-?\s*10", r"\bs\s*-?\s*10\b"],
                    &[r"aditivad"],
                ),
            ],
        }
    }

    /// Mapeia o rótulo livre para a chave canônica, ou descarta.
    pub fn classificar(&self, rotulo: &str) -> Option<Combustivel> {
        let normalizado = rotulo.to_lowercase();
        for regra in &self.regras {
            let casa = regra.padroes.iter().any(|p| p.is_match(&normalizado));
            let excluido = regra.exclui.iter().any(|p| p.is_match(&normalizado));
            if casa && !excluido {
                return regra.combustivel;
            }
        }
        None
    }
}

fn compilar(padrao: &str) -> Regex {
    Regex::new(padrao).expect("padrão de classificação inválido")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaves_canonicas() {
        let c = Classificador::new();
        assert_eq!(
            c.classificar("GASOLINA COMUM"),
            Some(Combustivel::GasolinaComum)
        );
        assert_eq!(
            c.classificar("ETANOL HIDRATADO COMUM"),
            Some(Combustivel::EtanolHidratado)
        );
        assert_eq!(c.classificar("DIESEL S-10"), Some(Combustivel::DieselS10));
        assert_eq!(
            c.classificar("DIESEL S10 ADITIVADO"),
            Some(Combustivel::DieselS10Aditivado)
        );
    }

    #[test]
    fn aditivada_nunca_cai_na_base() {
        let c = Classificador::new();
        assert_eq!(
            c.classificar("GASOLINA COMUM ADITIVADA"),
            Some(Combustivel::GasolinaAditivada)
        );
        assert_eq!(
            c.classificar("GASOLINA GRID"),
            Some(Combustivel::GasolinaAditivada)
        );
    }

    #[test]
    fn oleo_diesel_e_a_variante_aditivada() {
        let c = Classificador::new();
        assert_eq!(
            c.classificar("ÓLEO DIESEL B S10"),
            Some(Combustivel::DieselS10Aditivado)
        );
    }

    #[test]
    fn s500_descartado() {
        let c = Classificador::new();
        assert_eq!(c.classificar("DIESEL S500"), None);
        assert_eq!(c.classificar("ÓLEO DIESEL B S-500"), None);
    }

    #[test]
    fn sem_regra_descarta() {
        let c = Classificador::new();
        assert_eq!(c.classificar("ARLA 32 GRANEL"), None);
        assert_eq!(c.classificar("LUBRIFICANTE LUBRAX"), None);
    }

    #[test]
    fn prefiltro_de_palavras_chave() {
        assert!(e_produto_combustivel("Óleo Diesel B S10"));
        assert!(e_produto_combustivel("gasolina grid"));
        assert!(!e_produto_combustivel("ARLA 32"));
    }
}

/// Seletores candidatos para o portal da Vibra, em ordem de preferência.
/// O portal troca de markup sem aviso; a lista cobre as variantes já vistas.
pub struct VitrineSelectors;

impl VitrineSelectors {
    /// Pares (usuário, senha) tentados em ordem; o primeiro par em que os
    /// dois campos aceitam entrada vence.
    pub const PARES_LOGIN: &'static [(&'static str, &'static str)] = &[
        ("input[name='username']", "input[name='password']"),
        ("input[name='usuario']", "input[name='senha']"),
        ("input[name='cnpj']", "input[name='password']"),
        (
            "input[formcontrolname='username']",
            "input[formcontrolname='password']",
        ),
        ("input[placeholder*='Usu' i]", "input[placeholder*='Sen' i]"),
        ("#usuario", "#senha"),
        ("input[type='text']", "input[type='password']"),
    ];

    pub const BOTOES_SUBMIT: &'static [&'static str] = &[
        "#btn-acessar",
        "button[type='submit']",
        "input[type='submit']",
        "[role='button']",
    ];

    /// Textos de botão aceitos pela estratégia de submit por texto.
    pub const TEXTOS_SUBMIT: &'static [&'static str] = &["ENTRAR", "ACESSAR", "LOGIN"];

    pub const CAMPO_SENHA: &'static str = "input[type='password']";

    pub const FRAMES: &'static str = "iframe, frame";

    // Vitrine
    pub const CARD_PRODUTO: &'static str = ".card-produto";
    pub const ITEM_DESCRICAO: &'static str = "span.item-descricao";
    pub const SCROLL_CONTAINER: &'static str = ".scrollbar-container";
}

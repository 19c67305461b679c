use chrono::NaiveDate;
use robo_precos::precos::PrecosCombustiveis;
use robo_precos::supabase::{PoliticaRetry, SupabaseClient, STATUS_REDE};
use rust_decimal_macros::dec;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn precos_do_dia() -> PrecosCombustiveis {
    PrecosCombustiveis {
        data_coleta: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
        empresa: "VIBRA MARQUES".to_string(),
        gasolina_comum: Some(dec!(5.4058)),
        gasolina_aditivada: Some(dec!(5.541)),
        etanol_hidratado: Some(dec!(4.2442)),
        diesel_s10: Some(dec!(5.5501)),
        diesel_s10_aditivado: None,
    }
}

fn cliente(base: &str, max_tentativas: u32) -> SupabaseClient {
    SupabaseClient::new(
        base,
        "chave-teste",
        "precos_combustiveis",
        Duration::from_secs(5),
        PoliticaRetry::new(max_tentativas, Duration::from_millis(5)),
    )
    .unwrap()
}

#[tokio::test]
async fn upsert_retenta_5xx_ate_suceder() {
    let servidor = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/precos_combustiveis"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&servidor)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/precos_combustiveis"))
        .and(query_param("on_conflict", "data_coleta,empresa"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&servidor)
        .await;

    let resultado = cliente(&servidor.uri(), 3).upsert(&precos_do_dia(), false).await;

    assert!(resultado.sucesso());
    assert_eq!(resultado.status, 201);
    assert_eq!(resultado.tentativas, 3);
}

#[tokio::test]
async fn upsert_4xx_e_terminal_sem_retry() {
    let servidor = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/precos_combustiveis"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message":"violação de constraint"}"#),
        )
        .expect(1)
        .mount(&servidor)
        .await;

    let resultado = cliente(&servidor.uri(), 3).upsert(&precos_do_dia(), false).await;

    assert!(!resultado.sucesso());
    assert_eq!(resultado.status, 422);
    assert_eq!(resultado.tentativas, 1);
    assert!(resultado.corpo.contains("violação"));
}

#[tokio::test]
async fn upsert_5xx_esgota_tentativas() {
    let servidor = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/precos_combustiveis"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&servidor)
        .await;

    let resultado = cliente(&servidor.uri(), 3).upsert(&precos_do_dia(), false).await;

    assert_eq!(resultado.status, 500);
    assert_eq!(resultado.tentativas, 3);
}

#[tokio::test]
async fn upsert_identico_duas_vezes_pede_merge_no_servidor() {
    let servidor = MockServer::start().await;
    let precos = precos_do_dia();

    // O corpo é idêntico nos dois envios e o pedido carrega a chave de
    // conflito + merge-duplicates: o estado final no servidor é o mesmo
    // de um envio só.
    Mock::given(method("POST"))
        .and(path("/rest/v1/precos_combustiveis"))
        .and(query_param("on_conflict", "data_coleta,empresa"))
        .and(header("Prefer", "resolution=merge-duplicates,return=minimal"))
        .and(header("apikey", "chave-teste"))
        .and(body_json(json!({
            "data_coleta": "2025-09-02",
            "empresa": "VIBRA MARQUES",
            "gasolina_comum": 5.4058,
            "gasolina_aditivada": 5.541,
            "etanol_hidratado": 4.2442,
            "diesel_s10": 5.5501,
            "diesel_s10_aditivado": null
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&servidor)
        .await;

    let cliente = cliente(&servidor.uri(), 3);
    let primeiro = cliente.upsert(&precos, false).await;
    let segundo = cliente.upsert(&precos, false).await;

    assert!(primeiro.sucesso());
    assert!(segundo.sucesso());
    assert_eq!(segundo.tentativas, 1);
}

#[tokio::test]
async fn upsert_com_representacao_pede_o_registro_gravado() {
    let servidor = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/precos_combustiveis"))
        .and(header(
            "Prefer",
            "resolution=merge-duplicates,return=representation",
        ))
        .respond_with(
            ResponseTemplate::new(201).set_body_string(r#"[{"empresa":"VIBRA MARQUES"}]"#),
        )
        .expect(1)
        .mount(&servidor)
        .await;

    let resultado = cliente(&servidor.uri(), 3).upsert(&precos_do_dia(), true).await;

    assert!(resultado.sucesso());
    assert!(resultado.corpo.contains("VIBRA MARQUES"));
}

#[tokio::test]
async fn falha_de_rede_vira_status_sentinela() {
    // Porta reservada sem listener: toda tentativa falha no connect
    let resultado = cliente("http://127.0.0.1:9", 2).upsert(&precos_do_dia(), false).await;

    assert_eq!(resultado.status, STATUS_REDE);
    assert_eq!(resultado.tentativas, 2);
    assert!(resultado.corpo.starts_with("Erro de rede"));
}

#[tokio::test]
async fn consulta_filtra_empresa_e_ordena_por_data() {
    let servidor = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/precos_combustiveis"))
        .and(query_param("empresa", "eq.VIBRA MARQUES"))
        .and(query_param("order", "data_coleta.desc"))
        .and(query_param("limit", "5"))
        .and(header("apikey", "chave-teste"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"data_coleta":"2025-09-02","empresa":"VIBRA MARQUES"}]"#),
        )
        .expect(1)
        .mount(&servidor)
        .await;

    let resultado = cliente(&servidor.uri(), 3)
        .consultar("VIBRA MARQUES", 5)
        .await
        .unwrap();

    assert_eq!(resultado.status, 200);
    assert!(resultado.corpo.contains("2025-09-02"));
}

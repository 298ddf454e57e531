use std::sync::Arc;

use ndarray::array;
use serde_json::Value;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

use regression::{Dataset, LinearModel, OlsTrainer, artifact};
use server::{App, conn};

fn test_app() -> App {
    App::new(Arc::new(LinearModel::new(vec![1.0, 2.0, 3.0], 0.5)))
}

fn trained_app() -> App {
    let dataset = Dataset::new(
        array![
            [1.0, 2.0, 3.0],
            [2.0, 3.0, 4.0],
            [3.0, 4.0, 5.0],
            [4.0, 5.0, 6.0],
            [5.0, 6.0, 7.0],
        ],
        array![10.0, 14.0, 18.0, 22.0, 26.0],
    );

    App::new(Arc::new(OlsTrainer::default().fit(&dataset)))
}

fn post_predict(body: &str) -> String {
    format!(
        "POST /predict HTTP/1.1\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

/// Splits concatenated wire responses using their content-length headers.
fn parse_responses(mut text: &str) -> Vec<(u16, Value)> {
    let mut out = Vec::new();

    while !text.is_empty() {
        let (head, rest) = text.split_once("\r\n\r\n").unwrap();

        let status: u16 = head
            .lines()
            .next()
            .unwrap()
            .split_whitespace()
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();

        let len: usize = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length: "))
            .unwrap()
            .parse()
            .unwrap();

        let (body, remaining) = rest.split_at(len);
        out.push((status, serde_json::from_str(body).unwrap()));
        text = remaining;
    }

    out
}

/// Writes `raw` to a fresh connection served by `app` and returns every
/// response that comes back.
async fn exchange(app: App, raw: &str) -> Vec<(u16, Value)> {
    let (client, srv) = io::duplex(16 * 1024);

    let (srv_rx, srv_tx) = io::split(srv);
    let server_task = tokio::spawn(async move { conn::serve(app, srv_rx, srv_tx).await });

    let (mut client_rx, mut client_tx) = io::split(client);
    client_tx.write_all(raw.as_bytes()).await.unwrap();
    client_tx.shutdown().await.unwrap();

    let mut out = Vec::new();
    client_rx.read_to_end(&mut out).await.unwrap();
    server_task.await.unwrap().unwrap();

    parse_responses(&String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn predict_returns_rounded_prediction_and_version() {
    let responses = exchange(test_app(), &post_predict(r#"{"features": [1, 2, 3]}"#)).await;

    let (status, body) = &responses[0];
    assert_eq!(*status, 200);
    assert_eq!(body["prediction"], 14.5);
    assert_eq!(body["version"], "v1.0");
}

#[tokio::test]
async fn trained_model_reproduces_training_targets() {
    let app = trained_app();

    for (features, target) in [
        ("[1, 2, 3]", 10.0),
        ("[3, 4, 5]", 18.0),
        ("[5, 6, 7]", 26.0),
    ] {
        let raw = post_predict(&format!(r#"{{"features": {features}}}"#));
        let responses = exchange(app.clone(), &raw).await;

        let (status, body) = &responses[0];
        assert_eq!(*status, 200);
        assert_eq!(body["prediction"], target);
        assert_eq!(body["version"], "v1.0");
    }
}

#[tokio::test]
async fn artifact_written_by_trainer_side_serves_identically() {
    let dataset = Dataset::new(array![[0.0, 1.0], [1.0, 0.0]], array![2.0, 4.0]);
    let model = OlsTrainer::default().fit(&dataset);

    let path = std::env::temp_dir().join(format!("server-e2e-model-{}.json", std::process::id()));
    artifact::save(&model, &path).unwrap();
    let loaded = artifact::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let direct = exchange(
        App::new(Arc::new(model)),
        &post_predict(r#"{"features": [0.5, 0.5]}"#),
    )
    .await;
    let via_artifact = exchange(
        App::new(Arc::new(loaded)),
        &post_predict(r#"{"features": [0.5, 0.5]}"#),
    )
    .await;

    assert_eq!(direct[0].1["prediction"], via_artifact[0].1["prediction"]);
}

#[tokio::test]
async fn missing_features_is_unprocessable() {
    let responses = exchange(test_app(), &post_predict("{}")).await;

    let (status, body) = &responses[0];
    assert_eq!(*status, 422);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn wrong_field_is_unprocessable() {
    let responses = exchange(test_app(), &post_predict(r#"{"invalid_field": [1, 2, 3]}"#)).await;
    assert_eq!(responses[0].0, 422);
}

#[tokio::test]
async fn wrong_feature_count_is_unprocessable() {
    let responses = exchange(test_app(), &post_predict(r#"{"features": [1, 2, 3, 4]}"#)).await;
    assert_eq!(responses[0].0, 422);
}

#[tokio::test]
async fn get_predict_is_method_not_allowed() {
    let responses = exchange(test_app(), "GET /predict HTTP/1.1\r\n\r\n").await;

    let (status, body) = &responses[0];
    assert_eq!(*status, 405);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn negative_zero_and_float_features_are_served() {
    let responses = exchange(
        test_app(),
        &post_predict(r#"{"features": [-1.5, 0, 3.25]}"#),
    )
    .await;

    let (status, body) = &responses[0];
    assert_eq!(*status, 200);
    let p = body["prediction"].as_f64().unwrap();
    assert!(p.is_finite());
}

#[tokio::test]
async fn keep_alive_serves_identical_predictions() {
    let body = r#"{"features": [2, 2, 2]}"#;
    let first = post_predict(body);
    let second = format!(
        "POST /predict HTTP/1.1\r\nconnection: close\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
        body.len(),
        body
    );

    let responses = exchange(test_app(), &format!("{first}{second}")).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].0, 200);
    assert_eq!(responses[1].0, 200);
    assert_eq!(responses[0].1["prediction"], responses[1].1["prediction"]);
    assert_eq!(responses[0].1["version"], responses[1].1["version"]);
}

#[tokio::test]
async fn malformed_request_line_gets_bad_request() {
    let responses = exchange(test_app(), "this is not http\r\n\r\n").await;

    let (status, body) = &responses[0];
    assert_eq!(*status, 400);
    assert!(body["detail"].is_string());
}

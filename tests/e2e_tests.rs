mod common;

use common::harness::{TestServerConfig, spawn_mock_server, spawn_stub_server};
use common::http_client::{TestClient, TestClientError, block};
use textscore::scoring::{MockScorer, SchedulerConfig};

#[tokio::test]
async fn test_health_endpoint() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let body = client.health().await.unwrap();

    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_score_page_lifecycle() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let blocks = vec![
        block("nav", "Home"),
        block(
            "p1",
            "In today's rapidly evolving digital landscape, it is crucial to leverage synergies.",
        ),
        block("p2", "   "),
        block("p3", "we went hiking on saturday and the dog found a stick"),
    ];

    let response = client.score(blocks).await.unwrap();

    assert_eq!(response.scale, "1-100");
    let ids: Vec<&str> = response.scores.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["nav", "p1", "p2", "p3"]);
    assert_eq!(response.scores[0].score, None);
    assert_eq!(response.scores[2].score, None);
    for scored in [&response.scores[1], &response.scores[3]] {
        let score = scored.score.expect("long text must be scored");
        assert!((0.0..=100.0).contains(&score));
    }
}

#[tokio::test]
async fn test_score_repeat_requests_identical() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());
    let blocks = vec![
        block("a", "Deterministic scoring across separate requests."),
        block("b", "short"),
    ];

    let first = client.score(blocks.clone()).await.unwrap();
    let second = client.score(blocks).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_batch_size_respected_end_to_end() {
    let config = TestServerConfig {
        scheduler: SchedulerConfig::default().with_batch_size(3),
        ..Default::default()
    };
    let server = spawn_mock_server(config).await.unwrap();
    let client = TestClient::new(server.url());

    let blocks: Vec<_> = (0..10)
        .map(|i| {
            if i % 4 == 0 {
                block(&i.to_string(), "tiny")
            } else {
                block(&i.to_string(), &format!("paragraph {i} with enough text"))
            }
        })
        .collect();

    let response = client.score(blocks.clone()).await.unwrap();

    // 0, 4 and 8 are short: seven eligible blocks in chunks of three
    assert_eq!(server.state.scheduler.scorer().call_sizes(), vec![3, 3, 1]);
    for (sent, scored) in blocks.iter().zip(&response.scores) {
        assert_eq!(sent.id, scored.id);
        if sent.text == "tiny" {
            assert_eq!(scored.score, None);
        } else {
            assert_eq!(scored.score, Some(MockScorer::expected_score(&sent.text)));
        }
    }
}

#[tokio::test]
async fn test_concurrent_requests_do_not_mix_results() {
    let server = spawn_mock_server(TestServerConfig::default()).await.unwrap();
    let url = server.url();

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let client = TestClient::new(url.clone());
            tokio::spawn(async move {
                let blocks: Vec<_> = (0..n + 1)
                    .map(|i| block(&format!("{n}-{i}"), &format!("request {n} block {i} text")))
                    .collect();
                let response = client.score(blocks.clone()).await.unwrap();
                (blocks, response)
            })
        })
        .collect();

    for task in tasks {
        let (blocks, response) = task.await.unwrap();
        assert_eq!(blocks.len(), response.scores.len());
        for (sent, scored) in blocks.iter().zip(&response.scores) {
            assert_eq!(sent.id, scored.id);
            assert_eq!(scored.score, Some(MockScorer::expected_score(&sent.text)));
        }
    }
}

#[tokio::test]
async fn test_score_rejects_oversized_request() {
    let config = TestServerConfig {
        max_blocks: 2,
        ..Default::default()
    };
    let server = spawn_mock_server(config).await.unwrap();
    let client = TestClient::new(server.url());

    let result = client
        .score(vec![block("a", "one"), block("b", "two"), block("c", "three")])
        .await;

    assert!(matches!(result, Err(TestClientError::BadRequest(_))));
}

#[tokio::test]
async fn test_rewrite_round_trip() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let response = client.rewrite("hello").await.unwrap();

    assert_eq!(response.text, "hello");
}

#[tokio::test]
async fn test_cors_preflight_from_extension_origin() {
    let server = spawn_stub_server().await.unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .raw()
        .request(reqwest::Method::OPTIONS, client.url("/score"))
        .header("Origin", "chrome-extension://textscore-test")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("chrome-extension://textscore-test")
    );
    assert_eq!(
        resp.headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

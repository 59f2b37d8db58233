use appgraph_core::{Error, IngestClient, IngestConfig};
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use std::time::Duration;

const TWO_NODES: &str = r#"{"graphs": [{"nodes": [{"app_id": "a", "label": "A"},
                                                   {"app_id": "b", "label": "B"}],
                                        "edges": [[0, 1]]}]}"#;

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn serve(status: StatusCode, body: &'static str) -> String {
    spawn(Router::new().route("/graphs", get(move || async move { (status, body) }))).await
}

fn client(base: &str) -> IngestClient {
    IngestClient::new(IngestConfig::new(base).unwrap()).unwrap()
}

#[tokio::test]
async fn ingest_fetch_first_returns_the_first_graph() {
    let base = serve(StatusCode::OK, TWO_NODES).await;

    let graph = client(&base).fetch_first().await.unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].app_id, "a");
}

#[tokio::test]
async fn ingest_fetch_graph_builds_the_typed_model() {
    let base = serve(StatusCode::OK, TWO_NODES).await;

    let graph = client(&base).fetch_graph().await.unwrap();
    assert_eq!(graph.edges[0].source, "a");
    assert_eq!(graph.edges[0].target, "b");
}

#[tokio::test]
async fn ingest_reports_http_status_with_the_attempted_url() {
    let base = serve(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let err = client(&base).fetch_first().await.unwrap_err();
    match err {
        Error::HttpStatus { status, url } => {
            assert_eq!(status, 500);
            assert_eq!(url, format!("{base}/graphs"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ingest_reports_an_empty_graph_list() {
    let base = serve(StatusCode::OK, r#"{"graphs": []}"#).await;

    let err = client(&base).fetch_first().await.unwrap_err();
    assert!(err.is_empty_result(), "{err}");
}

#[tokio::test]
async fn ingest_reports_a_missing_graph_list_as_empty() {
    let base = serve(StatusCode::OK, r#"{"message": "hi"}"#).await;

    let payload = client(&base).fetch_payload().await.unwrap();
    assert!(payload.is_empty());
}

#[tokio::test]
async fn ingest_reports_malformed_bodies() {
    let base = serve(StatusCode::OK, r#"{"graphs": [{"nodes": "x", "edges": []}]}"#).await;

    let err = client(&base).fetch_first().await.unwrap_err();
    assert!(matches!(err, Error::MalformedData { .. }), "{err}");
}

#[tokio::test]
async fn ingest_builder_errors_surface_from_fetch_graph() {
    let base = serve(
        StatusCode::OK,
        r#"{"graphs": [{"nodes": [{"app_id": "a", "label": "A"}], "edges": [[0, 4]]}]}"#,
    )
    .await;

    let err = client(&base).fetch_graph().await.unwrap_err();
    assert!(matches!(err, Error::MalformedData { .. }), "{err}");
}

#[tokio::test]
async fn ingest_reports_transport_failures() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}")).fetch_first().await.unwrap_err();
    match err {
        Error::Transport { url, .. } => assert_eq!(url, format!("http://{addr}/graphs")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ingest_times_out_as_a_transport_failure() {
    let base = spawn(Router::new().route(
        "/graphs",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            TWO_NODES
        }),
    ))
    .await;

    let config = IngestConfig::new(&base)
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let err = IngestClient::new(config)
        .unwrap()
        .fetch_first()
        .await
        .unwrap_err();
    match err {
        Error::Transport { source, .. } => assert!(source.is_timeout(), "{source}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ingest_honours_a_base_path() {
    let base = spawn(Router::new().route("/api/graphs", get(|| async { TWO_NODES }))).await;

    let graph = client(&format!("{base}/api/")).fetch_first().await.unwrap();
    assert_eq!(graph.nodes.len(), 2);
}

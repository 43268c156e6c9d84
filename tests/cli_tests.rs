use assert_cmd::Command;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use predicates::prelude::*;
use tokio::net::TcpListener;

fn news_picker_cmd() -> Command {
    let mut cmd = Command::cargo_bin("news_picker").unwrap();
    cmd.env("NO_PROXY", "127.0.0.1,localhost")
        .env_remove("NEWS_SERVICE_URL")
        .env_remove("NEWS_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Serve a fixed `/fetch-news` response and return the base URL.
async fn spawn_service(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/fetch-news", post(move || async move { (status, body) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn test_help_shows_search_flags() {
    news_picker_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--topic"))
        .stdout(predicate::str::contains("--source"))
        .stdout(predicate::str::contains("NEWS_SERVICE_URL"));
}

#[test]
fn test_list_sources_shows_both_groups() {
    news_picker_cmd()
        .arg("--list-sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indian Sources:"))
        .stdout(predicate::str::contains("International Sources:"))
        .stdout(predicate::str::contains("the-hindu"));
}

#[test]
fn test_list_topics() {
    news_picker_cmd()
        .arg("--list-topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Technology"));
}

#[test]
fn test_unknown_source_fails_before_request() {
    news_picker_cmd()
        .args(["--topic", "cats", "--source", "the-onion"])
        .env("NEWS_SERVICE_URL", unused_local_url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown source: the-onion"))
        .stderr(predicate::str::contains("ALERT").not());
}

#[test]
fn test_missing_catalog_file_fails() {
    news_picker_cmd()
        .args(["--catalog", "/nonexistent/catalog.yaml", "--list-sources"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/catalog.yaml"));
}

#[test]
fn test_unreachable_service_alerts() {
    news_picker_cmd()
        .args(["--topic", "elections"])
        .args(["--endpoint", &unused_local_url()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "ALERT: Failed to fetch news. Please try again.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_one_shot_renders_fallbacks() {
    let base = spawn_service(StatusCode::OK, r#"[{"title":"A","link":"https://x/1"}]"#).await;

    tokio::task::spawn_blocking(move || {
        news_picker_cmd()
            .args(["--topic", "elections", "--source", "the-hindu", "--endpoint", &base])
            .assert()
            .success()
            .stdout(predicate::str::contains("A\n"))
            .stdout(predicate::str::contains(
                "By Unknown | Unknown date | Unknown Source",
            ))
            .stdout(predicate::str::contains("No summary available"))
            .stdout(predicate::str::contains("Read more: https://x/1"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_one_shot_empty_result_placeholder() {
    let base = spawn_service(StatusCode::OK, "[]").await;

    tokio::task::spawn_blocking(move || {
        news_picker_cmd()
            .args(["--topic", "nothing", "--endpoint", &base])
            .assert()
            .success()
            .stdout("No articles found.\n");
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_one_shot_error_status_alerts() {
    let base = spawn_service(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await;

    tokio::task::spawn_blocking(move || {
        news_picker_cmd()
            .args(["--topic", "elections", "--endpoint", &base])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("ALERT: Failed to fetch news."))
            .stderr(predicate::str::contains("boom").not());
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_format() {
    let base = spawn_service(StatusCode::OK, r#"[{"title":"A"}]"#).await;

    tokio::task::spawn_blocking(move || {
        news_picker_cmd()
            .args(["--topic", "x", "--format", "json", "--endpoint", &base])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""state": "articles""#))
            .stdout(predicate::str::contains(r#""author": "Unknown""#));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_interactive_session_from_stdin() {
    let base = spawn_service(
        StatusCode::OK,
        r#"[{"title":"Interactive hit","link":"https://x/9"}]"#,
    )
    .await;

    tokio::task::spawn_blocking(move || {
        news_picker_cmd()
            .args(["--endpoint", &base])
            .write_stdin("sources\nsearch bbc-news technology\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Searching \"technology\" in BBC News..."))
            .stdout(predicate::str::contains("Interactive hit"));
    })
    .await
    .unwrap();
}

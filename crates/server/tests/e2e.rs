use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestServer {
    base_url: String,
    dir: PathBuf,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

async fn start_server() -> anyhow::Result<TestServer> {
    // isolated data dir per test run
    let dir = std::env::temp_dir().join(format!("dashboard_api_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = dir.clone();
    cfg.storage.init_missing = true;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestServer { base_url, dir })
}

#[tokio::test]
async fn e2e_case_lifecycle_over_http() -> anyhow::Result<()> {
    let srv = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/api/cases", srv.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    let res = c.post(format!("{}/api/cases", srv.base_url))
        .json(&json!({"id": "c-1", "title": "Lease dispute"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.put(format!("{}/api/cases/c-1", srv.base_url))
        .json(&json!({"title": "Lease dispute (settled)"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["title"], "Lease dispute (settled)");
    assert!(body["updatedAt"].is_string());

    let res = c.get(format!("{}/api/documents", srv.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_cors_is_permissive() -> anyhow::Result<()> {
    let srv = start_server().await?;
    let res = reqwest::Client::new()
        .get(format!("{}/health", srv.base_url))
        .header("Origin", "http://example.test")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().get("access-control-allow-origin").is_some());
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_creates_are_all_kept() -> anyhow::Result<()> {
    let srv = start_server().await?;
    let c = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..10 {
        let c = c.clone();
        let url = format!("{}/api/cases", srv.base_url);
        tasks.push(tokio::spawn(async move {
            c.post(url).json(&json!({ "id": format!("case-{i}") })).send().await
        }));
    }
    for t in tasks {
        assert_eq!(t.await??.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(format!("{}/api/cases", srv.base_url)).send().await?;
    let list = res.json::<serde_json::Value>().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(10));
    Ok(())
}

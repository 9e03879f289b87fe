//! End-to-end test over a real socket.

mod common;

use std::time::Duration;

use common::Fixture;
use jinja_hub::lifecycle::Shutdown;
use jinja_hub::net::{self, BindAddress};
use jinja_hub::HttpServer;

#[tokio::test]
async fn test_serves_and_shuts_down() {
    let fixture = Fixture::new();
    let listener = net::bind(&BindAddress::new("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(fixture.config(), fixture.host());
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/foo/dash.html"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert!(res.text().await.unwrap().starts_with("foo|/foo|/foo|Dashboard|"));

    let res = client
        .get(format!("http://{addr}/"))
        .header("host", "foo.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().starts_with("foo|/|/|Sign in|"));

    let config: serde_json::Value = client
        .get(format!("http://{addr}/foo/api/config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(config["pages"]["ecs"]["title"], "Instances");

    let res = client
        .get(format!("http://{addr}/off/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_client_request_id_is_kept() {
    let fixture = Fixture::new();
    let listener = net::bind(&BindAddress::new("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(fixture.config(), fixture.host());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let res = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .get(format!("http://{addr}/foo/"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-42");

    shutdown.trigger();
}

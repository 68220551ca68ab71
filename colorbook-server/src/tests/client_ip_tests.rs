use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::net::client_ip::{ClientIpResolver, UNKNOWN_IP};

/// Tiny echo service standing in for the public IP endpoints. Counts hits so
/// tests can observe the resolver's cache.
async fn spawn_echo(body: &'static str) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/ip",
            get(move |State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                body
            }),
        )
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind echo listener");
    let addr = listener.local_addr().expect("echo addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, hits)
}

#[tokio::test]
async fn resolves_from_the_primary_endpoint_and_caches() {
    let (addr, hits) = spawn_echo("203.0.113.7").await;
    let resolver = ClientIpResolver::new(
        reqwest::Client::new(),
        format!("http://{addr}/ip"),
        "http://127.0.0.1:9/fallback".to_string(),
    );

    assert_eq!(resolver.resolve().await, "203.0.113.7");
    assert_eq!(resolver.resolve().await, "203.0.113.7");
    // Second call was served from the cache.
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    resolver.reset().await;
    assert_eq!(resolver.resolve().await, "203.0.113.7");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn falls_back_to_the_secondary_endpoint() {
    let (addr, hits) = spawn_echo("198.51.100.23").await;
    let resolver = ClientIpResolver::new(
        reqwest::Client::new(),
        // Primary is unroutable.
        "http://127.0.0.1:9/primary".to_string(),
        format!("http://{addr}/ip"),
    );

    assert_eq!(resolver.resolve().await, "198.51.100.23");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn yields_unknown_when_both_endpoints_fail() {
    let resolver = ClientIpResolver::new(
        reqwest::Client::new(),
        "http://127.0.0.1:9/primary".to_string(),
        "http://127.0.0.1:9/fallback".to_string(),
    );
    assert_eq!(resolver.resolve().await, UNKNOWN_IP);
    // The failure is cached too; callers never wait twice.
    assert_eq!(resolver.resolve().await, UNKNOWN_IP);
}

#[tokio::test]
async fn rejects_bodies_that_are_not_ip_addresses() {
    let (addr, _) = spawn_echo("<html>definitely not an ip</html>").await;
    let resolver = ClientIpResolver::new(
        reqwest::Client::new(),
        format!("http://{addr}/ip"),
        "http://127.0.0.1:9/fallback".to_string(),
    );
    assert_eq!(resolver.resolve().await, UNKNOWN_IP);
}

//! End-to-end tests over a real TCP socket
//!
//! Binds the router to an ephemeral port and drives it with an HTTP client,
//! so blocking pops are exercised across real concurrent connections.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use mini_kvq::{api::create_router, AppState};
use serde_json::{json, Value};

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(AppState::new());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn post(client: &reqwest::Client, addr: SocketAddr, route: &str, command: &str) -> (u16, Value) {
    let response = client
        .post(format!("http://{}{}", addr, route))
        .json(&json!({ "command": command }))
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blocking_pop_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let waiter = {
        let client = client.clone();
        tokio::spawn(async move {
            let start = Instant::now();
            let result = post(&client, addr, "/bqpop", "BQPOP jobs 5").await;
            (result, start.elapsed())
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let (status, json) = post(&client, addr, "/qpush", "QPUSH jobs 42").await;
    assert_eq!(status, 200);
    assert_eq!(json["length"], 1);

    let ((status, json), elapsed) = waiter.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(json, json!({"value": 42}));
    assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_waiters_one_push() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let waiters: Vec<_> = (0..2)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { post(&client, addr, "/bqpop", "BQPOP q 1").await })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(100)).await;
    post(&client, addr, "/qpush", "QPUSH q 1").await;

    let mut values = Vec::new();
    for waiter in waiters {
        let (status, json) = waiter.await.unwrap();
        assert_eq!(status, 200);
        values.push(json["value"].clone());
    }

    let delivered: Vec<_> = values.iter().filter(|v| !v.is_null()).collect();
    assert_eq!(delivered, vec![&json!(1)], "exactly one waiter receives the element");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_abandoned_waiter_does_not_strand_element() {
    let addr = spawn_server().await;

    // Separate clients so dropping the first request closes its connection
    let abandoned = {
        let client = reqwest::Client::new();
        tokio::spawn(async move { post(&client, addr, "/bqpop", "BQPOP q 5").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::new();
    let waiter = {
        let client = client.clone();
        tokio::spawn(async move {
            let start = Instant::now();
            let result = post(&client, addr, "/bqpop", "BQPOP q 5").await;
            (result, start.elapsed())
        })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    abandoned.abort();
    assert!(abandoned.await.unwrap_err().is_cancelled());
    tokio::time::sleep(Duration::from_millis(200)).await;

    let (status, _) = post(&client, addr, "/qpush", "QPUSH q 7").await;
    assert_eq!(status, 200);

    let ((status, json), elapsed) = waiter.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(json, json!({"value": 7}));
    assert!(elapsed < Duration::from_secs(2), "element was held back for {:?}", elapsed);

    let (status, _) = post(&client, addr, "/qpop", "QPOP q").await;
    assert_eq!(status, 400, "the element was delivered exactly once");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blocking_pop_timeout_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let start = Instant::now();
    let (status, json) = post(&client, addr, "/bqpop", "BQPOP empty 0.2").await;
    let elapsed = start.elapsed();

    assert_eq!(status, 200);
    assert_eq!(json, json!({"value": null}));
    assert!(elapsed >= Duration::from_millis(200), "returned early: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(1), "returned late: {:?}", elapsed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sets_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let writers: Vec<_> = (0..50)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                post(&client, addr, "/set", &format!("SET key{} value{}", i, i)).await
            })
        })
        .collect();

    for writer in writers {
        let (status, json) = writer.await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(json["result"], "OK");
    }

    for i in 0..50 {
        let (status, json) = post(&client, addr, "/get", &format!("GET key{}", i)).await;
        assert_eq!(status, 200);
        assert_eq!(json["value"], format!("value{}", i));
    }
}

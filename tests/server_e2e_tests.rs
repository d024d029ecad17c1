//! End-to-end Tests over a real socket
//!
//! Starts the server on an ephemeral port and talks to it with reqwest.

use std::net::SocketAddr;

use serde_json::{json, Value as Json};
use tokio::task::JoinHandle;
use typed_kv::{server::create_router, AppState, Storage};

async fn spawn_server(capacity: usize) -> (SocketAddr, JoinHandle<()>) {
    let app = create_router(AppState::new(Storage::new(capacity).unwrap()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, handle)
}

async fn post_command(client: &reqwest::Client, addr: SocketAddr, command: Json) -> Json {
    client
        .post(format!("http://{}/command", addr))
        .json(&command)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_over_http() {
    let (addr, handle) = spawn_server(10).await;

    let body: Json = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "healthy");
    handle.abort();
}

#[tokio::test]
async fn test_concurrent_smove_keeps_member_in_one_set() {
    let (addr, handle) = spawn_server(10).await;
    let client = reqwest::Client::new();

    post_command(&client, addr, json!({"op": "sadd", "key": "A", "member": "x"})).await;

    // Bounce the member between two sets from several clients at once.
    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            let (source, destination) = if i % 2 == 0 { ("A", "B") } else { ("B", "A") };
            tokio::spawn(async move {
                for _ in 0..10 {
                    post_command(
                        &client,
                        addr,
                        json!({"op": "smove", "source": source, "destination": destination, "member": "x"}),
                    )
                    .await;
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    let in_a = post_command(&client, addr, json!({"op": "sismember", "key": "A", "member": "x"})).await;
    let in_b = post_command(&client, addr, json!({"op": "sismember", "key": "B", "member": "x"})).await;
    let total = in_a["value"].as_i64().unwrap() + in_b["value"].as_i64().unwrap();
    assert_eq!(total, 1);

    handle.abort();
}

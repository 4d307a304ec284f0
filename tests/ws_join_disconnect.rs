//! Drives a real websocket server over a real socket (§8 Scenario 6: join
//! then disconnect). Mirrors the teacher's `tests/support/websocket*.rs`
//! pattern (a real `HttpServer` on a random port plus a `tokio-tungstenite`
//! client), minus the JWT/transaction-injection middleware this crate has
//! no use for.

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use belote_server::state::AppState;
use belote_server::ws::session::upgrade;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

async fn start_test_server() -> (actix_web::dev::ServerHandle, std::net::SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let state = web::Data::new(AppState::new());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/ws", web::get().to(upgrade))
    })
    .listen(listener)
    .unwrap()
    .run();

    let handle = server.handle();
    tokio::spawn(server);
    (handle, addr)
}

async fn recv_json(
    stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
) -> Value {
    let msg = tokio::time::timeout(Duration::from_secs(2), stream.next())
        .await
        .expect("timed out waiting for a message")
        .expect("stream ended")
        .expect("websocket protocol error");
    match msg {
        Message::Text(text) => serde_json::from_str(&text).expect("valid JSON"),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn join_then_disconnect_updates_the_roster() {
    let (handle, addr) = start_test_server().await;
    let url = format!("ws://{addr}/ws");

    let (mut c1, _) = connect_async(&url).await.unwrap();
    let (mut c2, _) = connect_async(&url).await.unwrap();

    c1.send(Message::Text(
        json!({"type": "join_room", "roomCode": "x", "nickname": "A"}).to_string(),
    ))
    .await
    .unwrap();
    let update = recv_json(&mut c1).await;
    assert_eq!(update["type"], "room_update");
    assert_eq!(update["roomCode"], "X"); // normalized to uppercase

    c2.send(Message::Text(
        json!({"type": "join_room", "roomCode": "X", "nickname": "B"}).to_string(),
    ))
    .await
    .unwrap();
    // Both clients observe the post-join roster of two.
    let _ = recv_json(&mut c1).await;
    let update = recv_json(&mut c2).await;
    let players = update["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);

    c1.close(None).await.unwrap();

    let update = recv_json(&mut c2).await;
    assert_eq!(update["type"], "room_update");
    let players = update["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["nickname"], "B");
    assert_eq!(players[0]["seat"], 1);

    handle.stop(true).await;
}

#[tokio::test]
async fn rejoining_a_different_room_vacates_the_old_seat() {
    let (handle, addr) = start_test_server().await;
    let url = format!("ws://{addr}/ws");

    let (mut c1, _) = connect_async(&url).await.unwrap();
    let (mut c2, _) = connect_async(&url).await.unwrap();

    c1.send(Message::Text(
        json!({"type": "join_room", "roomCode": "A", "nickname": "A"}).to_string(),
    ))
    .await
    .unwrap();
    let _ = recv_json(&mut c1).await; // room A roster of one

    c2.send(Message::Text(
        json!({"type": "join_room", "roomCode": "A", "nickname": "B"}).to_string(),
    ))
    .await
    .unwrap();
    let _ = recv_json(&mut c1).await; // room A roster of two
    let _ = recv_json(&mut c2).await;

    // c1 joins room B without ever disconnecting — it should vacate room A.
    c1.send(Message::Text(
        json!({"type": "join_room", "roomCode": "B", "nickname": "A"}).to_string(),
    ))
    .await
    .unwrap();

    // c2 (still in room A) observes the vacancy.
    let update = recv_json(&mut c2).await;
    assert_eq!(update["type"], "room_update");
    assert_eq!(update["roomCode"], "A");
    let players = update["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["nickname"], "B");

    // c1 observes its own room B roster of one.
    let update = recv_json(&mut c1).await;
    assert_eq!(update["type"], "room_update");
    assert_eq!(update["roomCode"], "B");
    let players = update["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["nickname"], "A");

    handle.stop(true).await;
}

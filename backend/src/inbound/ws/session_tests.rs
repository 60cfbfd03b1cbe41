//! Explorer WebSocket session tests.

use super::*;
use crate::inbound::http::test_utils::test_explorer_context;
use crate::inbound::ws;
use crate::inbound::ws::debounce::DebounceDelays;
use actix_web::{App, HttpServer, dev::Server, dev::ServerHandle, http::header};
use awc::{BoxedSocket, ws::Codec, ws::Frame};
use futures_util::{SinkExt, StreamExt};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use url::Url;

type Socket = actix_codec::Framed<BoxedSocket, Codec>;

const TEST_DEBOUNCE: Duration = Duration::from_millis(20);

#[fixture]
async fn start_ws_server() -> (String, Server) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let origin = Url::parse("http://localhost:3000").expect("origin");
    let ws_state = WsState::new(
        test_explorer_context(),
        DebounceDelays {
            search: TEST_DEBOUNCE,
            price: TEST_DEBOUNCE,
        },
        [origin],
    );
    let server = HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(ws_state.clone()))
            .service(ws::ws_entry)
    })
    .listen(listener)
    .expect("bind test server")
    .disable_signals()
    .run();
    let url = format!("http://{addr}");
    (url, server)
}

/// Connected client with the initial state frame already consumed.
#[fixture]
async fn ws_client(#[future] start_ws_server: (String, Server)) -> (Socket, ServerHandle) {
    let (url, server) = start_ws_server.await;
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let (_resp, mut socket) = awc::Client::default()
        .ws(format!("{url}/ws"))
        .set_header(header::ORIGIN, "http://localhost:3000")
        .connect()
        .await
        .expect("websocket connect");

    let initial = next_json(&mut socket).await;
    assert_eq!(initial["type"], "state");

    (socket, handle)
}

async fn send_json(socket: &mut Socket, value: Value) {
    socket
        .send(awc::ws::Message::Text(value.to_string().into()))
        .await
        .expect("send text");
}

async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let frame = socket.next().await.expect("response frame").expect("frame");
        match frame {
            Frame::Text(bytes) => return serde_json::from_slice(&bytes).expect("json"),
            Frame::Ping(_) | Frame::Pong(_) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

#[actix_rt::test]
async fn first_frame_is_the_initial_state() {
    let (url, server) = start_ws_server().await;
    actix_web::rt::spawn(server);
    let (_resp, mut socket) = awc::Client::default()
        .ws(format!("{url}/ws"))
        .set_header(header::ORIGIN, "http://localhost:3000")
        .connect()
        .await
        .expect("websocket connect");

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["type"], "state");
    assert_eq!(frame["view"]["resultCount"], 14);
    assert_eq!(frame["state"]["filters"]["search"], "");
    assert!(frame["traceId"].is_string());
}

#[rstest]
#[actix_rt::test]
async fn immediate_actions_answer_with_the_next_state(
    #[future] ws_client: (Socket, ServerHandle),
) {
    let (mut socket, _server) = ws_client.await;
    send_json(
        &mut socket,
        json!({"type": "action", "action": {"type": "selectCountry", "code": "IS"}}),
    )
    .await;

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["type"], "state");
    assert_eq!(frame["state"]["selection"]["activeCountry"], "IS");
    assert_eq!(frame["view"]["label"]["text"], "Iceland");
}

#[rstest]
#[actix_rt::test]
async fn typing_bursts_apply_only_the_last_query(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    for query in ["t", "tr", "tre", "trek"] {
        send_json(
            &mut socket,
            json!({"type": "action", "action": {"type": "setSearch", "query": query}}),
        )
        .await;
    }

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["state"]["filters"]["search"], "trek");

    let extra = tokio::time::timeout(TEST_DEBOUNCE * 2, next_json(&mut socket)).await;
    assert!(extra.is_err(), "superseded queries must not be applied");
}

#[rstest]
#[actix_rt::test]
async fn immediate_actions_flush_queued_ones_first(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    send_json(
        &mut socket,
        json!({"type": "action", "action": {"type": "setSearch", "query": "trek"}}),
    )
    .await;
    send_json(
        &mut socket,
        json!({"type": "action", "action": {"type": "selectCountry", "code": "JP"}}),
    )
    .await;

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["state"]["filters"]["search"], "trek");
    assert_eq!(frame["state"]["selection"]["activeCountry"], "JP");
}

#[rstest]
#[actix_rt::test]
async fn search_frames_return_highlighted_hits(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    send_json(&mut socket, json!({"type": "search", "query": " JA "})).await;

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["type"], "searchResults");
    assert_eq!(frame["query"], "JA");
    assert_eq!(frame["results"][0]["highlighted"], "<mark>Ja</mark>pan");
}

#[rstest]
#[actix_rt::test]
async fn rejected_actions_report_errors_and_keep_the_session(
    #[future] ws_client: (Socket, ServerHandle),
) {
    let (mut socket, _server) = ws_client.await;
    send_json(
        &mut socket,
        json!({"type": "action", "action": {"type": "selectCountry", "code": "FR"}}),
    )
    .await;

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["type"], "error");
    assert_eq!(frame["error"]["code"], "not_found");
    assert!(frame["error"]["traceId"].is_string());

    send_json(
        &mut socket,
        json!({"type": "resize", "device": {"viewportWidth": 375, "viewportHeight": 812}}),
    )
    .await;
    let frame = next_json(&mut socket).await;
    assert_eq!(frame["type"], "state");
    assert!(frame["state"]["selection"]["activeCountry"].is_null());
}

#[rstest]
#[actix_rt::test]
async fn closes_on_malformed_json(#[future] ws_client: (Socket, ServerHandle)) {
    let (mut socket, _server) = ws_client.await;
    socket
        .send(awc::ws::Message::Text("not-json".into()))
        .await
        .expect("send text");

    loop {
        let frame = socket.next().await.expect("response frame").expect("frame");
        match frame {
            Frame::Ping(_) | Frame::Pong(_) => continue,
            Frame::Close(reason) => {
                assert_eq!(reason.expect("reason").code, CloseCode::Policy);
                break;
            }
            other => panic!("expected close frame, got {other:?}"),
        }
    }
}

#[rstest]
#[actix_rt::test]
async fn closes_after_timeout_without_client_messages(
    #[future] ws_client: (Socket, ServerHandle),
) {
    let (mut socket, _server) = ws_client.await;
    tokio::time::sleep(CLIENT_TIMEOUT + HEARTBEAT_INTERVAL * 3).await;

    let observed_close = tokio::time::timeout(Duration::from_secs(2), async {
        let mut observed = None;
        while let Some(frame) = socket.next().await {
            let frame = frame.expect("frame");
            match frame {
                Frame::Ping(_) | Frame::Pong(_) => continue,
                Frame::Close(reason) => {
                    observed = reason;
                    break;
                }
                other => panic!("unexpected frame before close: {other:?}"),
            }
        }
        observed
    })
    .await
    .expect("close frame missing within timeout")
    .expect("close frame missing after timeout");

    assert_eq!(observed_close.code, CloseCode::Normal);
    assert_eq!(
        observed_close.description.as_deref(),
        Some("heartbeat timeout")
    );
}

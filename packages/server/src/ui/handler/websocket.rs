//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Dispatch one inbound text frame. Malformed frames are dropped.
async fn dispatch(state: &AppState, client_id: &ConnectionId, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Shoot { cell_index }) => {
            state.shoot_usecase.execute(client_id, cell_index).await;
        }
        Ok(ClientMessage::Leave) => {
            state.leave_game_usecase.execute(client_id).await;
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", client_id, e);
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client_id = ConnectionIdFactory::generate();
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // 送信タスクを先に起動し、接続直後の matched も取りこぼさない
    let mut send_task = pusher_loop(rx, sender);

    match state
        .connect_participant_usecase
        .execute(client_id.clone(), tx)
        .await
    {
        Ok(_) => tracing::info!("Client '{}' connected", client_id),
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            send_task.abort();
            return;
        }
    }

    let state_clone = state.clone();
    let client_id_clone = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error from '{}': {}", client_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", client_id_clone, text.as_str());
                    dispatch(&state_clone, &client_id_clone, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from '{}'", client_id_clone);
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", client_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_participant_usecase
        .execute(&client_id)
        .await;
    tracing::info!("Client '{}' disconnected", client_id);
}

use crate::AppState;

use mh_hub::{Client, WebSocketConnection};

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use log::{debug, error};

/// GET /ws - upgrade and hand the socket to the hub
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.max_message_size(state.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run a dashboard connection until both of its loops have exited
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection = WebSocketConnection::new(socket);
    let tasks = Client::accept(connection, state.hub, state.config, state.metrics).await;
    let client_id = tasks.client_id();
    debug!("Dashboard {client_id} attached");

    if let Err(e) = tasks.join().await {
        error!("Dashboard {client_id} task failed: {e}");
    }
}

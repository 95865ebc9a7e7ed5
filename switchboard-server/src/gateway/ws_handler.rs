use crate::gateway::GatewayService;
use crate::relay::RelayCommand;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use switchboard_core::{ClientMessage, ConnectionId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<GatewayService>,
) -> impl IntoResponse {
    // The gateway owns identity: ids are assigned here, never by the client.
    let connection_id = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, service))
}

async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, service: GatewayService) {
    info!("New WebSocket connection: {}", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(connection_id.clone(), tx);

    let connect = RelayCommand::Connect {
        connection_id: connection_id.clone(),
    };
    if service.relay_tx.send(connect).await.is_err() {
        error!("Relay is gone, refusing connection {}", connection_id);
        service.remove_connection(&connection_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let connection_id = connection_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            let cmd = into_command(connection_id.clone(), client_msg);
                            if service.relay_tx.send(cmd).await.is_err() {
                                error!("Relay is gone, closing {}", connection_id);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid message from {}: {}", connection_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Tear down in this order: the connection leaves the gateway map first,
    // then the relay processes exactly one disconnect for it.
    service.remove_connection(&connection_id);
    let _ = service
        .relay_tx
        .send(RelayCommand::Disconnect {
            connection_id: connection_id.clone(),
        })
        .await;

    info!("WebSocket disconnected: {}", connection_id);
}

fn into_command(connection_id: ConnectionId, msg: ClientMessage) -> RelayCommand {
    match msg {
        ClientMessage::SetName { name } => RelayCommand::SetName {
            connection_id,
            name,
        },
        ClientMessage::Chat { text } => RelayCommand::Chat {
            connection_id,
            text,
        },
        ClientMessage::Typing { user } => RelayCommand::Typing {
            connection_id,
            user,
        },
        ClientMessage::Signal { envelope } => RelayCommand::Signal {
            connection_id,
            envelope,
        },
    }
}

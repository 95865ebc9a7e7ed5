use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{RELAY_TIMEOUT_MS, join, wait_for_deliveries};
use switchboard_core::ServerMessage;
use switchboard_server::SignalScope;

#[tokio::test]
async fn test_announcement_is_echoed_to_the_sender_only() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay(SignalScope::Broadcast);

    let a = join(&cmd_tx, "alice").await;
    wait_for_deliveries(&sink, 2, RELAY_TIMEOUT_MS).await;

    assert_eq!(
        sink.directed_to(&a).await,
        vec![ServerMessage::NameAck { name: "alice".into() }]
    );
}

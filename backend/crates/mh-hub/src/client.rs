use crate::{
    ClientHandle, ClientId, ClientState, Connection, ConnectionConfig, FrameReader, FrameWriter,
    Hub, HubMetrics, Result as HubErrorResult,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Pairs one connection with a private outbound queue and two loops:
/// an inbound loop that reads until the peer goes away, and an outbound
/// loop that drains the queue to the connection.
pub struct Client<C: Connection> {
    client_id: ClientId,
    connection: C,
    hub: Hub,
    config: ConnectionConfig,
    metrics: HubMetrics,
}

impl<C: Connection> Client<C> {
    pub fn new(connection: C, hub: Hub, config: ConnectionConfig, metrics: HubMetrics) -> Self {
        Self {
            client_id: ClientId::new(),
            connection,
            hub,
            config,
            metrics,
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Register with the hub and start both loops
    pub async fn start(self) -> ClientTasks {
        let client_id = self.client_id;
        let (state_tx, state_rx) = watch::channel(ClientState::Registering);

        let capacity = self.config.send_buffer_size.max(1);
        if self.config.send_buffer_size == 0 {
            warn!("Client {client_id}: send buffer size 0 is not usable, using 1");
        }

        // The hub keeps the only sender; this client only ever consumes
        let (mut handle, queue) = ClientHandle::with_queue(client_id, capacity);
        let released = handle.release_notice();
        self.hub.register(handle).await;

        self.metrics.connection_established();
        state_tx.send_replace(ClientState::Active);
        info!("Client {client_id} connected");

        let (reader, writer) = self.connection.split();
        let (closed_tx, closed_rx) = watch::channel(false);
        let lifecycle = Arc::new(Lifecycle {
            client_id,
            state: state_tx,
            closed: closed_tx,
            running_loops: AtomicUsize::new(2),
            metrics: self.metrics.clone(),
        });

        let inbound = tokio::spawn(run_inbound(
            reader,
            closed_rx,
            self.hub,
            self.config.relay_inbound,
            Arc::clone(&lifecycle),
            self.metrics.clone(),
        ));
        let outbound = tokio::spawn(run_outbound(
            writer,
            queue,
            released,
            lifecycle,
            self.metrics,
        ));

        ClientTasks {
            client_id,
            state: state_rx,
            inbound,
            outbound,
        }
    }

    /// Convenience for the connection-acceptance layer: build and start a client
    pub async fn accept(
        connection: C,
        hub: Hub,
        config: ConnectionConfig,
        metrics: HubMetrics,
    ) -> ClientTasks {
        Self::new(connection, hub, config, metrics).start().await
    }
}

/// Handles to a running client's loops
pub struct ClientTasks {
    client_id: ClientId,
    state: watch::Receiver<ClientState>,
    inbound: JoinHandle<()>,
    outbound: JoinHandle<()>,
}

impl ClientTasks {
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn state(&self) -> ClientState {
        *self.state.borrow()
    }

    /// Wait until the client reaches `Closed`
    pub async fn closed(&mut self) {
        let _ = self
            .state
            .wait_for(|state| *state == ClientState::Closed)
            .await;
    }

    /// Wait for both loops to exit
    pub async fn join(self) -> HubErrorResult<()> {
        let inbound = self.inbound.await;
        let outbound = self.outbound.await;
        inbound?;
        outbound?;
        Ok(())
    }
}

/// Shared teardown bookkeeping for the two loops of one client
struct Lifecycle {
    client_id: ClientId,
    state: watch::Sender<ClientState>,
    /// Raised once the connection is closed; wakes a pending read
    closed: watch::Sender<bool>,
    running_loops: AtomicUsize,
    metrics: HubMetrics,
}

impl Lifecycle {
    fn begin_teardown(&self) {
        self.state.send_if_modified(|state| {
            if *state == ClientState::Active {
                *state = ClientState::Draining;
                true
            } else {
                false
            }
        });
    }

    fn close_connection(&self) {
        self.closed.send_replace(true);
    }

    fn loop_exited(&self) {
        if self.running_loops.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.state.send_replace(ClientState::Closed);
            self.metrics.connection_closed();
            info!("Client {} closed", self.client_id);
        }
    }
}

/// Reads until error, end of stream, or a local close. Always leaves by
/// unregistering and closing the connection.
async fn run_inbound<R: FrameReader>(
    mut reader: R,
    mut closed: watch::Receiver<bool>,
    hub: Hub,
    relay: bool,
    lifecycle: Arc<Lifecycle>,
    metrics: HubMetrics,
) {
    let client_id = lifecycle.client_id;

    loop {
        let frame = tokio::select! {
            frame = reader.read_frame() => frame,
            _ = closed.changed() => {
                debug!("Connection for client {client_id} closed locally, stopping reader");
                break;
            }
        };

        match frame {
            Some(Ok(payload)) => {
                metrics.frame_received();
                if relay {
                    hub.broadcast(payload).await;
                } else {
                    debug!(
                        "Discarding {} byte frame from client {client_id}",
                        payload.len()
                    );
                }
            }
            Some(Err(e)) => {
                warn!("Read failed for client {client_id}: {e}");
                metrics.error_occurred(e.error_type());
                break;
            }
            None => {
                info!("Client {client_id} closed the connection");
                break;
            }
        }
    }

    lifecycle.begin_teardown();
    hub.unregister(client_id).await;
    lifecycle.close_connection();
    lifecycle.loop_exited();
}

/// Drains the queue to the connection. Ends when the hub closes the queue
/// (after flushing what was already buffered) or when a write fails.
/// The client is `Draining` from the moment the hub releases the queue.
async fn run_outbound<W: FrameWriter>(
    mut writer: W,
    mut queue: mpsc::Receiver<Bytes>,
    mut released: oneshot::Receiver<()>,
    lifecycle: Arc<Lifecycle>,
    metrics: HubMetrics,
) {
    let client_id = lifecycle.client_id;
    let mut write_failed = false;
    let mut draining = false;

    while let Some(payload) = queue.recv().await {
        let write = writer.write_frame(payload);
        tokio::pin!(write);

        // A write to a stalled peer can block for a long time
        let result = loop {
            tokio::select! {
                biased;
                _ = &mut released, if !draining => {
                    draining = true;
                    debug!("Client {client_id} released by the hub, flushing buffered frames");
                    lifecycle.begin_teardown();
                }
                result = &mut write => break result,
            }
        };

        if let Err(e) = result {
            warn!("Write failed for client {client_id}: {e}");
            metrics.error_occurred(e.error_type());
            write_failed = true;
            break;
        }
        metrics.frame_sent();
    }

    // The hub removes this client on its next enqueue attempt, or when the
    // reader unregisters after the close below.
    drop(queue);

    if !write_failed {
        debug!("Outbound queue for client {client_id} closed");
    }

    lifecycle.begin_teardown();
    writer.close().await;
    lifecycle.close_connection();
    lifecycle.loop_exited();
}

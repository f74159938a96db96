//! The broadcast hub.
//!
//! A single control loop task owns the membership set. Every operation is a
//! [`HubCommand`] sent through one FIFO inlet, so mutations are strictly
//! sequenced in submission order and the set needs no lock. Fan-out uses a
//! non-blocking enqueue per member; a member whose queue is full (or whose
//! consumer is gone) is evicted on the spot.

use crate::{
    BroadcastConfig, ClientHandle, ClientId, HubCommand, HubMetrics, ShutdownGuard,
};

use std::collections::HashMap;

use bytes::Bytes;
use log::{debug, info, warn};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Cheap-clone handle to the hub control loop.
///
/// None of the operations return an error: once the loop has stopped
/// (process shutdown) commands are dropped with a warning.
#[derive(Clone)]
pub struct Hub {
    commands: mpsc::Sender<HubCommand>,
}

impl Hub {
    /// Start the control loop. It runs until shutdown is signalled or every
    /// `Hub` handle has been dropped.
    pub fn spawn(
        config: BroadcastConfig,
        metrics: HubMetrics,
        shutdown: ShutdownGuard,
    ) -> (Self, JoinHandle<()>) {
        let (commands, inlet) = mpsc::channel(config.command_buffer_size);

        let control_loop = ControlLoop {
            members: HashMap::new(),
            inlet,
            metrics,
            shutdown,
        };
        let task = tokio::spawn(control_loop.run());

        (Self { commands }, task)
    }

    /// Admit a client into the membership set
    pub async fn register(&self, handle: ClientHandle) {
        self.submit(HubCommand::Register(handle)).await;
    }

    /// Remove a client and close its queue. No-op for non-members.
    pub async fn unregister(&self, client_id: ClientId) {
        self.submit(HubCommand::Unregister(client_id)).await;
    }

    /// Best-effort fan-out of an opaque payload to every current member
    pub async fn broadcast(&self, payload: impl Into<Bytes>) {
        self.submit(HubCommand::Broadcast(payload.into())).await;
    }

    /// Number of members once every previously submitted command is applied.
    /// Returns 0 if the hub has stopped.
    pub async fn client_count(&self) -> usize {
        let (reply, response) = oneshot::channel();
        self.submit(HubCommand::ClientCount(reply)).await;
        response.await.unwrap_or(0)
    }

    /// Whether `client_id` is a member once every previously submitted
    /// command is applied
    pub async fn contains(&self, client_id: ClientId) -> bool {
        let (reply, response) = oneshot::channel();
        self.submit(HubCommand::Contains(client_id, reply)).await;
        response.await.unwrap_or(false)
    }

    async fn submit(&self, command: HubCommand) {
        if let Err(mpsc::error::SendError(command)) = self.commands.send(command).await {
            warn!("Hub is not running, dropped {} command", command.kind());
        }
    }
}

/// State owned exclusively by the control loop task
struct ControlLoop {
    members: HashMap<ClientId, ClientHandle>,
    inlet: mpsc::Receiver<HubCommand>,
    metrics: HubMetrics,
    shutdown: ShutdownGuard,
}

impl ControlLoop {
    async fn run(mut self) {
        info!("Hub control loop started");

        loop {
            let next = tokio::select! {
                command = self.inlet.recv() => command,
                _ = self.shutdown.wait() => {
                    info!("Shutting down hub control loop");
                    break;
                }
            };

            match next {
                Some(command) => self.handle(command),
                None => {
                    info!("All hub handles dropped, stopping control loop");
                    break;
                }
            }
        }

        // Dropping the handles closes every outbound queue; clients flush
        // and close their connections on their own.
        let remaining = self.members.len();
        self.members.clear();
        info!("Hub control loop stopped, closed {remaining} client queues");
    }

    fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(handle) => self.register(handle),
            HubCommand::Unregister(client_id) => self.unregister(client_id),
            HubCommand::Broadcast(payload) => self.broadcast(payload),
            HubCommand::ClientCount(reply) => {
                let _ = reply.send(self.members.len());
            }
            HubCommand::Contains(client_id, reply) => {
                let _ = reply.send(self.members.contains_key(&client_id));
            }
        }
    }

    fn register(&mut self, handle: ClientHandle) {
        let client_id = handle.client_id();

        if self.members.contains_key(&client_id) {
            // The duplicate handle is dropped here, closing its queue
            warn!("Client {client_id} is already registered, ignoring duplicate");
            return;
        }

        self.members.insert(client_id, handle);
        self.metrics.client_registered(self.members.len());
        info!(
            "Registered client {client_id} ({} total)",
            self.members.len()
        );
    }

    fn unregister(&mut self, client_id: ClientId) {
        match self.members.remove(&client_id) {
            Some(handle) => {
                drop(handle);
                self.metrics.client_unregistered(self.members.len());
                info!(
                    "Unregistered client {client_id} ({} remaining)",
                    self.members.len()
                );
            }
            None => debug!("Client {client_id} is not a member, unregister ignored"),
        }
    }

    fn broadcast(&mut self, payload: Bytes) {
        let mut delivered = 0;
        let mut evicted = Vec::new();

        self.members.retain(|client_id, handle| {
            match handle.try_enqueue(payload.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    info!("Client {client_id} outbound queue is full, evicting slow consumer");
                    evicted.push("queue_full");
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    info!("Client {client_id} stopped consuming, evicting");
                    evicted.push("consumer_gone");
                    false
                }
            }
        });

        for reason in evicted {
            self.metrics.client_evicted(reason, self.members.len());
        }
        self.metrics.broadcast_published(delivered);

        debug!(
            "Broadcast {} bytes to {delivered} clients ({} members)",
            payload.len(),
            self.members.len()
        );
    }
}

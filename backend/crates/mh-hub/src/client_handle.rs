use crate::ClientId;

use bytes::Bytes;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

/// The hub's view of one member: its identity plus the only producer end of
/// its bounded outbound queue.
///
/// Not `Clone`: dropping the handle is the single, terminal close of the
/// queue, so a client's queue cannot be closed twice.
pub struct ClientHandle {
    client_id: ClientId,
    sender: mpsc::Sender<Bytes>,
    /// Dropped together with the handle; the receiver learns the queue closed
    _release: Option<oneshot::Sender<()>>,
}

impl ClientHandle {
    pub fn new(client_id: ClientId, sender: mpsc::Sender<Bytes>) -> Self {
        Self {
            client_id,
            sender,
            _release: None,
        }
    }

    /// Create a handle together with the consuming end of a fresh queue.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_queue(client_id: ClientId, capacity: usize) -> (Self, mpsc::Receiver<Bytes>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(client_id, sender), receiver)
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Resolves (with an error) once the hub drops this handle, even while
    /// the consumer is busy and not polling its queue
    pub(crate) fn release_notice(&mut self) -> oneshot::Receiver<()> {
        let (release, notice) = oneshot::channel();
        self._release = Some(release);
        notice
    }

    /// Non-blocking enqueue
    pub(crate) fn try_enqueue(&self, payload: Bytes) -> Result<(), TrySendError<Bytes>> {
        self.sender.try_send(payload)
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientHandle")
            .field("client_id", &self.client_id)
            .field("capacity", &self.sender.max_capacity())
            .field("available", &self.sender.capacity())
            .finish()
    }
}

#![allow(dead_code)]

use mh_hub::{Connection, FrameReader, FrameWriter, HubError, Result as HubErrorResult};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

/// In-process connection driven by a [`MemoryPeer`]
pub struct MemoryConnection {
    incoming: mpsc::UnboundedReceiver<HubErrorResult<Bytes>>,
    outgoing: mpsc::Sender<Bytes>,
    closed: Arc<AtomicBool>,
}

/// The remote end of a [`MemoryConnection`]
pub struct MemoryPeer {
    incoming: Option<mpsc::UnboundedSender<HubErrorResult<Bytes>>>,
    outgoing: mpsc::Receiver<Bytes>,
    closed: Arc<AtomicBool>,
}

/// Create a connected pair. `write_capacity` bounds how many frames the
/// client can write before the peer has to read.
pub fn memory_pair(write_capacity: usize) -> (MemoryConnection, MemoryPeer) {
    let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();
    let (outgoing_tx, outgoing_rx) = mpsc::channel(write_capacity);
    let closed = Arc::new(AtomicBool::new(false));

    (
        MemoryConnection {
            incoming: incoming_rx,
            outgoing: outgoing_tx,
            closed: Arc::clone(&closed),
        },
        MemoryPeer {
            incoming: Some(incoming_tx),
            outgoing: outgoing_rx,
            closed,
        },
    )
}

impl Connection for MemoryConnection {
    type Reader = MemoryReader;
    type Writer = MemoryWriter;

    fn split(self) -> (Self::Reader, Self::Writer) {
        (
            MemoryReader {
                incoming: self.incoming,
            },
            MemoryWriter {
                outgoing: self.outgoing,
                closed: self.closed,
            },
        )
    }
}

pub struct MemoryReader {
    incoming: mpsc::UnboundedReceiver<HubErrorResult<Bytes>>,
}

#[async_trait]
impl FrameReader for MemoryReader {
    async fn read_frame(&mut self) -> Option<HubErrorResult<Bytes>> {
        self.incoming.recv().await
    }
}

pub struct MemoryWriter {
    outgoing: mpsc::Sender<Bytes>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl FrameWriter for MemoryWriter {
    async fn write_frame(&mut self, payload: Bytes) -> HubErrorResult<()> {
        self.outgoing
            .send(payload)
            .await
            .map_err(|_| HubError::connection_closed("peer stopped reading"))
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl MemoryPeer {
    /// Send a data frame to the client
    pub fn send_frame(&self, payload: impl Into<Bytes>) {
        if let Some(incoming) = &self.incoming {
            let _ = incoming.send(Ok(payload.into()));
        }
    }

    /// Make the client's next read fail
    pub fn fail_read(&self) {
        if let Some(incoming) = &self.incoming {
            let _ = incoming.send(Err(HubError::transport("connection reset by peer")));
        }
    }

    /// End of stream for the client's reader
    pub fn hang_up(&mut self) {
        self.incoming = None;
    }

    /// Make every further write from the client fail
    pub fn stop_reading(&mut self) {
        self.outgoing.close();
    }

    /// Receive the next frame written by the client, if one arrives in time
    pub async fn receive(&mut self) -> Option<Bytes> {
        timeout(Duration::from_secs(2), self.outgoing.recv())
            .await
            .ok()
            .flatten()
    }

    /// Like `receive`, but with a short wait for asserting silence
    pub async fn receive_quietly(&mut self) -> Option<Bytes> {
        timeout(Duration::from_millis(100), self.outgoing.recv())
            .await
            .ok()
            .flatten()
    }

    /// Whether the client closed the connection
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

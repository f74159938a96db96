//! Transport seam between clients and whatever carries their frames.
//!
//! The hub never builds or inspects a connection; a client adapter splits it
//! once and hands each half to one of its two loops.

use crate::Result as HubErrorResult;

use async_trait::async_trait;
use bytes::Bytes;

/// A full-duplex frame stream belonging to exactly one client.
pub trait Connection: Send + 'static {
    type Reader: FrameReader;
    type Writer: FrameWriter;

    fn split(self) -> (Self::Reader, Self::Writer);
}

#[async_trait]
pub trait FrameReader: Send + 'static {
    /// Wait for the next data frame.
    ///
    /// Returns `None` at end of stream and `Some(Err(_))` on a transport
    /// failure. Must be cancel safe: the reader loop drops a pending call
    /// when the connection is closed locally.
    async fn read_frame(&mut self) -> Option<HubErrorResult<Bytes>>;
}

#[async_trait]
pub trait FrameWriter: Send + 'static {
    /// Write one payload, waiting as long as the transport needs.
    async fn write_frame(&mut self, payload: Bytes) -> HubErrorResult<()>;

    /// Close the connection. Safe to call after a failed write.
    async fn close(&mut self);
}

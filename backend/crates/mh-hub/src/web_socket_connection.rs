use crate::{Connection, FrameReader, FrameWriter, HubError, Result as HubErrorResult};

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use log::debug;

/// [`Connection`] over an upgraded axum WebSocket.
///
/// Payloads go out as binary frames. Text and binary frames from the peer
/// are data; ping/pong are answered by the transport and skipped here.
pub struct WebSocketConnection {
    socket: WebSocket,
}

impl WebSocketConnection {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl Connection for WebSocketConnection {
    type Reader = WebSocketReader;
    type Writer = WebSocketWriter;

    fn split(self) -> (Self::Reader, Self::Writer) {
        let (sink, stream) = self.socket.split();
        (
            WebSocketReader { stream },
            WebSocketWriter { sink, closed: false },
        )
    }
}

pub struct WebSocketReader {
    stream: SplitStream<WebSocket>,
}

#[async_trait]
impl FrameReader for WebSocketReader {
    async fn read_frame(&mut self) -> Option<HubErrorResult<Bytes>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Binary(data)) => return Some(Ok(data)),
                Ok(Message::Text(text)) => {
                    return Some(Ok(Bytes::copy_from_slice(text.as_str().as_bytes())));
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                Ok(Message::Close(frame)) => {
                    debug!("Received close frame: {:?}", frame);
                    return None;
                }
                Err(e) => return Some(Err(HubError::from(e))),
            }
        }
    }
}

pub struct WebSocketWriter {
    sink: SplitSink<WebSocket, Message>,
    closed: bool,
}

#[async_trait]
impl FrameWriter for WebSocketWriter {
    async fn write_frame(&mut self, payload: Bytes) -> HubErrorResult<()> {
        if self.closed {
            return Err(HubError::connection_closed("writer already closed"));
        }
        self.sink.send(Message::Binary(payload)).await?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.sink.close().await {
            debug!("WebSocket close did not complete cleanly: {e}");
        }
    }
}

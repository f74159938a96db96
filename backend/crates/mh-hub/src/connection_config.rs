/// Per-client settings
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue capacity (bounded; a full queue gets the client evicted)
    pub send_buffer_size: usize,
    /// Re-broadcast frames received from the client instead of discarding them
    pub relay_inbound: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 256,
            relay_inbound: false,
        }
    }
}

use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Per-client outbound queue capacity
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10_000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 256;

// Hub command inlet capacity
pub const MIN_COMMAND_BUFFER_SIZE: usize = 1;
pub const MAX_COMMAND_BUFFER_SIZE: usize = 100_000;
pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 1024;

// Largest inbound WebSocket message accepted (bytes)
pub const MIN_MAX_MESSAGE_SIZE: usize = 1024;
pub const MAX_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Broadcast hub settings.
/// All values validated to be within reasonable operational ranges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Capacity of each client's outbound queue. A client whose queue is
    /// full at broadcast time is evicted.
    pub send_buffer_size: usize,
    /// Capacity of the hub's command inlet
    pub command_buffer_size: usize,
    /// Maximum inbound message size in bytes
    pub max_message_size: usize,
    /// Re-broadcast frames received from clients
    pub relay_inbound: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            command_buffer_size: DEFAULT_COMMAND_BUFFER_SIZE,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            relay_inbound: false,
        }
    }
}

impl HubConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::hub(format!(
                "hub.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.command_buffer_size < MIN_COMMAND_BUFFER_SIZE
            || self.command_buffer_size > MAX_COMMAND_BUFFER_SIZE
        {
            return Err(ConfigError::hub(format!(
                "hub.command_buffer_size must be {}-{}, got {}",
                MIN_COMMAND_BUFFER_SIZE, MAX_COMMAND_BUFFER_SIZE, self.command_buffer_size
            )));
        }

        if self.max_message_size < MIN_MAX_MESSAGE_SIZE
            || self.max_message_size > MAX_MAX_MESSAGE_SIZE
        {
            return Err(ConfigError::hub(format!(
                "hub.max_message_size must be {}-{}, got {}",
                MIN_MAX_MESSAGE_SIZE, MAX_MAX_MESSAGE_SIZE, self.max_message_size
            )));
        }

        Ok(())
    }
}

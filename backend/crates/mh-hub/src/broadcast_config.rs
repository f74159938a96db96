/// Configuration for the hub control loop
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Capacity of the command inlet shared by register/unregister/broadcast
    pub command_buffer_size: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 1024,
        }
    }
}

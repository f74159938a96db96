/// Lifecycle of a client adapter. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Constructed, not yet admitted by the hub
    Registering,
    /// Admitted, both loops running
    Active,
    /// One loop has started tearing down; remaining buffered payloads are flushed
    Draining,
    /// Both loops exited and the connection is closed
    Closed,
}

impl std::fmt::Display for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Registering => "registering",
            Self::Active => "active",
            Self::Draining => "draining",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

use metrics::{counter, gauge};

/// Metrics collector for hub and client operations
#[derive(Clone)]
pub struct HubMetrics {
    prefix: &'static str,
}

impl HubMetrics {
    pub fn new() -> Self {
        Self { prefix: "mh_hub" }
    }

    /// Record a client connection opened
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record a client connection fully closed
    pub fn connection_closed(&self) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    pub fn client_registered(&self, members: usize) {
        counter!(format!("{}.members.registered", self.prefix)).increment(1);
        gauge!(format!("{}.members", self.prefix)).set(members as f64);
    }

    pub fn client_unregistered(&self, members: usize) {
        counter!(format!("{}.members.unregistered", self.prefix)).increment(1);
        gauge!(format!("{}.members", self.prefix)).set(members as f64);
    }

    /// Record a slow or dead consumer removed during fan-out
    pub fn client_evicted(&self, reason: &str, members: usize) {
        counter!(format!("{}.members.evicted", self.prefix)).increment(1);
        counter!(format!("{}.members.evicted.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.members", self.prefix)).set(members as f64);
    }

    /// Record one broadcast fan-out
    pub fn broadcast_published(&self, delivered: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.delivered", self.prefix)).increment(delivered as u64);
    }

    /// Record frame received from a client
    pub fn frame_received(&self) {
        counter!(format!("{}.frames.received", self.prefix)).increment(1);
    }

    /// Record frame written to a client
    pub fn frame_sent(&self) {
        counter!(format!("{}.frames.sent", self.prefix)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for HubMetrics {
    fn default() -> Self {
        Self::new()
    }
}

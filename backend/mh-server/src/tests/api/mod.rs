mod error;
mod metrics;

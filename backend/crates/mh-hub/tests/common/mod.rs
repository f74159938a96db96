#![allow(unused_imports)]

pub(crate) mod memory_connection;
pub(crate) mod test_hub;

pub use memory_connection::*;
pub use test_hub::*;

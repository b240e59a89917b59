//! Data structures for MRT records, BGP messages, and network types.
pub mod bgp;
pub mod mrt;
pub mod network;

pub use bgp::*;
pub use mrt::*;
pub use network::*;

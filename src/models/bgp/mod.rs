//! BGP message and path-attribute structs.
mod aspath;
mod attributes;
mod capabilities;
mod community;
mod error;
mod messages;

pub use aspath::*;
pub use attributes::*;
pub use capabilities::*;
pub use community::*;
pub use error::*;
pub use messages::*;

//! Operator API models

mod server_drives;
mod summary;

pub use server_drives::*;
pub use summary::*;

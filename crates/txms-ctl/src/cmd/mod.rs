//! CLI command modules.

pub mod codec;
pub mod http;
pub mod send;
pub mod status;

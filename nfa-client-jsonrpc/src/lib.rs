//! EIP-1193 JSON-RPC wallet for the NFA factory client

pub mod api;
#[cfg(feature = "clap")]
pub mod clap;
pub mod client;
pub mod error;

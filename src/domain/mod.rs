// Domain layer (business entities + pure services)
// Pure Rust, shared by the WASM client and the server

pub mod defaults;
pub mod models;
pub mod services;

//! Library crate root re-exporting the Bybit client, server and tool modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod bybit;
pub mod cli;
pub mod server;
pub mod tools;

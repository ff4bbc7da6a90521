// Crate root library declaration and module exports.
pub mod client;
pub mod config;
pub mod context;
pub mod model;
pub mod router;
pub mod session;
pub mod storage;
pub mod views;

#[cfg(feature = "tui")]
pub mod tui;

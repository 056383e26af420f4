pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod export;
pub mod handlers;
pub mod loader;
pub mod session;
pub mod shuffle;
pub mod state;
#[cfg(test)]
pub mod testing;

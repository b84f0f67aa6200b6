pub mod account;
pub mod board;
pub mod config;
pub mod sync;
pub mod utils;

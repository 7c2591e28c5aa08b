pub mod barrier;
pub mod config;
pub mod direction;
pub mod message;

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod history;
pub mod message;

pub mod alert;
pub mod app;
pub mod audit;
pub mod error_log;
pub mod message_log;
pub mod party;
pub mod pmode;
pub mod truststore;
pub mod users;

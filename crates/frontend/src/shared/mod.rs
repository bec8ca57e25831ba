pub mod api_utils;
pub mod busy;
pub mod config;
pub mod dom;
pub mod error;
pub mod modal;
pub mod notify;

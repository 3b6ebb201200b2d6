pub mod api;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod payment;
pub mod session;
pub mod ui;

pub use error::{Error, Result};

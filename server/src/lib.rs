pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod moderation;
pub mod routes;
pub mod service;

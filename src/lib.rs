pub mod config;
pub mod error;
pub mod message;
pub mod prompt;
pub mod routes;
pub mod services;
pub mod site;
pub mod state;

//! Terminal client for a dog-adoption search service: log in, filter dogs by
//! breed and location, keep favorites and ask the service for a match.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod listing;
pub mod location;
pub mod login;
pub mod models;
pub mod session;
pub mod shell;
pub mod ui;

//! Domain models for the server.

pub mod user;

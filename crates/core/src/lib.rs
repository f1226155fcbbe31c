//! Lunnar Core - Shared types and catalog engine.
//!
//! This crate provides what every Lunnar component agrees on:
//! - `server` - REST API persisting listings and users
//! - `client` - Buyer/seller application state with local fallback storage
//! - `cli` - Terminal front-end, migrations and demo data
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. The optional `postgres` feature adds
//! `sqlx` encodings for the types the server stores.
//!
//! # Modules
//!
//! - [`types`] - Ids, emails, prices, listing enums and the listing record
//! - [`catalog`] - Filtering, sorting, model groups and store merging
//! - [`favorites`] - The favorite-listing set
//! - [`validation`] - Username, email and password rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod favorites;
pub mod types;
pub mod validation;

pub use favorites::FavoriteSet;
pub use types::*;
pub use validation::CredentialError;

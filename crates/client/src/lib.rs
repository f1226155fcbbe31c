//! Lunnar Client - Buyer, seller and moderator workflows.
//!
//! Talks to the Lunnar REST API and keeps a local JSON store so that every
//! workflow still works when the server is unreachable:
//! - listings that fail to upload are kept locally and merged into views
//! - favorites are stored locally and pushed to the server when signed in
//! - accounts can be registered and used entirely on this device
//!
//! # Modules
//!
//! - [`app`] - The [`Marketplace`](app::Marketplace) application state
//! - [`api`] - REST client
//! - [`catalog`] - Remote/local catalog assembly
//! - [`storage`] - Local JSON store
//! - [`accounts`] - Registration, login and password reset with codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accounts;
pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod format;
pub mod moderation;
pub mod session;
pub mod storage;
pub mod submission;

#[cfg(test)]
mod testing;

pub use app::{Marketplace, Profile};
pub use config::ClientConfig;

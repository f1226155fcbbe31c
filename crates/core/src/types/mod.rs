//! Core types for Lunnar.
//!
//! Type-safe wrappers for ids, emails and prices, plus the listing record and
//! its enumerated attributes.

pub mod email;
pub mod id;
pub mod listing;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use listing::{Listing, ListingError, NewListing};
pub use price::{Price, group_thousands};
pub use status::*;

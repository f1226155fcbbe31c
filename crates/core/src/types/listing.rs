//! Car listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FuelType, ListingId, ModerationStatus, Price, Transmission, UserId};

/// Earliest model year accepted for a new listing.
pub const MIN_YEAR: i32 = 1900;

/// Errors raised when a submitted listing is incomplete or out of range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A required text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// No images were attached.
    #[error("at least one image is required")]
    NoImages,
    /// A numeric field is outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

/// A car for sale.
///
/// The JSON shape uses the short field names `km`, `hp` and `ccm`, which the
/// REST API and the local store share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "km")]
    pub odometer_km: i32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    #[serde(rename = "hp")]
    pub horsepower: i32,
    /// Engine displacement in cm³; absent for electric cars.
    #[serde(rename = "ccm", default, skip_serializing_if = "Option::is_none")]
    pub displacement_ccm: Option<i32>,
    pub price: Price,
    pub city: String,
    /// Image references, primary first. Either URLs or `data:` URLs.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Seller contact address shown on the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
}

impl Listing {
    /// The primary image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the listing belongs to the given user, by id or by email.
    ///
    /// Locally stored listings may only carry the owner's email, so either
    /// reference is enough.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId, email: &str) -> bool {
        self.owner_id.as_ref() == Some(user_id)
            || self
                .owner_email
                .as_deref()
                .is_some_and(|owner| owner.eq_ignore_ascii_case(email.trim()))
    }

    /// Display title, e.g. `BMW 320d`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// The fields a seller fills in when submitting a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "km")]
    pub odometer_km: i32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    #[serde(rename = "hp")]
    pub horsepower: i32,
    #[serde(rename = "ccm", default)]
    pub displacement_ccm: Option<i32>,
    pub price: Price,
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewListing {
    /// Check required fields and numeric ranges.
    ///
    /// `current_year` bounds the model year (next year's models are allowed).
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self, current_year: i32) -> Result<(), ListingError> {
        if self.brand.trim().is_empty() {
            return Err(ListingError::MissingField("brand"));
        }
        if self.model.trim().is_empty() {
            return Err(ListingError::MissingField("model"));
        }
        if self.city.trim().is_empty() {
            return Err(ListingError::MissingField("city"));
        }
        if self.images.is_empty() {
            return Err(ListingError::NoImages);
        }
        check_range("year", self.year.into(), MIN_YEAR.into(), (current_year + 1).into())?;
        check_range("km", self.odometer_km.into(), 0, 5_000_000)?;
        check_range("hp", self.horsepower.into(), 1, 2_000)?;
        check_range("price", self.price.forints(), 1, 10_000_000_000)?;
        if let Some(ccm) = self.displacement_ccm {
            check_range("ccm", ccm.into(), 0, 20_000)?;
        }
        Ok(())
    }

    /// Build a full listing from this submission.
    ///
    /// Displacement is dropped for electric cars and blank contact fields
    /// become `None`.
    #[must_use]
    pub fn into_listing(
        self,
        id: ListingId,
        status: ModerationStatus,
        created_at: DateTime<Utc>,
        owner_id: Option<UserId>,
        owner_email: Option<String>,
    ) -> Listing {
        let displacement_ccm = if self.fuel.has_displacement() {
            self.displacement_ccm.filter(|ccm| *ccm > 0)
        } else {
            None
        };
        Listing {
            id,
            brand: self.brand.trim().to_owned(),
            model: self.model.trim().to_owned(),
            year: self.year,
            odometer_km: self.odometer_km,
            fuel: self.fuel,
            transmission: self.transmission,
            horsepower: self.horsepower,
            displacement_ccm,
            price: self.price,
            city: self.city.trim().to_owned(),
            images: self.images,
            description: self.description,
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            status,
            created_at,
            owner_id,
            owner_email,
        }
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ListingError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ListingError::OutOfRange { field, min, max })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

//! Listing filter criteria.
//!
//! Every criterion is optional and an unset criterion keeps every listing.
//! Numeric bounds are inclusive and parsed leniently from form text: input
//! that does not start with a number, or that parses to zero, leaves the
//! bound unset rather than raising an error.

use serde::{Deserialize, Serialize};

use super::model_group::{GROUP_SELECTOR_PREFIX, model_group};
use crate::types::{FuelType, Listing};

/// How the model criterion matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ModelSelector {
    /// Exact model name.
    Exact(String),
    /// Every model in the named group of the listing's brand.
    Group(String),
}

impl ModelSelector {
    /// Parse a selector value. `group:<name>` selects a group; blank input
    /// selects nothing.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(match value.strip_prefix(GROUP_SELECTOR_PREFIX) {
            Some(group) => Self::Group(group.to_owned()),
            None => Self::Exact(value.to_owned()),
        })
    }

    /// The selector in its option-value form.
    #[must_use]
    pub fn to_value(&self) -> String {
        match self {
            Self::Exact(model) => model.clone(),
            Self::Group(group) => format!("{GROUP_SELECTOR_PREFIX}{group}"),
        }
    }

    fn matches(&self, listing: &Listing) -> bool {
        match self {
            Self::Exact(model) => listing.model == *model,
            Self::Group(group) => model_group(&listing.brand, &listing.model) == *group,
        }
    }
}

/// An inclusive range where either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl NumericRange {
    /// Range with no bounds.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    #[must_use]
    pub const fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Range from two form inputs, see [`parse_bound`].
    #[must_use]
    pub fn parse(min: &str, max: &str) -> Self {
        Self::new(parse_bound(min), parse_bound(max))
    }

    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Parse a numeric bound from form text.
///
/// Reads an optional sign and the leading run of digits after any leading
/// whitespace, ignoring whatever follows (`"2015abc"` is 2015). Empty,
/// non-numeric and zero input yield `None`, meaning no constraint.
///
/// ```
/// use lunnar_core::catalog::parse_bound;
///
/// assert_eq!(parse_bound("2015"), Some(2015));
/// assert_eq!(parse_bound(" 300000 km"), Some(300_000));
/// assert_eq!(parse_bound("0"), None);
/// assert_eq!(parse_bound("abc"), None);
/// ```
#[must_use]
pub fn parse_bound(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..)?),
        Some(b'+') => (false, trimmed.get(1..)?),
        _ => (false, trimmed),
    };
    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude: i64 = rest.get(..digits_len)?.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    (value != 0).then_some(value)
}

/// The active filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub brand: Option<String>,
    pub model: Option<ModelSelector>,
    pub fuel: Option<FuelType>,
    pub year: NumericRange,
    pub price: NumericRange,
    pub km: NumericRange,
}

impl FilterCriteria {
    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.fuel.is_none()
            && self.year.is_unbounded()
            && self.price.is_unbounded()
            && self.km.is_unbounded()
    }

    /// Whether a listing satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.brand.as_ref().is_none_or(|brand| listing.brand == *brand)
            && self.model.as_ref().is_none_or(|model| model.matches(listing))
            && self.fuel.is_none_or(|fuel| listing.fuel == fuel)
            && self.year.contains(listing.year.into())
            && self.price.contains(listing.price.forints())
            && self.km.contains(listing.odometer_km.into())
    }
}

/// Keep the listings that satisfy `criteria`, preserving their order.
#[must_use]
pub fn filter<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .collect()
}

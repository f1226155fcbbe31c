//! Enumerated listing attributes.
//!
//! Values serialize as `snake_case` English words. Older data written by the
//! first version of the marketplace used Hungarian display labels, which are
//! still accepted when reading.

use serde::{Deserialize, Serialize};

/// Error returned when a string names none of an enum's values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Moderation state of a listing.
///
/// Only [`ModerationStatus::Approved`] listings appear in public browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "listing_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Awaiting review. Every new listing starts here.
    #[default]
    Pending,
    /// Visible to everyone.
    Approved,
    /// Hidden from the public; still visible to its owner and admins.
    Rejected,
}

impl ModerationStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the listing may be shown in public browsing.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError {
                kind: "moderation status",
                value: s.to_owned(),
            }),
        }
    }
}

/// Fuel type of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "fuel_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[serde(alias = "Benzin")]
    Petrol,
    #[serde(alias = "Dízel")]
    Diesel,
    #[serde(alias = "Elektromos")]
    Electric,
    #[serde(alias = "Hibrid")]
    Hybrid,
    #[serde(alias = "LPG")]
    Lpg,
}

impl FuelType {
    /// All fuel types in display order.
    pub const ALL: [Self; 5] = [
        Self::Petrol,
        Self::Diesel,
        Self::Electric,
        Self::Hybrid,
        Self::Lpg,
    ];

    /// Wire name of the fuel type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
            Self::Lpg => "lpg",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Electric => "Electric",
            Self::Hybrid => "Hybrid",
            Self::Lpg => "LPG",
        }
    }

    /// Electric cars have no engine displacement.
    #[must_use]
    pub const fn has_displacement(self) -> bool {
        !matches!(self, Self::Electric)
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for FuelType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "petrol" | "gasoline" | "benzin" => Ok(Self::Petrol),
            "diesel" | "dízel" | "dizel" => Ok(Self::Diesel),
            "electric" | "elektromos" => Ok(Self::Electric),
            "hybrid" | "hibrid" => Ok(Self::Hybrid),
            "lpg" => Ok(Self::Lpg),
            _ => Err(ParseEnumError {
                kind: "fuel type",
                value: s.to_owned(),
            }),
        }
    }
}

/// Gearbox type of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "transmission_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    #[serde(alias = "Manuális")]
    Manual,
    #[serde(alias = "Automata")]
    Automatic,
}

impl Transmission {
    /// All transmissions in display order.
    pub const ALL: [Self; 2] = [Self::Manual, Self::Automatic];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Automatic => "Automatic",
        }
    }
}

impl std::fmt::Display for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Transmission {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" | "manuális" | "manualis" => Ok(Self::Manual),
            "automatic" | "auto" | "automata" => Ok(Self::Automatic),
            _ => Err(ParseEnumError {
                kind: "transmission",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(ModerationStatus::default(), ModerationStatus::Pending);
        assert!(!ModerationStatus::Pending.is_public());
        assert!(ModerationStatus::Approved.is_public());
    }

    #[test]
    fn test_fuel_accepts_legacy_labels() {
        let fuel: FuelType = serde_json::from_str("\"Dízel\"").unwrap();
        assert_eq!(fuel, FuelType::Diesel);
        let fuel: FuelType = serde_json::from_str("\"LPG\"").unwrap();
        assert_eq!(fuel, FuelType::Lpg);
        assert_eq!(serde_json::to_string(&FuelType::Lpg).unwrap(), "\"lpg\"");
    }

    #[test]
    fn test_transmission_accepts_legacy_labels() {
        let t: Transmission = serde_json::from_str("\"Automata\"").unwrap();
        assert_eq!(t, Transmission::Automatic);
        assert_eq!("Manuális".parse::<Transmission>().unwrap(), Transmission::Manual);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "steam".parse::<FuelType>().unwrap_err();
        assert_eq!(err.kind, "fuel type");
        assert!("archived".parse::<ModerationStatus>().is_err());
    }

    #[test]
    fn test_electric_has_no_displacement() {
        assert!(!FuelType::Electric.has_displacement());
        assert!(FuelType::Hybrid.has_displacement());
    }
}

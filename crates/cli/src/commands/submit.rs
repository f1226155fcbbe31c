//! Listing submission.

use std::path::PathBuf;

use clap::Args;

use lunnar_client::accounts::LogMailer;
use lunnar_client::submission::{SubmissionError, SubmissionOutcome};
use lunnar_client::{ClientConfig, Marketplace};
use lunnar_core::{FuelType, NewListing, Price, Transmission};

use super::emit;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub brand: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub year: i32,
    /// Asking price in forints
    #[arg(long)]
    pub price: i64,
    /// Odometer reading
    #[arg(long)]
    pub km: i32,
    #[arg(long)]
    pub city: String,
    /// Horsepower
    #[arg(long)]
    pub hp: i32,
    /// Engine displacement in cm3, ignored for electric cars
    #[arg(long)]
    pub ccm: Option<i32>,
    #[arg(long)]
    pub fuel: FuelType,
    #[arg(long)]
    pub transmission: Transmission,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Image files to attach; at least one is required
    #[arg(long = "image", required = true)]
    pub images: Vec<PathBuf>,
}

impl SubmitArgs {
    fn into_form(self) -> (NewListing, Vec<PathBuf>) {
        let form = NewListing {
            brand: self.brand,
            model: self.model,
            year: self.year,
            odometer_km: self.km,
            fuel: self.fuel,
            transmission: self.transmission,
            horsepower: self.hp,
            displacement_ccm: self.ccm,
            price: Price::new(self.price),
            city: self.city,
            images: Vec::new(),
            description: self.description,
            phone: self.phone,
            email: self.email,
        };
        (form, self.images)
    }
}

/// Submit a listing as the signed-in user, or as a guest.
///
/// # Errors
///
/// Returns `SubmissionError` if the form is invalid or cannot be stored.
pub async fn run(config: &ClientConfig, args: SubmitArgs) -> Result<(), SubmissionError> {
    let mut app = Marketplace::open(config, LogMailer).await;
    let (form, images) = args.into_form();
    match app.submit(form, &images).await? {
        SubmissionOutcome::Uploaded(listing) => emit(&format!(
            "Listing {} submitted. It will appear once approved.",
            listing.id
        )),
        SubmissionOutcome::SavedLocally(listing) => emit(&format!(
            "Server unavailable. Listing {} saved on this device and awaiting approval.",
            listing.id
        )),
    }
    Ok(())
}

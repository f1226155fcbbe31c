//! Browsing and favorites.

use chrono::Utc;
use clap::Args;

use lunnar_client::accounts::LogMailer;
use lunnar_client::storage::StorageError;
use lunnar_client::{ClientConfig, Marketplace};
use lunnar_core::catalog::{FilterCriteria, ModelSelector, NumericRange, SortKey};
use lunnar_core::{FuelType, ListingId};

use super::emit;
use crate::render;

/// Filter and sort flags. Numeric bounds are read leniently; anything that
/// is not a positive or negative number leaves the bound open.
#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    #[arg(long)]
    pub brand: Option<String>,

    /// Exact model name, or `group:<name>` for a model group
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub fuel: Option<FuelType>,

    #[arg(long, default_value = "")]
    pub year_min: String,
    #[arg(long, default_value = "")]
    pub year_max: String,
    #[arg(long, default_value = "")]
    pub price_min: String,
    #[arg(long, default_value = "")]
    pub price_max: String,
    #[arg(long, default_value = "")]
    pub km_min: String,
    #[arg(long, default_value = "")]
    pub km_max: String,

    /// `newest`, `price-asc`, `price-desc`, `km-asc` or `year-desc`
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

impl BrowseArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            brand: self
                .brand
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_owned),
            model: self.model.as_deref().and_then(ModelSelector::parse),
            fuel: self.fuel,
            year: NumericRange::parse(&self.year_min, &self.year_max),
            price: NumericRange::parse(&self.price_min, &self.price_max),
            km: NumericRange::parse(&self.km_min, &self.km_max),
        }
    }
}

async fn open(config: &ClientConfig) -> Marketplace<LogMailer> {
    let mut app = Marketplace::open(config, LogMailer).await;
    app.refresh().await;
    app
}

pub async fn browse(config: &ClientConfig, args: BrowseArgs) {
    let mut app = open(config).await;
    app.set_criteria(args.criteria());
    app.set_sort(SortKey::parse(&args.sort));
    emit(&render::listing_table(&app.visible(), app.favorites(), Utc::now()));
}

pub async fn show(config: &ClientConfig, id: &str) {
    let app = open(config).await;
    let id = ListingId::new(id);
    match app.detail(&id) {
        Some(listing) => emit(&render::listing_detail(
            listing,
            app.favorites().contains(&id),
            Utc::now(),
        )),
        None => emit(&format!("Listing {id} is not available.")),
    }
}

/// Toggle a favorite.
///
/// # Errors
///
/// Returns `StorageError` if the favorites cannot be saved.
pub async fn favorite(config: &ClientConfig, id: &str) -> Result<(), StorageError> {
    let mut app = Marketplace::open(config, LogMailer).await;
    let id = ListingId::new(id);
    if app.toggle_favorite(&id).await? {
        emit(&format!("Added {id} to favorites."));
    } else {
        emit(&format!("Removed {id} from favorites."));
    }
    Ok(())
}

pub async fn favorites(config: &ClientConfig) {
    let app = open(config).await;
    emit(&render::listing_table(
        &app.favorite_listings(),
        app.favorites(),
        Utc::now(),
    ));
}

//! Moderation commands.
//!
//! # Usage
//!
//! ```bash
//! lunnar admin list
//! lunnar admin approve <id>
//! lunnar admin reject <id>
//! lunnar admin delete <id>
//! ```
//!
//! The server checks `LUNNAR_ADMIN_KEY` against its own `SERVER_ADMIN_KEY`
//! when one is configured. Listings kept on this device are moderated
//! locally.

use chrono::Utc;
use clap::Subcommand;

use lunnar_client::ClientConfig;
use lunnar_client::api::ApiClient;
use lunnar_client::catalog::load_catalog;
use lunnar_client::moderation::{self, Applied, ModerationError};
use lunnar_client::storage::LocalStore;
use lunnar_core::catalog::Visibility;
use lunnar_core::{ListingId, ModerationStatus};

use super::emit;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    /// List every listing with its status
    List,
    /// Approve a listing
    Approve { id: String },
    /// Reject a listing
    Reject { id: String },
    /// Delete a listing
    Delete { id: String },
}

/// Run a moderation action.
///
/// # Errors
///
/// Returns `ModerationError` if the local store or the admin endpoint fails.
pub async fn run(config: &ClientConfig, action: AdminAction) -> Result<(), ModerationError> {
    let api = ApiClient::new(config);
    let store = LocalStore::new(config.data_dir.clone());

    let (id, applied, verb) = match action {
        AdminAction::List => {
            let listings = load_catalog(&api, &store, &Visibility::Admin, None).await;
            emit(&render::moderation_table(&listings, Utc::now()));
            return Ok(());
        }
        AdminAction::Approve { id } => {
            let id = ListingId::new(id);
            let applied =
                moderation::set_status(&api, &store, &id, ModerationStatus::Approved).await?;
            (id, applied, "approved")
        }
        AdminAction::Reject { id } => {
            let id = ListingId::new(id);
            let applied =
                moderation::set_status(&api, &store, &id, ModerationStatus::Rejected).await?;
            (id, applied, "rejected")
        }
        AdminAction::Delete { id } => {
            let id = ListingId::new(id);
            let applied = moderation::delete(&api, &store, &id).await?;
            (id, applied, "deleted")
        }
    };

    let place = match applied {
        Applied::Local => " (local copy)",
        Applied::Remote => "",
    };
    emit(&format!("Listing {id} {verb}{place}."));
    Ok(())
}

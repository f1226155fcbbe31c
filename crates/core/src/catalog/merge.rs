//! Merging server listings with the local fallback store.
//!
//! Listings the client could not upload live in a local store with
//! `local-` ids. Views combine them with whatever the server returned:
//! server entries come first and win on id collision.

use std::collections::HashSet;

use crate::types::{Listing, ListingId, UserId};

/// Who is looking at the merged catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Public browsing: approved listings only.
    Public,
    /// Moderation view: every status.
    Admin,
    /// A seller's own listings of any status.
    Owner { user_id: UserId, email: String },
}

impl Visibility {
    fn admits_remote(&self, listing: &Listing) -> bool {
        match self {
            Self::Public => listing.status.is_public(),
            // The server already scoped these to the caller.
            Self::Admin | Self::Owner { .. } => true,
        }
    }

    fn admits_local(&self, listing: &Listing) -> bool {
        match self {
            Self::Public => listing.status.is_public(),
            Self::Admin => true,
            Self::Owner { user_id, email } => listing.is_owned_by(user_id, email),
        }
    }
}

/// Merge `remote` and `local` for the given audience.
///
/// Remote listings keep their order and come first; local listings whose id
/// is already present remotely are dropped.
#[must_use]
pub fn merge(remote: Vec<Listing>, local: Vec<Listing>, visibility: &Visibility) -> Vec<Listing> {
    let remote_ids: HashSet<ListingId> = remote.iter().map(|l| l.id.clone()).collect();

    remote
        .into_iter()
        .filter(|listing| visibility.admits_remote(listing))
        .chain(
            local
                .into_iter()
                .filter(|listing| !remote_ids.contains(&listing.id))
                .filter(|listing| visibility.admits_local(listing)),
        )
        .collect()
}

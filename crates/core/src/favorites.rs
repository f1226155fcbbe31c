//! Favorite listings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::ListingId;

/// A set of favorited listing ids.
///
/// Serializes as a JSON array, the same shape the server stores per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<ListingId>);

impl FavoriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns `true` if the listing is now a favorite.
    pub fn toggle(&mut self, id: &ListingId) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListingId> {
        self.0.iter()
    }

    /// Add every id of `other`.
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }

    /// The ids as a list, for the remote sync payload.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ListingId> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<ListingId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = ListingId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a ListingId;
    type IntoIter = std::collections::btree_set::Iter<'a, ListingId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut favorites: FavoriteSet = ["a", "b"].into_iter().map(ListingId::new).collect();
        let before = favorites.clone();
        let id = ListingId::new("c");

        assert!(favorites.toggle(&id));
        assert!(favorites.contains(&id));
        assert!(!favorites.toggle(&id));
        assert_eq!(favorites, before);

        let existing = ListingId::new("a");
        assert!(!favorites.toggle(&existing));
        assert!(favorites.toggle(&existing));
        assert_eq!(favorites, before);
    }

    #[test]
    fn test_serializes_as_array() {
        let favorites: FavoriteSet = ["local-2", "abc"].into_iter().map(ListingId::new).collect();
        let json = serde_json::to_string(&favorites).unwrap();
        assert_eq!(json, r#"["abc","local-2"]"#);
        let back: FavoriteSet = serde_json::from_str(r#"["abc","abc","local-2"]"#).unwrap();
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn test_extend_from_unions() {
        let mut local: FavoriteSet = ["a"].into_iter().map(ListingId::new).collect();
        let remote: FavoriteSet = ["a", "b"].into_iter().map(ListingId::new).collect();
        local.extend_from(&remote);
        assert_eq!(local.to_vec(), vec![ListingId::new("a"), ListingId::new("b")]);
    }
}

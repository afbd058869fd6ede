//! Resource locators and the fixed two-pattern matcher.
//!
//! # Responsibility
//! - Represent locator values addressing the catalog (`<authority>/pets`
//!   and `<authority>/pets/<id>`).
//! - Classify incoming locators into collection/item/unrecognized.
//!
//! # Invariants
//! - The pattern set is fixed at construction; patterns are disjoint by
//!   shape, so classification is unambiguous.
//! - Item ids are non-negative decimal integers; anything else (including
//!   values overflowing `i64`) is unrecognized.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Path segment naming the pets collection under an authority.
pub const PETS_PATH: &str = "pets";

/// Abstract resource locator.
///
/// Stored in display form, e.g. `shelter.example/pets/3`. Locators are
/// opaque to callers; shape interpretation belongs to [`LocatorMatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds the collection locator for an authority.
    pub fn collection(authority: &str) -> Self {
        Self(format!("{authority}/{PETS_PATH}"))
    }

    /// Builds the item locator for an authority and store-assigned id.
    pub fn item(authority: &str, id: i64) -> Self {
        Self(format!("{authority}/{PETS_PATH}/{id}"))
    }

    /// Appends an id segment, turning a collection locator into an item
    /// locator.
    pub fn with_appended_id(&self, id: i64) -> Self {
        Self(format!("{}/{id}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Classification outcome for one locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorKind {
    /// The whole pets collection.
    Collection,
    /// A single pet addressed by store-assigned id.
    Item(i64),
    /// No registered pattern matched.
    Unrecognized,
}

/// Fixed-registration matcher for catalog locators.
///
/// Exactly two patterns exist: the bare collection path and the
/// collection path followed by one numeric id segment.
#[derive(Debug)]
pub struct LocatorMatcher {
    authority: String,
    collection: Regex,
    item: Regex,
}

impl LocatorMatcher {
    /// Compiles the two catalog patterns for `authority`.
    pub fn new(authority: impl Into<String>) -> Self {
        let authority = authority.into();
        let escaped = regex::escape(&authority);
        // The pattern set is static and the authority is escaped, so
        // compilation cannot fail at runtime.
        let collection =
            Regex::new(&format!("^{escaped}/{PETS_PATH}$")).expect("static collection pattern");
        let item = Regex::new(&format!("^{escaped}/{PETS_PATH}/([0-9]+)$"))
            .expect("static item pattern");
        Self {
            authority,
            collection,
            item,
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns the collection locator owned by this matcher's authority.
    pub fn collection_locator(&self) -> Locator {
        Locator::collection(&self.authority)
    }

    /// Classifies one locator against the registered patterns.
    pub fn classify(&self, locator: &Locator) -> LocatorKind {
        if self.collection.is_match(locator.as_str()) {
            return LocatorKind::Collection;
        }

        if let Some(captures) = self.item.captures(locator.as_str()) {
            // Digit runs that overflow i64 fall through to unrecognized.
            if let Ok(id) = captures[1].parse::<i64>() {
                return LocatorKind::Item(id);
            }
        }

        LocatorKind::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::{Locator, LocatorKind, LocatorMatcher};

    const AUTHORITY: &str = "shelter.example";

    #[test]
    fn classifies_collection_locator() {
        let matcher = LocatorMatcher::new(AUTHORITY);
        let kind = matcher.classify(&Locator::collection(AUTHORITY));
        assert_eq!(kind, LocatorKind::Collection);
    }

    #[test]
    fn classifies_item_locator_and_extracts_id() {
        let matcher = LocatorMatcher::new(AUTHORITY);
        let kind = matcher.classify(&Locator::item(AUTHORITY, 42));
        assert_eq!(kind, LocatorKind::Item(42));
    }

    #[test]
    fn appended_id_produces_item_locator() {
        let matcher = LocatorMatcher::new(AUTHORITY);
        let item = matcher.collection_locator().with_appended_id(7);
        assert_eq!(matcher.classify(&item), LocatorKind::Item(7));
    }

    #[test]
    fn rejects_foreign_authority_and_unknown_paths() {
        let matcher = LocatorMatcher::new(AUTHORITY);
        for raw in [
            "other.example/pets",
            "shelter.example/cats",
            "shelter.example/pets/3/extra",
            "shelter.example/pets/abc",
            "shelter.example/pets/-1",
            "shelter.example",
            "",
        ] {
            assert_eq!(
                matcher.classify(&Locator::new(raw)),
                LocatorKind::Unrecognized,
                "locator `{raw}` should be unrecognized"
            );
        }
    }

    #[test]
    fn id_overflowing_i64_is_unrecognized() {
        let matcher = LocatorMatcher::new(AUTHORITY);
        let huge = Locator::new(format!("{AUTHORITY}/pets/99999999999999999999"));
        assert_eq!(matcher.classify(&huge), LocatorKind::Unrecognized);
    }

    #[test]
    fn authority_with_regex_metacharacters_is_escaped() {
        let matcher = LocatorMatcher::new("shelter.example");
        let lookalike = Locator::new("shelterXexample/pets");
        assert_eq!(matcher.classify(&lookalike), LocatorKind::Unrecognized);
    }
}

//! Shared identity contract for every record kept in an in-memory collection.

/// Numeric identity assigned by the owning repository on create.
pub type EntityId = i64;

/// A record with a repository-assigned identity.
///
/// `LABEL` is the human-readable name used in display messages
/// (e.g. `"Client not found"`).
pub trait Entity: Clone + Send + Sync + 'static {
    const LABEL: &'static str;

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);
}

/// Case-insensitive substring match used by the search helpers.
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

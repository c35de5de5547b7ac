// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document, identifier and filter types shared by every collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field under which a document's identifier is exposed to clients.
pub const ID_FIELD: &str = "_id";

/// Schema-free JSON object as stored in a collection.
pub type Document = Map<String, Value>;

/// Collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Reviews,
    Blogs,
    Orders,
    Payments,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Products,
        Collection::Reviews,
        Collection::Blogs,
        Collection::Orders,
        Collection::Payments,
        Collection::Users,
    ];

    /// Table name inside the store file.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Reviews => "reviews",
            Collection::Blogs => "blogs",
            Collection::Orders => "orders",
            Collection::Payments => "payments",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store-generated document identifier.
///
/// Backed by a UUIDv7, so identifiers generated later sort after earlier
/// ones. The store keys its tables by the 128-bit value, which makes key
/// order equal insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Error returned when a path segment is not a valid document identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document id: {0}")]
pub struct InvalidDocumentId(pub String);

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s.trim())
            .map(DocumentId)
            .map_err(|_| InvalidDocumentId(s.to_string()))
    }
}

/// Selection criteria for reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection.
    All,
    /// The document with this identifier.
    Id(DocumentId),
    /// Documents whose top-level `field` equals `value`.
    Eq(String, Value),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub(crate) fn matches(&self, id: DocumentId, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(wanted) => *wanted == id,
            Filter::Eq(field, value) => doc.get(field) == Some(value),
        }
    }
}

/// Traversal order for `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Insertion order (ascending identifier).
    #[default]
    Stored,
    /// Newest first (descending identifier).
    NewestFirst,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub limit: Option<usize>,
    pub order: SortOrder,
}

impl FindOptions {
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = SortOrder::NewestFirst;
        self
    }
}

/// Field-level update applied by `update_one`.
#[derive(Debug, Clone, Default)]
pub struct Update {
    /// Fields merged into the matched document.
    pub set: Document,
    /// Fields written only when an upsert creates the document.
    pub set_on_insert: Document,
    /// Create the document when nothing matches.
    pub upsert: bool,
}

impl Update {
    pub fn set(set: Document) -> Self {
        Self {
            set,
            ..Self::default()
        }
    }

    pub fn upsert(mut self, set_on_insert: Document) -> Self {
        self.upsert = true;
        self.set_on_insert = set_on_insert;
        self
    }
}

/// Result of a write that targets existing documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The matching document was modified or removed.
    Applied(DocumentId),
    /// No document matched and a new one was created.
    Upserted(DocumentId),
    /// No document matched; nothing was written.
    NotFound,
}

impl WriteOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, WriteOutcome::NotFound)
    }

    pub fn id(&self) -> Option<DocumentId> {
        match self {
            WriteOutcome::Applied(id) | WriteOutcome::Upserted(id) => Some(*id),
            WriteOutcome::NotFound => None,
        }
    }
}

/// Merge `set` into `doc` field by field. The identifier field is never written.
pub(crate) fn merge_fields(doc: &mut Document, set: &Document) {
    for (key, value) in set {
        if key == ID_FIELD {
            continue;
        }
        doc.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generated_ids_sort_in_creation_order() {
        let ids: Vec<DocumentId> = (0..50).map(|_| DocumentId::generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn id_parses_its_own_display() {
        let id = DocumentId::generate();
        let parsed: DocumentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(DocumentId::from_u128(id.as_u128()), id);
    }

    #[test]
    fn malformed_id_is_rejected() {
        let err = "not-an-id".parse::<DocumentId>().unwrap_err();
        assert_eq!(err, InvalidDocumentId("not-an-id".to_string()));
    }

    #[test]
    fn eq_filter_compares_top_level_field() {
        let id = DocumentId::generate();
        let doc = json!({"email": "a@x.com", "role": "user"});
        let doc = doc.as_object().unwrap();

        assert!(Filter::eq("email", "a@x.com").matches(id, doc));
        assert!(!Filter::eq("email", "b@x.com").matches(id, doc));
        assert!(!Filter::eq("missing", "a@x.com").matches(id, doc));
        assert!(Filter::Id(id).matches(id, doc));
        assert!(Filter::All.matches(id, doc));
    }

    #[test]
    fn merge_skips_identifier_field() {
        let mut doc = json!({"name": "drill", "inStock": 3}).as_object().unwrap().clone();
        let set = json!({"_id": "x", "inStock": 9}).as_object().unwrap().clone();
        merge_fields(&mut doc, &set);
        assert_eq!(doc.get("inStock"), Some(&json!(9)));
        assert_eq!(doc.get("name"), Some(&json!("drill")));
        assert!(!doc.contains_key(ID_FIELD));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! One table per [`Collection`], keyed by the document id as `u128` with the
//! JSON-encoded document as value. UUIDv7 ids make a forward scan return
//! documents in insertion order and a reverse scan newest-first.
//!
//! The identifier is not part of the stored JSON; reads add it back under
//! `_id`.

use std::path::Path;
use std::sync::Arc;

use redb::{
    AccessGuard, Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use serde_json::Value;

use super::document::{
    merge_fields, Collection, Document, DocumentId, Filter, FindOptions, SortOrder, Update,
    WriteOutcome, ID_FIELD,
};

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

fn table(collection: Collection) -> TableDefinition<'static, u128, &'static [u8]> {
    TableDefinition::new(collection.name())
}

// =============================================================================
// DocumentStore
// =============================================================================

/// Handle to the document store.
///
/// Cloning is cheap; every clone shares the same database.
#[derive(Clone)]
pub struct DocumentStore {
    db: Arc<Database>,
}

impl DocumentStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        for collection in Collection::ALL {
            let _ = write_txn.open_table(table(collection))?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Cheap liveness probe: opens a read transaction and a table.
    pub fn ping(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(table(Collection::Products))?;
        Ok(())
    }

    /// All documents matching `filter`, honouring limit and order.
    pub fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table(collection))?;
        let found = scan(&table, filter, options)?;
        Ok(found.into_iter().map(|(id, doc)| with_id(id, doc)).collect())
    }

    /// First document matching `filter` in storage order.
    pub fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>> {
        let options = FindOptions::default().limit(Some(1));
        Ok(self.find(collection, filter, options)?.into_iter().next())
    }

    pub fn find_by_id(&self, collection: Collection, id: DocumentId) -> StoreResult<Option<Document>> {
        self.find_one(collection, &Filter::Id(id))
    }

    pub fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<DocumentId> {
        self.write(|txn| txn.insert_one(collection, doc))
    }

    pub fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<WriteOutcome> {
        self.write(|txn| txn.update_one(collection, filter, update))
    }

    pub fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<WriteOutcome> {
        self.write(|txn| txn.delete_one(collection, filter))
    }

    /// Run several writes as one transaction.
    ///
    /// The transaction commits only when `f` returns `Ok`; on `Err` every
    /// write made through the [`StoreTxn`] is discarded.
    pub fn write<T>(&self, f: impl FnOnce(&StoreTxn<'_>) -> StoreResult<T>) -> StoreResult<T> {
        let write_txn = self.db.begin_write()?;
        let result = f(&StoreTxn { txn: &write_txn });
        match result {
            Ok(value) => {
                write_txn.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(abort_err) = write_txn.abort() {
                    tracing::warn!(error = %abort_err, "Failed to abort store transaction");
                }
                Err(e)
            }
        }
    }
}

/// Write access inside a [`DocumentStore::write`] transaction.
pub struct StoreTxn<'t> {
    txn: &'t WriteTransaction,
}

impl StoreTxn<'_> {
    pub fn insert_one(&self, collection: Collection, mut doc: Document) -> StoreResult<DocumentId> {
        doc.remove(ID_FIELD);
        let id = DocumentId::generate();
        let json = serde_json::to_vec(&doc)?;

        let mut table = self.txn.open_table(table(collection))?;
        table.insert(id.as_u128(), json.as_slice())?;
        Ok(id)
    }

    /// Merge `update.set` into the first matching document.
    pub fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
    ) -> StoreResult<WriteOutcome> {
        let mut table = self.txn.open_table(table(collection))?;
        let existing = scan(&table, filter, FindOptions::default().limit(Some(1)))?
            .into_iter()
            .next();

        let (id, doc, outcome) = match existing {
            Some((id, mut doc)) => {
                merge_fields(&mut doc, &update.set);
                (id, doc, WriteOutcome::Applied(id))
            }
            None if update.upsert => {
                let id = match filter {
                    Filter::Id(id) => *id,
                    _ => DocumentId::generate(),
                };
                let mut doc = Document::new();
                if let Filter::Eq(field, value) = filter {
                    doc.insert(field.clone(), value.clone());
                }
                merge_fields(&mut doc, &update.set_on_insert);
                merge_fields(&mut doc, &update.set);
                (id, doc, WriteOutcome::Upserted(id))
            }
            None => return Ok(WriteOutcome::NotFound),
        };

        let json = serde_json::to_vec(&doc)?;
        table.insert(id.as_u128(), json.as_slice())?;
        Ok(outcome)
    }

    pub fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<WriteOutcome> {
        let mut table = self.txn.open_table(table(collection))?;
        let existing = scan(&table, filter, FindOptions::default().limit(Some(1)))?
            .into_iter()
            .next();

        match existing {
            Some((id, _)) => {
                table.remove(id.as_u128())?;
                Ok(WriteOutcome::Applied(id))
            }
            None => Ok(WriteOutcome::NotFound),
        }
    }
}

// =============================================================================
// Scan helpers
// =============================================================================

fn scan<T>(table: &T, filter: &Filter, options: FindOptions) -> StoreResult<Vec<(DocumentId, Document)>>
where
    T: ReadableTable<u128, &'static [u8]>,
{
    let limit = options.limit.unwrap_or(usize::MAX);

    if let Filter::Id(id) = filter {
        let found = match table.get(id.as_u128())? {
            Some(value) if limit > 0 => vec![(*id, serde_json::from_slice(value.value())?)],
            _ => Vec::new(),
        };
        return Ok(found);
    }

    match options.order {
        SortOrder::Stored => take_matching(table.iter()?, filter, limit),
        SortOrder::NewestFirst => take_matching(table.iter()?.rev(), filter, limit),
    }
}

fn take_matching<'a, I>(
    entries: I,
    filter: &Filter,
    limit: usize,
) -> StoreResult<Vec<(DocumentId, Document)>>
where
    I: Iterator<
        Item = Result<(AccessGuard<'a, u128>, AccessGuard<'a, &'static [u8]>), redb::StorageError>,
    >,
{
    let mut results = Vec::new();
    if limit == 0 {
        return Ok(results);
    }

    for entry in entries {
        let (key, value) = entry?;
        let id = DocumentId::from_u128(key.value());
        let doc: Document = serde_json::from_slice(value.value())?;

        if filter.matches(id, &doc) {
            results.push((id, doc));
            if results.len() >= limit {
                break;
            }
        }
    }

    Ok(results)
}

fn with_id(id: DocumentId, mut doc: Document) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

// =============================================================================
// Tests
// =============================================================================

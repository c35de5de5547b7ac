// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Users are keyed by `email`. Profiles are created on first upsert with the
//! `user` role; only [`UserRepository::set_role`] changes a role.

use serde_json::Value;

use super::super::{
    Collection, Document, DocumentStore, Filter, FindOptions, StoreResult, Update, WriteOutcome,
};
use crate::auth::Role;

pub const ROLE_FIELD: &str = "role";
pub const EMAIL_FIELD: &str = "email";

pub struct UserRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> StoreResult<Vec<Document>> {
        self.store
            .find(Collection::Users, &Filter::All, FindOptions::default())
    }

    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<Document>> {
        self.store
            .find_one(Collection::Users, &Filter::eq(EMAIL_FIELD, email))
    }

    /// Stored role of `email`, or `None` when no such user exists.
    ///
    /// A record without a recognisable role counts as [`Role::User`].
    pub fn role_of(&self, email: &str) -> StoreResult<Option<Role>> {
        Ok(self.find_by_email(email)?.map(|user| {
            user.get(ROLE_FIELD)
                .and_then(Value::as_str)
                .and_then(Role::from_str)
                .unwrap_or_default()
        }))
    }

    /// Merge profile fields into the user, creating it when absent.
    ///
    /// `email` is forced to the key and any `role` in `profile` is dropped.
    pub fn upsert_profile(&self, email: &str, mut profile: Document) -> StoreResult<WriteOutcome> {
        if profile.remove(ROLE_FIELD).is_some() {
            tracing::warn!(%email, "Ignoring role field in profile update");
        }
        profile.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));

        let mut on_insert = Document::new();
        on_insert.insert(
            ROLE_FIELD.to_string(),
            Value::String(Role::User.to_string()),
        );

        self.store.update_one(
            Collection::Users,
            &Filter::eq(EMAIL_FIELD, email),
            &Update::set(profile).upsert(on_insert),
        )
    }

    pub fn set_role(&self, email: &str, role: Role) -> StoreResult<WriteOutcome> {
        let mut set = Document::new();
        set.insert(ROLE_FIELD.to_string(), Value::String(role.to_string()));
        self.store.update_one(
            Collection::Users,
            &Filter::eq(EMAIL_FIELD, email),
            &Update::set(set),
        )
    }

    pub fn delete(&self, email: &str) -> StoreResult<WriteOutcome> {
        self.store
            .delete_one(Collection::Users, &Filter::eq(EMAIL_FIELD, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_store() -> (DocumentStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(&dir.path().join("users.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn upsert_creates_plain_user_and_ignores_role() {
        let (store, _dir) = test_store();
        let repo = UserRepository::new(&store);

        let profile = json!({"name": "Bob", "role": "admin"})
            .as_object()
            .cloned()
            .unwrap();
        let outcome = repo.upsert_profile("bob@x.com", profile).unwrap();
        assert!(matches!(outcome, WriteOutcome::Upserted(_)));

        assert_eq!(repo.role_of("bob@x.com").unwrap(), Some(Role::User));
        let user = repo.find_by_email("bob@x.com").unwrap().unwrap();
        assert_eq!(user["name"], "Bob");
        assert_eq!(user["email"], "bob@x.com");
    }

    #[test]
    fn role_of_unknown_user_is_none() {
        let (store, _dir) = test_store();
        let repo = UserRepository::new(&store);
        assert_eq!(repo.role_of("ghost@x.com").unwrap(), None);
    }

    #[test]
    fn set_role_promotes_and_demotes() {
        let (store, _dir) = test_store();
        let repo = UserRepository::new(&store);
        repo.upsert_profile("amy@x.com", Document::new()).unwrap();

        repo.set_role("amy@x.com", Role::Admin).unwrap();
        assert_eq!(repo.role_of("amy@x.com").unwrap(), Some(Role::Admin));

        repo.set_role("amy@x.com", Role::User).unwrap();
        assert_eq!(repo.role_of("amy@x.com").unwrap(), Some(Role::User));

        assert_eq!(
            repo.set_role("nobody@x.com", Role::Admin).unwrap(),
            WriteOutcome::NotFound
        );
    }

    #[test]
    fn second_upsert_updates_existing_profile() {
        let (store, _dir) = test_store();
        let repo = UserRepository::new(&store);
        repo.upsert_profile("c@x.com", Document::new()).unwrap();
        repo.set_role("c@x.com", Role::Admin).unwrap();

        let profile = json!({"phone": "555"}).as_object().cloned().unwrap();
        let outcome = repo.upsert_profile("c@x.com", profile).unwrap();
        assert!(matches!(outcome, WriteOutcome::Applied(_)));

        // Existing role survives a self-service update.
        assert_eq!(repo.role_of("c@x.com").unwrap(), Some(Role::Admin));
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use derive_more::Display;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::logging::logged;
use crate::model::Record;

/// Confirmation returned by a successful mutation, naming the entity kind
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Status {
    #[display("New {_0} is created!")]
    Created(String),
    #[display("{_0} is updated!")]
    Updated(String),
    #[display("{_0} has been deleted!")]
    Deleted(String),
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// In-memory store for one entity kind, keyed by record id
///
/// Every lookup hands back a detached clone; the store is the only owner of
/// its records.
pub struct KeyedStore<T> {
    kind: String,
    data: RwLock<HashMap<i64, T>>,
}

impl<T: Record> KeyedStore<T> {
    /// Create an empty store labelled `kind` (used only in messages)
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Insert `item`, overwriting any record with the same id
    pub fn add(&self, item: T) -> Status {
        let result = logged(&self.kind, "add", || {
            self.write().insert(item.id(), item);
            Ok(Status::Created(self.kind.clone()))
        });
        // add has no failure path
        result.unwrap_or_else(|_| Status::Created(self.kind.clone()))
    }

    /// All records, or `Error::Empty` when there are none
    pub fn get_all(&self) -> Result<Vec<T>> {
        logged(&self.kind, "get_all", || {
            let data = self.read();
            if data.is_empty() {
                return Err(Error::empty(&self.kind));
            }
            Ok(data.values().cloned().collect())
        })
    }

    /// The record stored under `id`
    pub fn get_by_id(&self, id: i64) -> Result<T> {
        logged(&self.kind, "get_by_id", || {
            self.read()
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::not_found(&self.kind))
        })
    }

    /// Merge `patch` into the record under `id`. Nothing is written when the
    /// id is absent or the merged record fails validation.
    pub fn update(&self, id: i64, patch: T::Patch) -> Result<Status> {
        logged(&self.kind, "update", || {
            let mut data = self.write();
            let existing = data.get(&id).ok_or_else(|| Error::not_found(&self.kind))?;
            let mut updated = existing.clone();
            updated.apply(patch)?;
            data.insert(id, updated);
            Ok(Status::Updated(self.kind.clone()))
        })
    }

    /// Remove the record under `id`
    pub fn delete(&self, id: i64) -> Result<Status> {
        logged(&self.kind, "delete", || {
            match self.write().remove(&id) {
                Some(_) => Ok(Status::Deleted(self.kind.clone())),
                None => Err(Error::not_found(&self.kind)),
            }
        })
    }

    // Records are plain data, so a panic while holding the lock cannot leave
    // one half-written; recover the guard instead of failing.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<i64, T>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<i64, T>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Post, PostPatch, User, UserData, UserPatch};
    use crate::policy::Role;

    fn post(id: i64) -> Post {
        Post::new(id, "AdminUser", "Hello", "World", 1)
    }

    #[test]
    fn test_add_and_get_by_id() {
        let store = KeyedStore::new("post");
        assert_eq!(store.add(post(10)), Status::Created("post".to_string()));
        assert_eq!(store.get_by_id(10).unwrap(), post(10));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_overwrites_same_id() {
        let store = KeyedStore::new("post");
        store.add(post(10));
        let mut replacement = post(10);
        replacement.title = "Replaced".to_string();
        store.add(replacement);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id(10).unwrap().title, "Replaced");
    }

    #[test]
    fn test_get_all_empty() {
        let store: KeyedStore<Post> = KeyedStore::new("post");
        assert_eq!(store.get_all(), Err(Error::empty("post")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_all_returns_records() {
        let store = KeyedStore::new("post");
        store.add(post(1));
        store.add(post(2));

        let mut ids: Vec<i64> = store.get_all().unwrap().iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_get_by_id_not_found() {
        let store: KeyedStore<Post> = KeyedStore::new("post");
        assert_eq!(store.get_by_id(99), Err(Error::not_found("post")));
    }

    #[test]
    fn test_lookup_is_detached() {
        let store = KeyedStore::new("post");
        store.add(post(1));
        let mut copy = store.get_by_id(1).unwrap();
        copy.title = "changed locally".to_string();
        assert_eq!(store.get_by_id(1).unwrap().title, "Hello");
    }

    #[test]
    fn test_update_absent_is_noop() {
        let store = KeyedStore::new("post");
        store.add(post(1));
        let result = store.update(
            2,
            PostPatch {
                title: Some("x".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(result, Err(Error::not_found("post")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id(1).unwrap(), post(1));
    }

    #[test]
    fn test_update_merges_present_fields() {
        let store = KeyedStore::new("post");
        store.add(post(1));
        let status = store
            .update(
                1,
                PostPatch {
                    content: Some("There".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(status.to_string(), "post is updated!");

        let updated = store.get_by_id(1).unwrap();
        assert_eq!(updated.title, "Hello");
        assert_eq!(updated.content, "There");
        assert_eq!(updated.author_id, 1);
    }

    #[test]
    fn test_update_invalid_user_keeps_original() {
        let store = KeyedStore::new("user");
        let user = User::new(1, "AdminUser", UserData {
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        })
        .unwrap();
        store.add(user.clone());

        let result = store.update(
            1,
            UserPatch {
                username: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::Invalid(_))));
        assert_eq!(store.get_by_id(1).unwrap(), user);
    }

    #[test]
    fn test_delete_twice() {
        let store = KeyedStore::new("post");
        store.add(post(1));
        assert_eq!(store.delete(1), Ok(Status::Deleted("post".to_string())));
        assert_eq!(store.delete(1), Err(Error::not_found("post")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(Status::Created("user".into()).to_string(), "New user is created!");
        assert_eq!(Status::Deleted("post".into()).to_string(), "post has been deleted!");
    }

    #[test]
    fn test_shared_across_threads() {
        let store = KeyedStore::new("post");
        std::thread::scope(|s| {
            for t in 0..4 {
                let store = &store;
                s.spawn(move || {
                    for i in 0..25 {
                        store.add(post(t * 100 + i));
                    }
                });
            }
        });
        assert_eq!(store.len(), 100);
    }
}

//! Task-scoped ambient fields
//!
//! Ambient fields belong to a logical unit of work (a request, a job) rather
//! than to a logger. They live in a tokio task-local cell, so concurrent
//! units of work never see each other's fields even when they interleave on
//! the same worker threads.
//!
//! - [`scope`] / [`sync_scope`] run work with a fresh view of the fields.
//! - [`set_field`] changes the current view only.
//! - [`spawn`] forks the current view into a new task; later changes on
//!   either side stay invisible to the other.
//!
//! Loggers read fields through the [`AmbientSource`] trait. The default
//! source is [`TaskAmbient`]; an [`AmbientFields`] value can be passed
//! explicitly instead when the caller threads context by hand.
//!
//! # Example
//!
//! ```
//! use chunked_event_logger::core::ambient::{self, AmbientFields};
//!
//! ambient::sync_scope(AmbientFields::new(), || {
//!     ambient::set_field("request_id", "req-42").unwrap();
//!     assert_eq!(ambient::current().get("request_id").unwrap(), "req-42");
//! });
//!
//! // Outside the scope nothing is visible
//! assert!(ambient::current().is_empty());
//! ```

use super::error::{LoggerError, Result};
use super::fields::Fields;
use serde_json::Value;
use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

tokio::task_local! {
    static AMBIENT: RefCell<AmbientFields>;
}

/// Immutable snapshot of ambient fields, cheap to clone
///
/// Mutation copies the underlying map only when it is shared, so a view
/// handed to a forked task is never changed behind its back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientFields {
    fields: Arc<Fields>,
}

impl AmbientFields {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.set(key, value);
        self
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Arc::make_mut(&mut self.fields).add_field(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        Arc::make_mut(&mut self.fields).remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl From<Fields> for AmbientFields {
    fn from(fields: Fields) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }
}

/// Capability the logger needs from the ambient store: a snapshot of the
/// fields visible to the caller right now
pub trait AmbientSource: Send + Sync {
    fn snapshot(&self) -> AmbientFields;
}

/// Reads the fields of the current tokio task (or of the enclosing
/// [`sync_scope`]); empty outside any scope
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskAmbient;

impl AmbientSource for TaskAmbient {
    fn snapshot(&self) -> AmbientFields {
        current()
    }
}

impl AmbientSource for AmbientFields {
    fn snapshot(&self) -> AmbientFields {
        self.clone()
    }
}

/// Run `fut` with `fields` as its ambient view
pub async fn scope<F>(fields: AmbientFields, fut: F) -> F::Output
where
    F: Future,
{
    AMBIENT.scope(RefCell::new(fields), fut).await
}

/// Run `f` synchronously with `fields` as its ambient view
pub fn sync_scope<F, R>(fields: AmbientFields, f: F) -> R
where
    F: FnOnce() -> R,
{
    AMBIENT.sync_scope(RefCell::new(fields), f)
}

/// Snapshot of the fields visible to the caller
pub fn current() -> AmbientFields {
    AMBIENT
        .try_with(|cell| cell.borrow().clone())
        .unwrap_or_default()
}

/// Set a field in the current view
///
/// Only the calling task, and tasks forked from it afterwards, observe the
/// change. Fails with [`LoggerError::NoAmbientScope`] outside any scope.
pub fn set_field<K, V>(key: K, value: V) -> Result<()>
where
    K: Into<String>,
    V: Into<Value>,
{
    AMBIENT
        .try_with(|cell| cell.borrow_mut().set(key, value))
        .map_err(|_| LoggerError::NoAmbientScope)
}

/// Remove a field from the current view
pub fn remove_field(key: &str) -> Result<Option<Value>> {
    AMBIENT
        .try_with(|cell| cell.borrow_mut().remove(key))
        .map_err(|_| LoggerError::NoAmbientScope)
}

/// Spawn `fut` on the tokio runtime with a copy of the current view
pub fn spawn<F>(fut: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(scope(current(), fut))
}

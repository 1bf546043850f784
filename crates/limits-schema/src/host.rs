//! Host capability over the live schema
//!
//! The host owns the live schema and hands out a narrow capability:
//! group lookup by namespace and name, and through a group, property lookup,
//! insertion and removal. Nothing in this workspace builds a live schema on
//! the host's behalf.

use crate::group::PropertyGroup;
use crate::schema::{Namespace, Schema};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Mutation capability over a host-owned live schema
pub trait SchemaHost {
    /// Whether the host has populated its schema yet
    fn is_initialized(&self) -> bool {
        true
    }

    /// Names of the groups present in a namespace
    fn group_names(&self, namespace: Namespace) -> Vec<String>;

    /// Look up group by name
    fn group(&self, namespace: Namespace, name: &str) -> Option<&PropertyGroup>;

    /// Look up group by name for mutation
    fn group_mut(&mut self, namespace: Namespace, name: &str) -> Option<&mut PropertyGroup>;
}

impl SchemaHost for Schema {
    fn group_names(&self, namespace: Namespace) -> Vec<String> {
        self.groups(namespace).keys().cloned().collect()
    }

    fn group(&self, namespace: Namespace, name: &str) -> Option<&PropertyGroup> {
        self.groups(namespace).get(name)
    }

    fn group_mut(&mut self, namespace: Namespace, name: &str) -> Option<&mut PropertyGroup> {
        self.groups_mut(namespace).get_mut(name)
    }
}

/// Live schema shared between the host's readers and override passes
///
/// A pass takes the write guard for its whole duration, so readers observe
/// either the state before the pass or the state after it.
#[derive(Debug)]
pub struct SharedSchema<S = Schema> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SharedSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SchemaHost> SharedSchema<S> {
    /// Wrap a live schema
    #[inline]
    #[must_use]
    pub fn new(schema: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(schema)),
        }
    }

    /// Shared read access
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read()
    }

    /// Run `f` with exclusive access
    pub fn with_write<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}

impl<S: SchemaHost + Default> Default for SharedSchema<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

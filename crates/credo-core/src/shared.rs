//! Lock-guarded knowledge base handle for multi-threaded callers.
//!
//! The engines are single-threaded values. `SharedKnowledgeBase` serialises
//! writers behind one lock and lets readers either borrow under the lock or
//! take an independent snapshot and keep reading while writers proceed.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::graph::KnowledgeBase;

#[derive(Debug, Clone, Default)]
pub struct SharedKnowledgeBase {
    inner: Arc<RwLock<KnowledgeBase>>,
}

impl SharedKnowledgeBase {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            inner: Arc::new(RwLock::new(kb)),
        }
    }

    /// Run `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&KnowledgeBase) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut KnowledgeBase) -> R) -> R {
        f(&mut *self.inner.write())
    }

    /// Deep copy of the current state.
    pub fn snapshot(&self) -> KnowledgeBase {
        self.inner.read().copy()
    }
}

impl From<KnowledgeBase> for SharedKnowledgeBase {
    fn from(kb: KnowledgeBase) -> Self {
        Self::new(kb)
    }
}

//! Which thread is building which singleton.
//!
//! A thread asking for a singleton that another thread is building waits
//! for it, unless that wait would close a loop of threads waiting on each
//! other. The loop is reported instead.

use std::collections::HashMap;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::key::BeanKey;

#[derive(Debug, Default)]
struct Creations {
    owners: HashMap<BeanKey, ThreadId>,
    waiting: HashMap<ThreadId, BeanKey>,
}

impl Creations {
    /// Follows owner → awaited bean → its owner, starting from `owner`.
    /// Returns the beans passed on the way if the walk reaches `me`.
    fn wait_chain(&self, wanted: BeanKey, owner: ThreadId, me: ThreadId) -> Option<Vec<BeanKey>> {
        let mut chain = vec![wanted];
        let mut owner = owner;
        // every recorded wait was checked here first, so the walk ends
        while owner != me {
            let next = *self.waiting.get(&owner)?;
            chain.push(next);
            owner = *self.owners.get(&next)?;
        }
        Some(chain)
    }
}

#[derive(Debug, Default)]
pub(crate) struct CreationTracker {
    state: Mutex<Creations>,
    finished: Condvar,
}

impl CreationTracker {
    /// Claims `key` for the current thread until the returned claim drops.
    ///
    /// Waits while another thread holds `key`. When waiting would
    /// deadlock, returns the chain `[key, .., held]` where `held` is a
    /// bean the current thread already holds.
    pub(crate) fn claim(&self, key: BeanKey) -> Result<CreationClaim<'_>, Vec<BeanKey>> {
        let me = thread::current().id();
        let mut state = self.state.lock();

        loop {
            let Some(&owner) = state.owners.get(&key) else {
                state.owners.insert(key, me);
                return Ok(CreationClaim { tracker: self, key });
            };

            if let Some(chain) = state.wait_chain(key, owner, me) {
                return Err(chain);
            }

            trace!(bean = %key, "Waiting for another thread to create bean");
            state.waiting.insert(me, key);
            self.finished.wait(&mut state);
            state.waiting.remove(&me);
        }
    }
}

/// Ownership of one singleton under construction.
pub(crate) struct CreationClaim<'a> {
    tracker: &'a CreationTracker,
    key: BeanKey,
}

impl Drop for CreationClaim<'_> {
    fn drop(&mut self) {
        self.tracker.state.lock().owners.remove(&self.key);
        self.tracker.finished.notify_all();
    }
}

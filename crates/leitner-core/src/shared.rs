// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::BoxError;
use crate::error::BoxResult;
use crate::leitner::LeitnerBox;
use crate::snapshot::Snapshot;

/// A box shared between callers on different threads.
///
/// Every call runs under one lock around the whole box, so each closure
/// passed to [`SharedBox::with`] or [`SharedBox::with_mut`] sees and leaves
/// the box in a consistent state.
#[derive(Clone, Default)]
pub struct SharedBox {
    inner: Arc<Mutex<LeitnerBox>>,
}

impl SharedBox {
    pub fn new(leitner: LeitnerBox) -> Self {
        Self {
            inner: Arc::new(Mutex::new(leitner)),
        }
    }

    fn lock(&self) -> BoxResult<MutexGuard<'_, LeitnerBox>> {
        self.inner.lock().map_err(|_| BoxError::LockPoisoned)
    }

    pub fn with<T>(&self, f: impl FnOnce(&LeitnerBox) -> T) -> BoxResult<T> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    pub fn with_mut<T>(&self, f: impl FnOnce(&mut LeitnerBox) -> T) -> BoxResult<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Export the box. The lock is released before the caller writes the
    /// snapshot anywhere.
    pub fn snapshot(&self) -> BoxResult<Snapshot> {
        self.with(|b| b.export())
    }

    /// Merge two shared boxes, holding both locks for the duration.
    ///
    /// Locks are taken in address order so two threads merging the same
    /// pair in opposite directions cannot deadlock.
    pub fn merge(&self, other: &SharedBox) -> BoxResult<LeitnerBox> {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return self.with(|b| b.merge(b));
        }
        let self_first = Arc::as_ptr(&self.inner) < Arc::as_ptr(&other.inner);
        let (first, second) = if self_first {
            (self, other)
        } else {
            (other, self)
        };
        let first_guard = first.lock()?;
        let second_guard = second.lock()?;
        let (mine, theirs) = if self_first {
            (&*first_guard, &*second_guard)
        } else {
            (&*second_guard, &*first_guard)
        };
        Ok(mine.merge(theirs))
    }

    /// Take the box out, or a copy of it if other handles are still alive.
    pub fn into_inner(self) -> BoxResult<LeitnerBox> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().map_err(|_| BoxError::LockPoisoned),
            Err(shared) => SharedBox { inner: shared }.with(|b| b.clone()),
        }
    }
}

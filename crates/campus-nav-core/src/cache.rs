// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::data_source::{DataError, DataSource};
use crate::model::{Department, StaffMember};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

type Slot = Arc<OnceCell<Arc<Vec<StaffMember>>>>;

/// Per-department roster cache in front of any [`DataSource`].
///
/// Entries are filled on first fetch and kept for the life of the cache.
/// Each id has its own slot: concurrent requests for the same id wait for
/// the first fetch and share its result, while other ids proceed
/// independently. Failed fetches leave the slot empty.
pub struct StaffCache<S> {
    inner: S,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<S: DataSource> StaffCache<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn get(&self, department_id: &str) -> Result<Arc<Vec<StaffMember>>, DataError> {
        // The map lock only guards slot lookup, never the fetch
        let slot = Arc::clone(
            self.slots
                .lock()
                .await
                .entry(department_id.to_string())
                .or_default(),
        );
        if let Some(roster) = slot.get() {
            debug!("Staff cache hit — id={} members={}", department_id, roster.len());
            return Ok(Arc::clone(roster));
        }

        let roster = slot
            .get_or_try_init(|| async {
                let roster = Arc::new(self.inner.list_staff(department_id).await?);
                debug!(
                    "Staff cache filled — id={} members={}",
                    department_id,
                    roster.len()
                );
                Ok::<_, DataError>(roster)
            })
            .await?;
        Ok(Arc::clone(roster))
    }

    /// Number of rosters held.
    pub async fn len(&self) -> usize {
        self.slots
            .lock()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<S: DataSource> DataSource for StaffCache<S> {
    async fn list_departments(&self) -> Result<Vec<Department>, DataError> {
        self.inner.list_departments().await
    }

    async fn list_staff(&self, department_id: &str) -> Result<Vec<StaffMember>, DataError> {
        Ok(self.get(department_id).await?.as_ref().clone())
    }
}

//! Process-local letter store.
//!
//! Holds letters in a `RwLock`-guarded vector and measures distance with the
//! haversine formula. Used when no database URL is configured, and by tests
//! that want real store semantics without PostGIS. Nothing survives a
//! restart.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{LetterStore, LetterStoreError};
use crate::domain::{GeoPoint, Letter, LetterId, NearbyLetter, NewLetter, SearchRadius};

#[derive(Debug, Default)]
struct Rows {
    letters: Vec<Letter>,
    last_id: i64,
}

/// In-memory implementation of [`LetterStore`].
///
/// Identifiers start at 1 and increase by one per insert.
#[derive(Debug, Default)]
pub struct InMemoryLetterStore {
    rows: RwLock<Rows>,
}

impl InMemoryLetterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored letters.
    pub fn len(&self) -> usize {
        self.read().letters.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Rows> {
        match self.rows.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Rows> {
        match self.rows.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl LetterStore for InMemoryLetterStore {
    async fn insert(&self, letter: &NewLetter) -> Result<LetterId, LetterStoreError> {
        let mut rows = self.write();
        let next = rows
            .last_id
            .checked_add(1)
            .ok_or_else(|| LetterStoreError::constraint("letter id sequence exhausted"))?;
        let id = LetterId::new(next);
        rows.letters.push(Letter {
            id,
            content: letter.content.as_str().to_owned(),
            location: letter.location,
            created_at: Utc::now(),
        });
        rows.last_id = next;
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Letter>, LetterStoreError> {
        Ok(self.read().letters.clone())
    }

    async fn query_nearby(
        &self,
        origin: GeoPoint,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyLetter>, LetterStoreError> {
        let rows = self.read();
        Ok(rows
            .letters
            .iter()
            .filter_map(|letter| {
                let distance_metres = origin.distance_to(&letter.location);
                radius.contains(distance_metres).then(|| NearbyLetter {
                    letter: letter.clone(),
                    distance_metres,
                })
            })
            .collect())
    }
}

//! Internal Diesel row structs for the letter table.
//!
//! The `gps` column is a PostGIS geography, which Diesel has no native type
//! for, so every query is raw SQL that projects it into plain doubles and
//! these rows are loaded by name.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Text, Timestamptz};

use crate::domain::ports::LetterStoreError;
use crate::domain::{GeoPoint, Letter, LetterId, NearbyLetter};

/// Identifier returned by `INSERT ... RETURNING id`.
#[derive(Debug, QueryableByName)]
pub(crate) struct InsertedLetterRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
}

/// One letter with its point split into coordinates.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct LetterRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Timestamptz)]
    pub date_time: DateTime<Utc>,
    #[diesel(sql_type = Double)]
    pub longitude: f64,
    #[diesel(sql_type = Double)]
    pub latitude: f64,
}

/// A letter row plus its geodesic distance from the query origin.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct NearbyLetterRow {
    #[diesel(embed)]
    pub letter: LetterRow,
    #[diesel(sql_type = Double)]
    pub distance: f64,
}

impl TryFrom<LetterRow> for Letter {
    type Error = LetterStoreError;

    fn try_from(row: LetterRow) -> Result<Self, Self::Error> {
        let location = GeoPoint::new(row.longitude, row.latitude).map_err(|err| {
            LetterStoreError::query(format!("letter {} has an invalid point: {err}", row.id))
        })?;
        Ok(Self {
            id: LetterId::new(row.id),
            content: row.content,
            location,
            created_at: row.date_time,
        })
    }
}

impl TryFrom<NearbyLetterRow> for NearbyLetter {
    type Error = LetterStoreError;

    fn try_from(row: NearbyLetterRow) -> Result<Self, Self::Error> {
        Ok(Self {
            letter: Letter::try_from(row.letter)?,
            distance_metres: row.distance,
        })
    }
}

//! PostgreSQL/PostGIS-backed letter store.
//!
//! Locations live in a `geography(Point, 4326)` column, so distances and
//! radius filters are geodesic metres computed by PostGIS. Each operation
//! runs in its own transaction with `SET LOCAL statement_timeout`, which keeps
//! the timeout scoped to that transaction on a pooled connection.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Double, Integer, Text};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{LetterStore, LetterStoreError};
use crate::domain::{GeoPoint, Letter, LetterId, NearbyLetter, NewLetter, SRID_WGS84, SearchRadius};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, reclassify_elapsed_timeout};
use super::models::{InsertedLetterRow, LetterRow, NearbyLetterRow};
use super::pool::DbPool;

const INSERT_SQL: &str = "\
INSERT INTO letter (content, gps) \
VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), $4)::geography) \
RETURNING id";

const LIST_ALL_SQL: &str = "\
SELECT id, content, date_time, \
       ST_X(gps::geometry) AS longitude, \
       ST_Y(gps::geometry) AS latitude \
FROM letter \
ORDER BY id";

const QUERY_NEARBY_SQL: &str = "\
WITH origin AS ( \
    SELECT ST_SetSRID(ST_MakePoint($1, $2), $3)::geography AS point \
) \
SELECT l.id, l.content, l.date_time, \
       ST_X(l.gps::geometry) AS longitude, \
       ST_Y(l.gps::geometry) AS latitude, \
       ST_Distance(l.gps, origin.point) AS distance \
FROM letter AS l, origin \
WHERE ST_DWithin(l.gps, origin.point, $4) \
ORDER BY distance, l.id";

/// Diesel-backed implementation of [`LetterStore`].
#[derive(Clone)]
pub struct DieselLetterStore {
    pool: DbPool,
}

impl DieselLetterStore {
    /// Create a store over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn statement_timeout_sql(timeout: Duration) -> String {
    // `SET` does not accept bind parameters; the value is a plain integer.
    format!("SET LOCAL statement_timeout = {}", timeout.as_millis().max(1))
}

fn transaction_error(
    started: Instant,
    timeout: Duration,
) -> impl FnOnce(diesel::result::Error) -> LetterStoreError {
    move |err| reclassify_elapsed_timeout(map_diesel_error(err), started.elapsed(), timeout)
}

async fn apply_statement_timeout(
    conn: &mut AsyncPgConnection,
    timeout: Duration,
) -> diesel::QueryResult<()> {
    sql_query(statement_timeout_sql(timeout)).execute(conn).await?;
    Ok(())
}

#[async_trait]
impl LetterStore for DieselLetterStore {
    async fn insert(&self, letter: &NewLetter) -> Result<LetterId, LetterStoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let timeout = self.pool.statement_timeout();
        let content = letter.content.as_str().to_owned();
        let location = letter.location;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let started = Instant::now();

        let row = conn
            .transaction(|conn| {
                async move {
                    apply_statement_timeout(conn, timeout).await?;
                    sql_query(INSERT_SQL)
                        .bind::<Text, _>(content)
                        .bind::<Double, _>(location.longitude())
                        .bind::<Double, _>(location.latitude())
                        .bind::<Integer, _>(SRID_WGS84)
                        .get_result::<InsertedLetterRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(transaction_error(started, timeout))?;

        debug!(letter_id = row.id, "letter row inserted");
        Ok(LetterId::new(row.id))
    }

    async fn list_all(&self) -> Result<Vec<Letter>, LetterStoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let timeout = self.pool.statement_timeout();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let started = Instant::now();

        let rows = conn
            .transaction(|conn| {
                async move {
                    apply_statement_timeout(conn, timeout).await?;
                    sql_query(LIST_ALL_SQL).load::<LetterRow>(conn).await
                }
                .scope_boxed()
            })
            .await
            .map_err(transaction_error(started, timeout))?;

        rows.into_iter().map(Letter::try_from).collect()
    }

    async fn query_nearby(
        &self,
        origin: GeoPoint,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyLetter>, LetterStoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let timeout = self.pool.statement_timeout();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let started = Instant::now();

        let rows = conn
            .transaction(|conn| {
                async move {
                    apply_statement_timeout(conn, timeout).await?;
                    sql_query(QUERY_NEARBY_SQL)
                        .bind::<Double, _>(origin.longitude())
                        .bind::<Double, _>(origin.latitude())
                        .bind::<Integer, _>(SRID_WGS84)
                        .bind::<Double, _>(radius.metres())
                        .load::<NearbyLetterRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(transaction_error(started, timeout))?;

        rows.into_iter().map(NearbyLetter::try_from).collect()
    }
}

use crate::error::{AppError, Resource};
use crate::model::{Activity, NewActivity};
use crate::store::begin_write;
use sqlx::{Executor, Sqlite, SqlitePool};

const SELECT_ALL: &str = "SELECT id, name, difficulty FROM activities ORDER BY id";
const SELECT_ONE: &str = "SELECT id, name, difficulty FROM activities WHERE id = ?";
const INSERT: &str =
    "INSERT INTO activities (name, difficulty) VALUES (?, ?) RETURNING id, name, difficulty";
const DELETE_SIGNUPS: &str = "DELETE FROM signups WHERE activity_id = ?";
const DELETE: &str = "DELETE FROM activities WHERE id = ?";

pub struct ActivityService;

impl ActivityService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Activity>, AppError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Activity>(SELECT_ALL)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Store-level insert; used by seeding and tests.
    pub async fn create(pool: &SqlitePool, input: &NewActivity) -> Result<Activity, AppError> {
        tracing::debug!(sql = %INSERT, params = ?input, "query");
        let activity = sqlx::query_as::<_, Activity>(INSERT)
            .bind(input.name.as_deref())
            .bind(input.difficulty)
            .fetch_one(pool)
            .await
            .map_err(AppError::from_write)?;
        tracing::info!(activity_id = activity.id, "activity created");
        Ok(activity)
    }

    /// Delete an activity and every signup pointing at it, atomically.
    /// Returns the number of signups removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let mut tx = begin_write(pool).await?;
        if fetch_activity(&mut *tx, id).await?.is_none() {
            return Err(AppError::NotFound(Resource::Activity));
        }
        tracing::debug!(sql = %DELETE_SIGNUPS, activity_id = id, "query (tx)");
        let signups = sqlx::query(DELETE_SIGNUPS)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(sql = %DELETE, activity_id = id, "query (tx)");
        sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        tracing::info!(activity_id = id, signups, "activity deleted");
        Ok(signups)
    }
}

pub(crate) async fn fetch_activity<'e, E>(
    executor: E,
    id: i64,
) -> Result<Option<Activity>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    tracing::debug!(sql = %SELECT_ONE, activity_id = id, "query");
    sqlx::query_as::<_, Activity>(SELECT_ONE)
        .bind(id)
        .fetch_optional(executor)
        .await
}

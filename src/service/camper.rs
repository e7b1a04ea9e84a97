use crate::error::{AppError, Resource};
use crate::model::{Camper, CamperPatch, NewCamper, SignupWithActivity};
use crate::service::validation::{apply_camper_patch, validate_new_camper};
use crate::store::begin_write;
use sqlx::{Executor, Sqlite, SqlitePool};

const SELECT_ALL: &str = "SELECT id, name, age FROM campers ORDER BY id";
const SELECT_ONE: &str = "SELECT id, name, age FROM campers WHERE id = ?";
const SELECT_SIGNUPS: &str = r#"
    SELECT s.id, s.time, s.camper_id, s.activity_id,
           a.name AS activity_name, a.difficulty AS activity_difficulty
    FROM signups s
    JOIN activities a ON a.id = s.activity_id
    WHERE s.camper_id = ?
    ORDER BY s.id
"#;
const INSERT: &str = "INSERT INTO campers (name, age) VALUES (?, ?) RETURNING id, name, age";
const UPDATE: &str = "UPDATE campers SET name = ?, age = ? WHERE id = ? RETURNING id, name, age";
const DELETE_SIGNUPS: &str = "DELETE FROM signups WHERE camper_id = ?";
const DELETE: &str = "DELETE FROM campers WHERE id = ?";

pub struct CamperService;

impl CamperService {
    /// All campers ordered by id.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Camper>, AppError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Camper>(SELECT_ALL)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Camper>, AppError> {
        Ok(fetch_camper(pool, id).await?)
    }

    /// Camper with its signups, each joined with its activity. Both reads share one snapshot.
    pub async fn read_detail(
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<(Camper, Vec<SignupWithActivity>)>, AppError> {
        let mut tx = pool.begin().await?;
        let Some(camper) = fetch_camper(&mut *tx, id).await? else {
            return Ok(None);
        };
        tracing::debug!(sql = %SELECT_SIGNUPS, camper_id = id, "query (tx)");
        let signups = sqlx::query_as::<_, SignupWithActivity>(SELECT_SIGNUPS)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some((camper, signups)))
    }

    pub async fn create(pool: &SqlitePool, input: &NewCamper) -> Result<Camper, AppError> {
        let valid = validate_new_camper(input)?;
        let mut tx = begin_write(pool).await?;
        tracing::debug!(sql = %INSERT, name = %valid.name, age = valid.age, "query (tx)");
        let camper = sqlx::query_as::<_, Camper>(INSERT)
            .bind(valid.name)
            .bind(valid.age)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from_write)?;
        tx.commit().await.map_err(AppError::from_write)?;
        tracing::info!(camper_id = camper.id, "camper created");
        Ok(camper)
    }

    /// Apply a partial update. Either every present field is written or none is.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        patch: &CamperPatch,
    ) -> Result<Camper, AppError> {
        let mut tx = begin_write(pool).await?;
        let current = fetch_camper(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Camper))?;
        let merged = apply_camper_patch(&current.name, current.age, patch)?;
        tracing::debug!(sql = %UPDATE, camper_id = id, name = %merged.name, age = merged.age, "query (tx)");
        let camper = sqlx::query_as::<_, Camper>(UPDATE)
            .bind(merged.name)
            .bind(merged.age)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from_write)?;
        tx.commit().await.map_err(AppError::from_write)?;
        tracing::info!(camper_id = id, "camper updated");
        Ok(camper)
    }

    /// Delete a camper and its signups. Returns the number of signups removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let mut tx = begin_write(pool).await?;
        if fetch_camper(&mut *tx, id).await?.is_none() {
            return Err(AppError::NotFound(Resource::Camper));
        }
        tracing::debug!(sql = %DELETE_SIGNUPS, camper_id = id, "query (tx)");
        let signups = sqlx::query(DELETE_SIGNUPS)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(sql = %DELETE, camper_id = id, "query (tx)");
        sqlx::query(DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        tracing::info!(camper_id = id, signups, "camper deleted");
        Ok(signups)
    }
}

pub(crate) async fn fetch_camper<'e, E>(executor: E, id: i64) -> Result<Option<Camper>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    tracing::debug!(sql = %SELECT_ONE, camper_id = id, "query");
    sqlx::query_as::<_, Camper>(SELECT_ONE)
        .bind(id)
        .fetch_optional(executor)
        .await
}

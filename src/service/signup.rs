use crate::error::{AppError, Resource, ValidationError};
use crate::model::{Activity, Camper, NewSignup, Signup};
use crate::service::activity::fetch_activity;
use crate::service::camper::fetch_camper;
use crate::service::validation::validate_new_signup;
use crate::store::begin_write;
use sqlx::SqlitePool;

const INSERT: &str = r#"
    INSERT INTO signups (time, camper_id, activity_id) VALUES (?, ?, ?)
    RETURNING id, time, camper_id, activity_id
"#;

/// A stored signup together with both rows it links.
#[derive(Debug, Clone)]
pub struct CreatedSignup {
    pub signup: Signup,
    pub camper: Camper,
    pub activity: Activity,
}

pub struct SignupService;

impl SignupService {
    /// Insert a signup. Both references are resolved inside the write transaction, so a
    /// concurrent delete of either parent makes this fail instead of leaving a dangling row.
    pub async fn create(pool: &SqlitePool, input: &NewSignup) -> Result<CreatedSignup, AppError> {
        let valid = validate_new_signup(input)?;
        let mut tx = begin_write(pool).await?;
        let camper = fetch_camper(&mut *tx, valid.camper_id)
            .await?
            .ok_or(ValidationError::UnknownReference {
                resource: Resource::Camper,
                id: valid.camper_id,
            })?;
        let activity = fetch_activity(&mut *tx, valid.activity_id)
            .await?
            .ok_or(ValidationError::UnknownReference {
                resource: Resource::Activity,
                id: valid.activity_id,
            })?;
        tracing::debug!(sql = %INSERT, params = ?valid, "query (tx)");
        let signup = sqlx::query_as::<_, Signup>(INSERT)
            .bind(valid.time)
            .bind(valid.camper_id)
            .bind(valid.activity_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::from_write)?;
        tx.commit().await.map_err(AppError::from_write)?;
        tracing::info!(
            signup_id = signup.id,
            camper_id = signup.camper_id,
            activity_id = signup.activity_id,
            "signup created"
        );
        Ok(CreatedSignup {
            signup,
            camper,
            activity,
        })
    }
}

//! Rows as stored and payloads as received.

use serde::{Deserialize, Deserializer};

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Camper {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: i64,
    pub name: Option<String>,
    pub difficulty: Option<i64>,
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
}

/// A signup joined with its activity, for the camper detail view.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct SignupWithActivity {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub activity_name: Option<String>,
    pub activity_difficulty: Option<i64>,
}

impl SignupWithActivity {
    pub fn activity(&self) -> Activity {
        Activity {
            id: self.activity_id,
            name: self.activity_name.clone(),
            difficulty: self.activity_difficulty,
        }
    }
}

/// POST /campers. Fields are optional here so a missing one is a validation failure,
/// not a decode failure.
#[derive(Deserialize, Debug, Default)]
pub struct NewCamper {
    pub name: Option<String>,
    pub age: Option<i64>,
}

/// PATCH /campers/{id}. Outer `None`: field absent. `Some(None)`: explicit null.
#[derive(Deserialize, Debug, Default)]
pub struct CamperPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct NewSignup {
    pub camper_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub time: Option<i64>,
}

/// Store-level input for activities; there is no HTTP create route.
#[derive(Deserialize, Debug, Clone)]
pub struct NewActivity {
    pub name: Option<String>,
    pub difficulty: Option<i64>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

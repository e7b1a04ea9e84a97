//! Per-endpoint view models. List views are flat; detail views nest one level and never
//! point back at the parent they hang off.

use crate::model::{Activity, Camper, Signup, SignupWithActivity};
use serde::Serialize;

/// `{id, name, age}`: camper list, create and patch responses.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CamperSummary {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// `{id, name, difficulty}`: activity list and nested activity.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: Option<String>,
    pub difficulty: Option<i64>,
}

/// Signup nested under a camper: carries its activity, not the camper again.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CamperSignup {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub activity: ActivitySummary,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CamperDetail {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub signups: Vec<CamperSignup>,
}

/// Signup with both ends, each cut before their own `signups`.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct SignupDetail {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub camper: CamperSummary,
    pub activity: ActivitySummary,
}

pub fn camper_summary(camper: Camper) -> CamperSummary {
    CamperSummary {
        id: camper.id,
        name: camper.name,
        age: camper.age,
    }
}

pub fn activity_summary(activity: Activity) -> ActivitySummary {
    ActivitySummary {
        id: activity.id,
        name: activity.name,
        difficulty: activity.difficulty,
    }
}

pub fn camper_detail(camper: Camper, signups: Vec<SignupWithActivity>) -> CamperDetail {
    CamperDetail {
        id: camper.id,
        name: camper.name,
        age: camper.age,
        signups: signups
            .into_iter()
            .map(|s| CamperSignup {
                activity: activity_summary(s.activity()),
                id: s.id,
                time: s.time,
                camper_id: s.camper_id,
                activity_id: s.activity_id,
            })
            .collect(),
    }
}

pub fn signup_detail(signup: Signup, camper: Camper, activity: Activity) -> SignupDetail {
    SignupDetail {
        id: signup.id,
        time: signup.time,
        camper_id: signup.camper_id,
        activity_id: signup.activity_id,
        camper: camper_summary(camper),
        activity: activity_summary(activity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn camper() -> Camper {
        Camper {
            id: 1,
            name: "Caitlin".into(),
            age: 12,
        }
    }

    #[test]
    fn camper_detail_nests_activity_but_not_camper() {
        let signups = vec![SignupWithActivity {
            id: 5,
            time: 9,
            camper_id: 1,
            activity_id: 2,
            activity_name: Some("Archery".into()),
            activity_difficulty: Some(3),
        }];
        let value = serde_json::to_value(camper_detail(camper(), signups)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1, "name": "Caitlin", "age": 12,
                "signups": [{
                    "id": 5, "time": 9, "camper_id": 1, "activity_id": 2,
                    "activity": { "id": 2, "name": "Archery", "difficulty": 3 }
                }]
            })
        );
    }

    #[test]
    fn signup_detail_cuts_back_references() {
        let signup = Signup {
            id: 7,
            time: 23,
            camper_id: 1,
            activity_id: 2,
        };
        let activity = Activity {
            id: 2,
            name: Some("Hiking".into()),
            difficulty: Some(2),
        };
        let value = serde_json::to_value(signup_detail(signup, camper(), activity)).unwrap();
        assert!(value["camper"].get("signups").is_none());
        assert!(value["activity"].get("signups").is_none());
        assert_eq!(value["camper"]["name"], "Caitlin");
    }
}

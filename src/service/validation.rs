//! Field validators run before any write reaches the store.

use crate::error::ValidationError;
use crate::model::{CamperPatch, NewCamper, NewSignup};

pub const MIN_CAMPER_AGE: i64 = 8;
pub const MAX_CAMPER_AGE: i64 = 18;
pub const MIN_SIGNUP_TIME: i64 = 0;
pub const MAX_SIGNUP_TIME: i64 = 23;

pub fn validate_camper_name(name: Option<&str>) -> Result<&str, ValidationError> {
    match name {
        Some(n) if !n.is_empty() => Ok(n),
        _ => Err(ValidationError::NameRequired),
    }
}

pub fn validate_camper_age(age: Option<i64>) -> Result<i64, ValidationError> {
    let age = age.ok_or(ValidationError::AgeRequired)?;
    if !(MIN_CAMPER_AGE..=MAX_CAMPER_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    Ok(age)
}

pub fn validate_signup_time(time: Option<i64>) -> Result<i64, ValidationError> {
    let time = time.ok_or(ValidationError::TimeRequired)?;
    if !(MIN_SIGNUP_TIME..=MAX_SIGNUP_TIME).contains(&time) {
        return Err(ValidationError::TimeOutOfRange(time));
    }
    Ok(time)
}

/// A camper that passed every field check.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidCamper<'a> {
    pub name: &'a str,
    pub age: i64,
}

pub fn validate_new_camper(input: &NewCamper) -> Result<ValidCamper<'_>, ValidationError> {
    Ok(ValidCamper {
        name: validate_camper_name(input.name.as_deref())?,
        age: validate_camper_age(input.age)?,
    })
}

/// Fold a patch onto the current values. Absent fields keep their value; an explicit
/// null is checked like any other assignment and fails.
pub fn apply_camper_patch<'a>(
    current_name: &'a str,
    current_age: i64,
    patch: &'a CamperPatch,
) -> Result<ValidCamper<'a>, ValidationError> {
    let name = match &patch.name {
        Some(assigned) => validate_camper_name(assigned.as_deref())?,
        None => current_name,
    };
    let age = match patch.age {
        Some(assigned) => validate_camper_age(assigned)?,
        None => current_age,
    };
    Ok(ValidCamper { name, age })
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidSignup {
    pub camper_id: i64,
    pub activity_id: i64,
    pub time: i64,
}

pub fn validate_new_signup(input: &NewSignup) -> Result<ValidSignup, ValidationError> {
    let time = validate_signup_time(input.time)?;
    let camper_id = input
        .camper_id
        .ok_or(ValidationError::MissingReference("camper_id"))?;
    let activity_id = input
        .activity_id
        .ok_or(ValidationError::MissingReference("activity_id"))?;
    Ok(ValidSignup {
        camper_id,
        activity_id,
        time,
    })
}

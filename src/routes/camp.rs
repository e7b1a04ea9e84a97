//! Camper, activity and signup routes.

use crate::handlers::{activity, camper, home, signup};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn camp_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/campers", get(camper::list).post(camper::create))
        .route("/campers/:id", get(camper::read).patch(camper::update))
        .route("/activities", get(activity::list))
        .route("/activities/:id", delete(activity::delete))
        .route("/signups", post(signup::create))
        .with_state(state)
}

//! Camp signups: REST backend for campers, activities and the signups linking them.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, Resource, ValidationError};
pub use routes::{app, camp_routes, common_routes, common_routes_with_ready};
pub use service::{ActivityService, CamperService, SignupService};
pub use state::AppState;
pub use store::{ensure_schema, open, seed_demo_data};

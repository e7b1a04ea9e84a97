//! Store operations per resource. Every mutation runs in a single transaction.

mod activity;
mod camper;
mod signup;
pub mod validation;

pub use activity::ActivityService;
pub use camper::CamperService;
pub use signup::{CreatedSignup, SignupService};

//! Jobs module - domain models, constants, and repository traits.

mod jobs_constants;
mod jobs_model;
mod jobs_traits;

pub use jobs_constants::*;
pub use jobs_model::{Job, JobMember, JobRate};
pub use jobs_traits::JobRepositoryTrait;

//! CLI command implementations.

mod complete;
mod config;
mod doctor;
mod post;
mod run;

pub use complete::run_complete;
pub use config::run_config;
pub use doctor::run_doctor;
pub use post::run_post;
pub use run::{run_pipeline, RunOverrides};

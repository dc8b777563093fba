//! Pipeline entry points for profile-views operations.
//!
//! - `run_update`: Fetch the badge, extract the count, persist state
//! - `run_like`: Bump the likes counter
//! - `run_render`: Re-render the local badge from stored state
//! - `run_show`: Print stored state
//! - `run_validate`: Check configuration
//! - `run_extract`: Extract the count from a saved badge file

pub mod extract;
pub mod like;
pub mod render;
pub mod show;
pub mod update;
pub mod validate;

pub use extract::run_extract;
pub use like::run_like;
pub use render::run_render;
pub use show::run_show;
pub use update::{UpdateSummary, run_update};
pub use validate::run_validate;

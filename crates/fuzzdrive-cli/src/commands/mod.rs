//! Command implementations.

pub mod aggregate;
pub mod compute;
pub mod config;
pub mod rules;
pub mod terms;

pub use self::aggregate::execute_aggregate;
pub use self::compute::{execute_compute, execute_system};
pub use self::config::execute_config;
pub use self::rules::execute_rules;
pub use self::terms::execute_terms;

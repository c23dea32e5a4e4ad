//! Configuration loading for the Working-Day Calendar Engine.
//!
//! This module loads an organization's calendar snapshot (weekly-off
//! policies, holidays, calendar exceptions and leave allocations) from a
//! directory of YAML files and validates it before use.
//!
//! # Example
//!
//! ```no_run
//! use school_calendar::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/greenwood_high").unwrap();
//! println!("Loaded organization: {}", config.organization().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ExceptionsConfig, HolidayYearConfig, LeaveAllocationsConfig, PoliciesConfig};

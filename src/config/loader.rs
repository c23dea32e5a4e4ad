//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading an
//! organization's calendar snapshot from YAML files.

use chrono::Datelike;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::calculation::{WorkingDayCalendar, validate_leave_allocation};
use crate::error::{CalendarError, CalendarResult};
use crate::models::{Holiday, Organization, OrganizationCalendar};

use super::types::{ExceptionsConfig, HolidayYearConfig, LeaveAllocationsConfig, PoliciesConfig};

/// Loads and validates one organization's calendar snapshot.
///
/// # Directory Structure
///
/// ```text
/// config/greenwood_high/
/// ├── organization.yaml         # Organization id and name
/// ├── weekly_off_policies.yaml  # Weekly-off policy history
/// ├── calendar_exceptions.yaml  # Per-date overrides
/// ├── leave_allocations.yaml    # Leave entitlements
/// └── holidays/
///     └── 2024.yaml             # Holidays of one calendar year
/// ```
///
/// # Example
///
/// ```no_run
/// use school_calendar::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/greenwood_high").unwrap();
/// println!("Loaded organization: {}", loader.organization().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    calendar: OrganizationCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing or unparseable, if a
    /// holiday file contains dates outside its year, or if the resulting
    /// snapshot fails integrity checks (overlapping policies, duplicate
    /// holidays or exceptions, invalid leave allocations).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use school_calendar::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/greenwood_high")?;
    /// # Ok::<(), school_calendar::error::CalendarError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> CalendarResult<Self> {
        let path = path.as_ref();

        let organization = Self::load_yaml::<Organization>(&path.join("organization.yaml"))?;
        let policies = Self::load_yaml::<PoliciesConfig>(&path.join("weekly_off_policies.yaml"))?;
        let exceptions =
            Self::load_yaml::<ExceptionsConfig>(&path.join("calendar_exceptions.yaml"))?;
        let allocations =
            Self::load_yaml::<LeaveAllocationsConfig>(&path.join("leave_allocations.yaml"))?;
        let holidays = Self::load_holidays(&path.join("holidays"))?;

        let calendar = OrganizationCalendar::new(
            organization,
            policies.policies,
            holidays,
            exceptions.exceptions,
            allocations.allocations,
        );
        Self::validate(&calendar)?;

        debug!(
            organization_id = %calendar.id(),
            policies = calendar.policies.len(),
            holidays = calendar.holidays.len(),
            exceptions = calendar.exceptions.len(),
            leave_allocations = calendar.leave_allocations.len(),
            "Loaded organization calendar"
        );

        Ok(Self { calendar })
    }

    /// Loads every organization directory directly under `root`.
    ///
    /// Directories are loaded in name order; any failure aborts the load.
    pub fn load_all<P: AsRef<Path>>(root: P) -> CalendarResult<Vec<Self>> {
        let root = root.as_ref();
        let root_str = root.display().to_string();

        let entries = fs::read_dir(root).map_err(|_| CalendarError::ConfigNotFound {
            path: root_str.clone(),
        })?;

        let mut dirs: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| CalendarError::ConfigNotFound {
                path: root_str.clone(),
            })?;
            if entry.path().is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        if dirs.is_empty() {
            return Err(CalendarError::ConfigNotFound {
                path: format!("{} (no organization directories found)", root_str),
            });
        }

        dirs.iter().map(Self::load).collect()
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CalendarResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CalendarError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CalendarError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all holiday files from the holidays directory.
    ///
    /// A missing directory means the organization has no holidays.
    fn load_holidays(holidays_dir: &Path) -> CalendarResult<Vec<Holiday>> {
        let dir_str = holidays_dir.display().to_string();

        if !holidays_dir.exists() {
            debug!(path = %dir_str, "No holidays directory; continuing without holidays");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(holidays_dir).map_err(|_| CalendarError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut holidays = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| CalendarError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let year_config = Self::load_yaml::<HolidayYearConfig>(&path)?;
                if let Some(stray) = year_config
                    .holidays
                    .iter()
                    .find(|h| h.date.year() != year_config.year)
                {
                    return Err(CalendarError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "holiday '{}' on {} is outside year {}",
                            stray.name, stray.date, year_config.year
                        ),
                    });
                }
                holidays.extend(year_config.holidays);
            }
        }

        Ok(holidays)
    }

    /// Runs the snapshot integrity checks.
    fn validate(calendar: &OrganizationCalendar) -> CalendarResult<()> {
        WorkingDayCalendar::from_snapshot(calendar)?;
        for allocation in &calendar.leave_allocations {
            validate_leave_allocation(allocation)?;
        }
        Ok(())
    }

    /// Returns the loaded calendar snapshot.
    pub fn calendar(&self) -> &OrganizationCalendar {
        &self.calendar
    }

    /// Consumes the loader, returning the calendar snapshot.
    pub fn into_calendar(self) -> OrganizationCalendar {
        self.calendar
    }

    /// Returns the organization metadata.
    pub fn organization(&self) -> &Organization {
        &self.calendar.organization
    }
}

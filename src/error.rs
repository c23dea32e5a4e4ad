//! Error types for the Working-Day Calendar Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while evaluating a calendar.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the calendar engine.
///
/// Every operation in the engine returns this error type. The set of
/// variants is closed so that the API layer can map each one to a stable
/// error code exactly once.
///
/// # Example
///
/// ```
/// use school_calendar::error::CalendarError;
///
/// let error = CalendarError::InvalidDate {
///     input: "2024-02-30".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid date '2024-02-30': expected YYYY-MM-DD");
/// ```
#[derive(Debug, Error)]
pub enum CalendarError {
    /// A date could not be parsed or lies outside the supported range.
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The raw input that failed to parse.
        input: String,
    },

    /// The end of a range precedes its start.
    #[error("Invalid range: end date {end} precedes start date {start}")]
    InvalidRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A range spans more days than a single request may evaluate.
    #[error("Range {start} to {end} exceeds the limit of {max_days} days")]
    RangeTooLong {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
        /// The longest accepted range, in days.
        max_days: i64,
    },

    /// Two weekly-off policies claim overlapping effective intervals.
    #[error(
        "Weekly-off policies effective from {first_from} and {second_from} have overlapping intervals"
    )]
    PolicyOverlap {
        /// Start of the earlier policy.
        first_from: NaiveDate,
        /// Start of the later policy.
        second_from: NaiveDate,
    },

    /// Scoped records for the same date disagree and cannot be resolved.
    #[error("Ambiguous {kind} scope on {date}: {message}")]
    AmbiguousScope {
        /// The kind of record ("calendar exception", "holiday").
        kind: String,
        /// The date with conflicting records.
        date: NaiveDate,
        /// A description of the conflict.
        message: String,
    },

    /// A holiday or calendar exception is neither organization-wide nor
    /// scoped to any class.
    #[error("The {kind} on {date} applies to no classes")]
    EmptyScope {
        /// The kind of record ("holiday", "calendar exception").
        kind: String,
        /// The date of the offending record.
        date: NaiveDate,
    },

    /// A weekly-off policy has an empty or inverted effective interval.
    #[error("Invalid weekly-off policy effective from {effective_from}: {message}")]
    InvalidPolicy {
        /// Start of the offending policy.
        effective_from: NaiveDate,
        /// A description of what made the policy invalid.
        message: String,
    },

    /// Two records of the same kind claim the same date and scope.
    #[error("Duplicate {kind} on {date}")]
    DuplicateRecord {
        /// The kind of record ("holiday", "calendar exception").
        kind: String,
        /// The duplicated date.
        date: NaiveDate,
    },

    /// A leave allocation violates its invariants.
    #[error("Invalid leave allocation '{leave_type}': {message}")]
    InvalidLeaveAllocation {
        /// The leave type of the offending allocation.
        leave_type: String,
        /// A description of what made the allocation invalid.
        message: String,
    },

    /// No calendar snapshot is loaded for the organization.
    #[error("Organization not found: {organization_id}")]
    OrganizationNotFound {
        /// The organization that was requested.
        organization_id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return CalendarError.
pub type CalendarResult<T> = Result<T, CalendarError>;

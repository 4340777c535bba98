//! Per-flow form state.
//!
//! Plain data, no UI-framework types: field values, per-field validation
//! errors, the submission-in-flight flag, and the "has the user attempted
//! submit" flag that gates whether errors are *shown*. Validation itself is
//! run by the owning flow; this type only records the results.

use std::collections::HashMap;
use std::hash::Hash;

/// Ephemeral state behind one form.
///
/// `F` is the flow's field enum (`Copy + Eq + Hash`). Errors exist
/// internally as soon as validation runs, but [`FormState::visible_error`]
/// suppresses them until the first submit attempt so a half-typed form is
/// not covered in red.
#[derive(Debug, Clone)]
pub struct FormState<F> {
    values: HashMap<F, String>,
    errors: HashMap<F, &'static str>,
    submit_attempted: bool,
    in_flight: bool,
}

impl<F: Copy + Eq + Hash> FormState<F> {
    /// Fresh form with empty values and no errors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            errors: HashMap::new(),
            submit_attempted: false,
            in_flight: false,
        }
    }

    /// Current value of a field (empty string when never set).
    #[must_use]
    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Replace a field's value. The owning flow re-validates afterwards.
    pub fn set_value(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Record a validation result for a field.
    pub fn set_validation(&mut self, field: F, result: Result<(), &'static str>) {
        match result {
            Ok(()) => self.errors.remove(&field),
            Err(message) => self.errors.insert(field, message),
        };
    }

    /// The field's current validation error, shown or not.
    #[must_use]
    pub fn error(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// The field's validation error, but only once a submit was attempted.
    #[must_use]
    pub fn visible_error(&self, field: F) -> Option<&'static str> {
        if self.submit_attempted {
            self.error(field)
        } else {
            None
        }
    }

    /// True when no field currently has a validation error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record that the user has attempted to submit at least once.
    pub fn mark_submit_attempted(&mut self) {
        self.submit_attempted = true;
    }

    /// Whether a submit has been attempted (the error-display gate).
    #[must_use]
    pub const fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Mark the submission in flight; the submit control shows a loading
    /// state while this is set.
    pub fn begin_submit(&mut self) {
        self.in_flight = true;
    }

    /// Clear the in-flight flag.
    pub fn end_submit(&mut self) {
        self.in_flight = false;
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Reset to a fresh form (successful Registration/Login submissions).
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.submit_attempted = false;
        self.in_flight = false;
    }
}

impl<F: Copy + Eq + Hash> Default for FormState<F> {
    fn default() -> Self {
        Self::new()
    }
}

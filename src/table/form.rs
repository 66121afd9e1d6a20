//! Search form: explicit-submit global filter with length validation

use crate::constants::{FILTER_MAX_CHARS, FILTER_MAX_MESSAGE};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{}", FILTER_MAX_MESSAGE)]
    TooLong,
}

/// Check filter text before it is applied
pub fn validate_filter(text: &str) -> Result<(), FilterError> {
    if text.chars().count() > FILTER_MAX_CHARS {
        return Err(FilterError::TooLong);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Nothing typed yet
    Idle,
    Dirty,
    Applied,
}

#[derive(Debug, Clone)]
pub struct FilterForm {
    pub input: String,
    phase: FormPhase,
    error: Option<FilterError>,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            input: String::new(),
            phase: FormPhase::Idle,
            error: None,
        }
    }
}

impl FilterForm {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&FilterError> {
        self.error.as_ref()
    }

    /// Call after `input` changed. Once a submit has failed, the text is
    /// re-validated on every edit so the message clears as soon as it fits.
    pub fn on_edit(&mut self) {
        self.phase = FormPhase::Dirty;
        if self.error.is_some() {
            self.error = validate_filter(&self.input).err();
        }
    }

    /// Returns the filter text to apply, or `None` when validation fails.
    pub fn submit(&mut self) -> Option<String> {
        match validate_filter(&self.input) {
            Ok(()) => {
                debug!(filter = %self.input, "Filter submitted");
                self.phase = FormPhase::Applied;
                self.error = None;
                Some(self.input.clone())
            }
            Err(e) => {
                warn!(error = %e, chars = self.input.chars().count(), "Filter rejected");
                self.phase = FormPhase::Dirty;
                self.error = Some(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_chars_pass_twenty_one_fail() {
        assert!(validate_filter(&"a".repeat(20)).is_ok());
        let err = validate_filter(&"a".repeat(21)).unwrap_err();
        assert_eq!(err.to_string(), "Maximum 20 characters allowed");
        // Limit counts characters, not bytes
        assert!(validate_filter(&"é".repeat(20)).is_ok());
    }

    #[test]
    fn submit_moves_through_phases() {
        let mut form = FilterForm::default();
        assert_eq!(form.phase(), FormPhase::Idle);

        form.input = "amy".into();
        form.on_edit();
        assert_eq!(form.phase(), FormPhase::Dirty);
        assert_eq!(form.submit().as_deref(), Some("amy"));
        assert_eq!(form.phase(), FormPhase::Applied);
        assert!(form.error().is_none());
    }

    #[test]
    fn rejected_submit_stays_dirty_until_fixed() {
        let mut form = FilterForm::default();
        form.input = "x".repeat(21);
        form.on_edit();
        assert_eq!(form.submit(), None);
        assert_eq!(form.phase(), FormPhase::Dirty);
        assert_eq!(
            form.error().map(|e| e.to_string()).as_deref(),
            Some(FILTER_MAX_MESSAGE)
        );

        form.input.pop();
        form.on_edit();
        assert!(form.error().is_none());
        assert_eq!(form.submit().map(|s| s.len()), Some(20));
    }

    #[test]
    fn empty_submit_is_valid() {
        let mut form = FilterForm::default();
        assert_eq!(form.submit().as_deref(), Some(""));
    }
}

//! View state for the dashboard
//!
//! Each fetched result (historical levels, predictions, comparison) lives in
//! its own [`Slot`], a small state machine: `Idle -> Loading -> Ready |
//! Failed`. Slots carry a monotonically increasing request generation so
//! that when requests overlap, only the most recently issued one may write
//! its result - a response arriving for a superseded request is discarded.
//!
//! [`Selections`] holds what the user has chosen (city, day counts, active
//! view) and validates day counts against the service bounds before they
//! are used anywhere.

use thiserror::Error;

/// Allowed range for the forecast horizon, in days
pub const MIN_FORECAST_DAYS: u16 = 1;
pub const MAX_FORECAST_DAYS: u16 = 30;

/// Allowed range for the held-out comparison window, in days
pub const MIN_TEST_DAYS: u16 = 1;
pub const MAX_TEST_DAYS: u16 = 14;

/// Errors from selection updates
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    DaysOutOfRange {
        field: &'static str,
        value: u16,
        min: u16,
        max: u16,
    },
}

/// Validate a forecast horizon against [`MIN_FORECAST_DAYS`]..=[`MAX_FORECAST_DAYS`]
pub fn validate_forecast_days(days: u16) -> Result<u16, StateError> {
    if (MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(StateError::DaysOutOfRange {
            field: "days to predict",
            value: days,
            min: MIN_FORECAST_DAYS,
            max: MAX_FORECAST_DAYS,
        })
    }
}

/// Validate a comparison window against [`MIN_TEST_DAYS`]..=[`MAX_TEST_DAYS`]
pub fn validate_test_days(days: u16) -> Result<u16, StateError> {
    if (MIN_TEST_DAYS..=MAX_TEST_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(StateError::DaysOutOfRange {
            field: "test days",
            value: days,
            min: MIN_TEST_DAYS,
            max: MAX_TEST_DAYS,
        })
    }
}

/// Lifecycle phase of a result slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request has been issued yet
    Idle,
    /// The most recent request is in flight
    Loading,
    /// The most recent request succeeded
    Ready,
    /// The most recent request failed (earlier data may still be held)
    Failed,
}

/// Token identifying one issued request against a slot
///
/// Returned by [`Slot::begin`] and handed back to [`Slot::complete`]; a
/// token from a superseded request no longer matches the slot's generation
/// and its result is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A named result holder with last-writer-wins completion
///
/// Failure does not clear previously fetched data: the dashboard keeps
/// showing the last good series next to the error message.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    phase: Phase,
    data: Option<T>,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request against this slot
    ///
    /// Any request issued earlier is superseded from this point on, even if
    /// it is still in flight.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.phase = Phase::Loading;
        RequestToken(self.generation)
    }

    /// Apply the result of a request, unless it has been superseded
    ///
    /// Returns `false` (and changes nothing) when `token` does not belong to
    /// the most recently issued request. On success the slot becomes
    /// `Ready` with the new data; on failure it becomes `Failed` with the
    /// message, retaining whatever data it held before.
    pub fn complete(&mut self, token: RequestToken, result: Result<T, String>) -> bool {
        if token.0 != self.generation {
            return false;
        }
        match result {
            Ok(data) => {
                self.phase = Phase::Ready;
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.phase = Phase::Failed;
                self.error = Some(message);
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Last successfully fetched data, if any
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error from the most recent request, if it failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Which chart the dashboard is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Predict,
    Compare,
}

/// The user's current choices
///
/// Owned exclusively by the controller; everything downstream reads.
#[derive(Debug, Clone)]
pub struct Selections {
    city: Option<String>,
    days_to_predict: u16,
    test_days: u16,
    view: View,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            city: None,
            days_to_predict: 7,
            test_days: 7,
            view: View::default(),
        }
    }
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Change the selected city; returns whether the selection changed
    ///
    /// The caller re-triggers the historical fetch when this returns `true`.
    pub fn select_city(&mut self, city: impl Into<String>) -> bool {
        let city = city.into();
        if self.city.as_deref() == Some(city.as_str()) {
            return false;
        }
        self.city = Some(city);
        true
    }

    pub fn days_to_predict(&self) -> u16 {
        self.days_to_predict
    }

    pub fn set_days_to_predict(&mut self, days: u16) -> Result<(), StateError> {
        self.days_to_predict = validate_forecast_days(days)?;
        Ok(())
    }

    pub fn test_days(&self) -> u16 {
        self.test_days
    }

    pub fn set_test_days(&mut self, days: u16) -> Result<(), StateError> {
        self.test_days = validate_test_days(days)?;
        Ok(())
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_lifecycle() {
        let mut slot: Slot<Vec<u32>> = Slot::new();
        assert_eq!(slot.phase(), Phase::Idle);
        assert!(slot.data().is_none());

        let token = slot.begin();
        assert!(slot.is_loading());

        assert!(slot.complete(token, Ok(vec![1, 2, 3])));
        assert_eq!(slot.phase(), Phase::Ready);
        assert_eq!(slot.data(), Some(&vec![1, 2, 3]));
        assert!(slot.error().is_none());
    }

    #[test]
    fn test_failure_preserves_previous_data() {
        let mut slot: Slot<u32> = Slot::new();
        let token = slot.begin();
        slot.complete(token, Ok(7));

        let token = slot.begin();
        assert!(slot.complete(token, Err("connection refused".to_string())));
        assert_eq!(slot.phase(), Phase::Failed);
        assert_eq!(slot.error(), Some("connection refused"));
        // The last good value stays available for display
        assert_eq!(slot.data(), Some(&7));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        // Request A (city X), then request B (city Y) before A resolves.
        let mut slot: Slot<&str> = Slot::new();
        let token_a = slot.begin();
        let token_b = slot.begin();

        // B resolves first and wins.
        assert!(slot.complete(token_b, Ok("city Y result")));
        // A arrives late and must be dropped.
        assert!(!slot.complete(token_a, Ok("city X result")));

        assert_eq!(slot.phase(), Phase::Ready);
        assert_eq!(slot.data(), Some(&"city Y result"));
    }

    #[test]
    fn test_stale_failure_does_not_disturb_newer_result() {
        let mut slot: Slot<u32> = Slot::new();
        let token_a = slot.begin();
        let token_b = slot.begin();

        assert!(slot.complete(token_b, Ok(42)));
        assert!(!slot.complete(token_a, Err("timeout".to_string())));
        assert_eq!(slot.phase(), Phase::Ready);
        assert!(slot.error().is_none());
        assert_eq!(slot.data(), Some(&42));
    }

    #[test]
    fn test_begin_while_loading_supersedes() {
        let mut slot: Slot<u32> = Slot::new();
        let token_a = slot.begin();
        assert!(slot.is_loading());
        let _token_b = slot.begin();
        assert!(slot.is_loading());
        assert!(!slot.complete(token_a, Ok(1)));
        assert!(slot.data().is_none());
    }

    #[test]
    fn test_day_count_bounds() {
        assert!(validate_forecast_days(1).is_ok());
        assert!(validate_forecast_days(30).is_ok());
        assert!(validate_forecast_days(0).is_err());
        assert!(validate_forecast_days(31).is_err());

        assert!(validate_test_days(14).is_ok());
        assert!(validate_test_days(15).is_err());
    }

    #[test]
    fn test_selections_reject_out_of_range_days() {
        let mut selections = Selections::new();
        assert!(selections.set_days_to_predict(31).is_err());
        assert_eq!(selections.days_to_predict(), 7);
        assert!(selections.set_days_to_predict(14).is_ok());
        assert_eq!(selections.days_to_predict(), 14);

        assert!(selections.set_test_days(0).is_err());
        assert_eq!(selections.test_days(), 7);
    }

    #[test]
    fn test_select_city_reports_changes() {
        let mut selections = Selections::new();
        assert!(selections.select_city("caicara"));
        assert!(!selections.select_city("caicara"));
        assert!(selections.select_city("palua"));
        assert_eq!(selections.city(), Some("palua"));
    }
}

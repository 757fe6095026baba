//! The state shared by the ledger route handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use time::{Date, OffsetDateTime};

use crate::{AppState, Error, ledger::LedgerController, timezone::get_local_offset};

/// The state needed to show and change the ledger.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// The controller that owns the ledger.
    pub controller: Arc<Mutex<LedgerController>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            controller: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl LedgerState {
    pub(super) fn lock(&self) -> Result<MutexGuard<'_, LedgerController>, Error> {
        self.controller
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
            .map_err(|_| Error::LedgerLockError)
    }

    /// Today's date in the local timezone, used for transactions without a date.
    pub(super) fn today(&self) -> Result<Date, Error> {
        let local_offset = get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })?;

        Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
    }
}


#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::Error;

    use super::test_state::get_test_state;

    #[test]
    fn today_uses_local_timezone() {
        let state = get_test_state();

        assert_eq!(state.today(), Ok(OffsetDateTime::now_utc().date()));
    }

    #[test]
    fn today_fails_on_invalid_timezone() {
        let mut state = get_test_state();
        state.local_timezone = "Mars/Olympus_Mons".to_owned();

        assert_eq!(
            state.today(),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }
}

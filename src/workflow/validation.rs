use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::holiday::HolidayOracle;

/// Why a proposed last working day was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LwdRejection {
    #[error("Last working day cannot be on a weekend")]
    Weekend,

    #[error("Last working day cannot be a holiday")]
    Holiday,
}

/// Decide whether a proposed last working day is acceptable.
///
/// The weekend check runs first and locally; only a weekday reaches the
/// holiday oracle. An oracle failure is logged and treated as "not a holiday"
/// (fail-open) so an outage never blocks a submission.
pub async fn validate_last_working_day<O: HolidayOracle>(
    oracle: &O,
    date: NaiveDate,
    country: &str,
) -> Result<(), LwdRejection> {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(LwdRejection::Weekend);
    }

    match oracle.is_holiday(date, country).await {
        Ok(true) => Err(LwdRejection::Holiday),
        Ok(false) => Ok(()),
        Err(e) => {
            tracing::warn!(
                error = %e,
                %date,
                country,
                "Holiday lookup failed, treating date as non-holiday"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::Duration;
    use futures::executor::block_on;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubOracle {
        holiday: bool,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubOracle {
        fn answering(holiday: bool) -> Self {
            Self {
                holiday,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                holiday: false,
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl HolidayOracle for StubOracle {
        async fn is_holiday(&self, _date: NaiveDate, _country: &str) -> anyhow::Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("calendar service unavailable");
            }
            Ok(self.holiday)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn saturday_rejected_without_oracle_call() {
        let oracle = StubOracle::answering(false);
        let saturday = date(2026, 3, 7);
        assert_eq!(saturday.weekday(), Weekday::Sat);

        let verdict = block_on(validate_last_working_day(&oracle, saturday, "US"));

        assert_eq!(verdict, Err(LwdRejection::Weekend));
        assert_eq!(oracle.call_count(), 0);
    }

    #[test]
    fn sunday_rejected_without_oracle_call() {
        let oracle = StubOracle::answering(false);
        let sunday = date(2026, 3, 8);
        assert_eq!(sunday.weekday(), Weekday::Sun);

        let verdict = block_on(validate_last_working_day(&oracle, sunday, "US"));

        assert_eq!(verdict, Err(LwdRejection::Weekend));
        assert_eq!(oracle.call_count(), 0);
    }

    #[test]
    fn weekday_holiday_rejected() {
        let oracle = StubOracle::answering(true);
        let tuesday = date(2026, 3, 10);
        assert_eq!(tuesday.weekday(), Weekday::Tue);

        let verdict = block_on(validate_last_working_day(&oracle, tuesday, "US"));

        assert_eq!(verdict, Err(LwdRejection::Holiday));
        assert_eq!(oracle.call_count(), 1);
    }

    #[test]
    fn plain_weekday_accepted() {
        let oracle = StubOracle::answering(false);
        let tuesday = date(2026, 3, 10);

        let verdict = block_on(validate_last_working_day(&oracle, tuesday, "US"));

        assert_eq!(verdict, Ok(()));
        assert_eq!(oracle.call_count(), 1);
    }

    #[test]
    fn oracle_failure_fails_open() {
        let oracle = StubOracle::failing();
        let tuesday = date(2026, 3, 10);

        let verdict = block_on(validate_last_working_day(&oracle, tuesday, "US"));

        assert_eq!(verdict, Ok(()));
        assert_eq!(oracle.call_count(), 1);
    }

    proptest! {
        #[test]
        fn every_weekend_date_is_rejected(offset in 0i64..3650) {
            let day = date(2024, 1, 1) + Duration::days(offset);
            prop_assume!(matches!(day.weekday(), Weekday::Sat | Weekday::Sun));

            let oracle = StubOracle::answering(false);
            let verdict = block_on(validate_last_working_day(&oracle, day, "US"));

            prop_assert_eq!(verdict, Err(LwdRejection::Weekend));
            prop_assert_eq!(oracle.call_count(), 0);
        }
    }
}

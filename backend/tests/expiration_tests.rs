//! Certificate expiration tests
//!
//! Tests for the expiration engine including:
//! - Due date arithmetic per category
//! - Status thresholds and monotonicity
//! - Local date text round trips

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use shared::{
    compute_due_date, compute_elapsed_days, compute_remaining_days, derive_status, evaluate,
    format_local_date, parse_local_date, CertificateRecord, ComplianceSummary, DateError,
    DateInput, Status, ValidityCategory, ValidityPeriod,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    ymd(next_year, next_month, 1).pred_opt().unwrap().day()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// ASO issued 15/03/2024 is due 15/03/2025, 14 days after 01/03/2025
    #[test]
    fn test_aso_renew_soon_scenario() {
        let issued_on = match parse_local_date("15/03/2024") {
            Ok(DateInput::Complete(date)) => date,
            other => panic!("unexpected parse result: {:?}", other),
        };
        let due_on = compute_due_date(issued_on, ValidityCategory::Aso).unwrap();
        assert_eq!(format_local_date(due_on), "15/03/2025");

        let remaining = compute_remaining_days(due_on, ymd(2025, 3, 1));
        assert_eq!(remaining, 14);
        assert_eq!(derive_status(remaining), Status::RenewSoon);
    }

    /// EPI issued 10/01/2023 is due 10/05/2023, long expired by 01/06/2025
    #[test]
    fn test_epi_expired_scenario() {
        let record = CertificateRecord::new(ValidityCategory::Epi, ymd(2023, 1, 10));
        let evaluation = evaluate(&record, ymd(2025, 6, 1)).unwrap();

        assert_eq!(evaluation.due_on, ymd(2023, 5, 10));
        assert!(evaluation.remaining_days < 0);
        assert_eq!(evaluation.status, Status::Expired);
    }

    #[test]
    fn test_impossible_date_is_invalid() {
        assert!(matches!(parse_local_date("31/02/2024"), Err(DateError::Invalid(_))));
    }

    #[test]
    fn test_missing_year_is_incomplete() {
        assert_eq!(parse_local_date("15/03"), Ok(DateInput::Incomplete));
    }

    /// 01/01/9999 + 2 years has no DD/MM/YYYY form
    #[test]
    fn test_due_date_beyond_year_9999_is_out_of_range() {
        let issued_on = match parse_local_date("01/01/9999") {
            Ok(DateInput::Complete(date)) => date,
            other => panic!("unexpected parse result: {:?}", other),
        };
        assert_eq!(
            compute_due_date(issued_on, ValidityCategory::Nr10),
            Err(DateError::OutOfRange)
        );
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(derive_status(-1), Status::Expired);
        assert_eq!(derive_status(0), Status::RenewSoon);
        assert_eq!(derive_status(30), Status::RenewSoon);
        assert_eq!(derive_status(31), Status::Ok);
    }

    /// Same issue date evaluated on successive days walks Ok -> RenewSoon -> Expired
    #[test]
    fn test_status_progression_over_time() {
        let record = CertificateRecord::new(ValidityCategory::Nr10, ymd(2023, 6, 1));
        let status_on = |date: NaiveDate| evaluate(&record, date).unwrap().status;

        assert_eq!(status_on(ymd(2025, 5, 1)), Status::Ok);
        assert_eq!(status_on(ymd(2025, 5, 2)), Status::RenewSoon);
        assert_eq!(status_on(ymd(2025, 6, 1)), Status::RenewSoon);
        assert_eq!(status_on(ymd(2025, 6, 2)), Status::Expired);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for calendar dates in years 0..=max_year, including month ends
    fn dates_up_to(max_year: i32) -> impl Strategy<Value = NaiveDate> {
        (0i32..=max_year, 1u32..=12, 1u32..=31)
            .prop_filter_map("valid calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
    }

    /// Any date the DD/MM/YYYY form can carry
    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        dates_up_to(9999)
    }

    /// Issue dates whose longest validity period still ends by 31/12/9999
    fn issue_date_strategy() -> impl Strategy<Value = NaiveDate> {
        dates_up_to(9997)
    }

    fn year_category_strategy() -> impl Strategy<Value = ValidityCategory> {
        prop::sample::select(ValidityCategory::ALL[..8].to_vec())
    }

    fn category_strategy() -> impl Strategy<Value = ValidityCategory> {
        prop::sample::select(ValidityCategory::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Year-based categories move the year and keep month/day, clamping Feb 29
        #[test]
        fn prop_year_categories_keep_month_and_day(
            issued_on in issue_date_strategy(),
            category in year_category_strategy(),
        ) {
            let years = match category.validity_period() {
                ValidityPeriod::Years(n) => n as i32,
                ValidityPeriod::Months(_) => unreachable!(),
            };
            let due_on = compute_due_date(issued_on, category).unwrap();

            prop_assert_eq!(due_on.year(), issued_on.year() + years);
            prop_assert_eq!(due_on.month(), issued_on.month());
            let expected_day = issued_on.day().min(days_in_month(due_on.year(), due_on.month()));
            prop_assert_eq!(due_on.day(), expected_day);
        }

        /// EPI adds four months with year carry and clamps the day
        #[test]
        fn prop_epi_adds_four_months(issued_on in issue_date_strategy()) {
            let due_on = compute_due_date(issued_on, ValidityCategory::Epi).unwrap();

            let issued_index = issued_on.year() * 12 + issued_on.month0() as i32;
            let due_index = due_on.year() * 12 + due_on.month0() as i32;
            prop_assert_eq!(due_index - issued_index, 4);
            let expected_day = issued_on.day().min(days_in_month(due_on.year(), due_on.month()));
            prop_assert_eq!(due_on.day(), expected_day);
        }

        /// Due date is always after the issue date
        #[test]
        fn prop_due_date_after_issue(issued_on in issue_date_strategy(), category in category_strategy()) {
            let due_on = compute_due_date(issued_on, category).unwrap();
            prop_assert!(due_on > issued_on);
        }

        /// More remaining days never yields a worse status
        #[test]
        fn prop_status_is_monotonic(days in -1000i64..1000, step in 0i64..500) {
            prop_assert!(derive_status(days) <= derive_status(days + step));
        }

        /// Status follows the remaining-day thresholds
        #[test]
        fn prop_status_matches_thresholds(days in -1000i64..1000) {
            let status = derive_status(days);
            match days {
                d if d < 0 => {
                    prop_assert_eq!(status, Status::Expired);
                }
                0..=30 => {
                    prop_assert_eq!(status, Status::RenewSoon);
                }
                _ => {
                    prop_assert_eq!(status, Status::Ok);
                }
            }
        }

        /// Formatting then parsing returns the same date
        #[test]
        fn prop_local_date_round_trip(date in date_strategy()) {
            let text = format_local_date(date);
            prop_assert_eq!(parse_local_date(&text), Ok(DateInput::Complete(date)));
        }

        /// A computed due date can always be written out and read back
        #[test]
        fn prop_due_date_round_trips_or_is_out_of_range(
            issued_on in date_strategy(),
            category in category_strategy(),
        ) {
            match compute_due_date(issued_on, category) {
                Ok(due_on) => {
                    let text = format_local_date(due_on);
                    prop_assert_eq!(parse_local_date(&text), Ok(DateInput::Complete(due_on)));
                }
                Err(err) => {
                    prop_assert_eq!(err, DateError::OutOfRange);
                    prop_assert!(issued_on.year() >= 9998);
                }
            }
        }

        /// Elapsed days are never negative
        #[test]
        fn prop_elapsed_days_non_negative(issued_on in date_strategy(), today in date_strategy()) {
            prop_assert!(compute_elapsed_days(issued_on, today) >= 0);
        }

        /// Remaining days and elapsed days add up to the validity span once issued
        #[test]
        fn prop_remaining_plus_elapsed_is_span(
            issued_on in issue_date_strategy(),
            offset in 0i64..2000,
            category in category_strategy(),
        ) {
            let today = issued_on + chrono::Duration::days(offset);
            let evaluation = evaluate(&CertificateRecord::new(category, issued_on), today).unwrap();
            let span = (evaluation.due_on - issued_on).num_days();

            prop_assert_eq!(evaluation.remaining_days + evaluation.elapsed_days, span);
            prop_assert_eq!(evaluation.status, derive_status(evaluation.remaining_days));
        }

        /// Summary totals always equal the number of evaluated certificates
        #[test]
        fn prop_summary_counts_every_certificate(days in prop::collection::vec(-100i64..100, 0..50)) {
            let summary = ComplianceSummary::from_statuses(days.iter().map(|d| derive_status(*d)));

            prop_assert_eq!(summary.total, days.len() as u64);
            prop_assert_eq!(summary.expired + summary.renew_soon + summary.ok, summary.total);
        }
    }
}

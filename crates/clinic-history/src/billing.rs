//! Billed and paid totals over trailing windows.

use chrono::NaiveDate;
use clinic_format::{DateWindow, Trend, calculate_trend, filter_in_window};
use clinic_model::BillingRecord;
use serde::Serialize;

use crate::data::PracticeData;

/// Sums over the invoices billed inside one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub window: DateWindow,
    pub invoices: usize,
    pub billed: f64,
    pub paid: f64,
}

impl PeriodTotals {
    fn collect(billing: &[BillingRecord], window: DateWindow) -> Self {
        let invoices = filter_in_window(billing, |record| record.date_billed.as_deref(), window);
        Self {
            window,
            invoices: invoices.len(),
            billed: total(invoices.iter().map(|record| record.billed_amount.unwrap_or(0.0))),
            paid: total(invoices.iter().copied().map(BillingRecord::total_paid)),
        }
    }
}

/// Current and previous period totals with their trends.
#[derive(Debug, Clone, Serialize)]
pub struct BillingOverview {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub billed_trend: Trend,
    pub paid_trend: Trend,
    /// Outstanding across every invoice, regardless of date.
    pub outstanding: f64,
}

impl BillingOverview {
    /// Compares the last `days` days up to `today` with the `days` before them.
    pub fn compute(data: &PracticeData, days: u32, today: NaiveDate) -> Self {
        let billing = &data.billing.records;
        let window = DateWindow::trailing(today, days);
        let current = PeriodTotals::collect(billing, window);
        let previous = PeriodTotals::collect(billing, window.previous());

        tracing::debug!(
            days,
            current_invoices = current.invoices,
            previous_invoices = previous.invoices,
            "billing overview computed"
        );

        Self {
            billed_trend: calculate_trend(current.billed, previous.billed),
            paid_trend: calculate_trend(current.paid, previous.paid),
            outstanding: total(
                billing
                    .iter()
                    .map(|record| record.outstanding_amount.unwrap_or(0.0)),
            ),
            current,
            previous,
        }
    }
}

/// Sum starting from positive zero, so empty totals serialize as `0.0`.
fn total(amounts: impl Iterator<Item = f64>) -> f64 {
    amounts.fold(0.0, |acc, amount| acc + amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::billing;
    use clinic_format::TrendDirection;
    use clinic_model::Dataset;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn compares_trailing_windows() {
        let mut late = billing("INV4", "PR004", "2024-03-20", 300.0);
        late.paid_medical_aid = Some(100.0);
        late.paid_patient = Some(50.0);
        late.outstanding_amount = Some(150.0);

        let data = PracticeData {
            billing: Dataset::new(
                "billing.csv",
                vec![
                    billing("INV1", "PR001", "2024-02-10", 200.0),
                    billing("INV2", "PR002", "2024-03-05", 100.0),
                    billing("INV3", "PR003", "2023-01-01", 999.0),
                    late,
                ],
            ),
            ..PracticeData::default()
        };

        let overview = BillingOverview::compute(&data, 30, today());
        assert_eq!(overview.current.invoices, 2);
        assert_eq!(overview.current.billed, 400.0);
        assert_eq!(overview.current.paid, 250.0);
        assert_eq!(overview.previous.invoices, 1);
        assert_eq!(overview.previous.billed, 200.0);
        assert_eq!(overview.billed_trend.to_string(), "100.0% up");
        assert_eq!(overview.paid_trend.direction, TrendDirection::Up);
        assert_eq!(overview.outstanding, 150.0);
    }

    #[test]
    fn empty_billing_is_neutral() {
        let overview = BillingOverview::compute(&PracticeData::default(), 30, today());
        assert_eq!(overview.current.invoices, 0);
        assert_eq!(overview.billed_trend.direction, TrendDirection::Neutral);
        assert_eq!(overview.billed_trend.value, "0%");
        assert!(overview.previous.billed.is_sign_positive());
        assert!(overview.previous.paid.is_sign_positive());
        assert!(overview.outstanding.is_sign_positive());
        let json = serde_json::to_value(overview.current).unwrap();
        assert_eq!(json["billed"].to_string(), "0.0");
    }
}

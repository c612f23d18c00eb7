//! Presentation of a computed loan: totals, payment dates, and the schedule
//! rendered as a text table or CSV.

use crate::error::{LoanError, LoanResult};
use crate::loan::{Frequency, LoanTerms, PeriodRecord};
use chrono::{Months, NaiveDate};
use std::io::{self, Write};

/// Headline figures printed above the schedule.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanSummary {
    pub principal: f64,
    pub payment: f64,
    pub number_of_payments: i32,
    /// Principal plus interest.
    pub total_to_pay: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    pub fn new(terms: &LoanTerms) -> LoanResult<Self> {
        let payment = terms.periodic_payment()?;
        let number_of_payments = terms.number_of_payments();
        let total_to_pay = payment * number_of_payments as f64;
        Ok(Self {
            principal: terms.principal(),
            payment,
            number_of_payments,
            total_to_pay,
            total_interest: total_to_pay - terms.principal(),
        })
    }
}

/// Due dates for `count` payments, the first falling on `first_pmt_date`.
///
/// Each date is offset from the first one rather than from its predecessor,
/// so a loan starting on the 31st keeps paying at month end.
pub fn payment_dates(
    first_pmt_date: NaiveDate,
    frequency: Frequency,
    count: usize,
) -> LoanResult<Vec<NaiveDate>> {
    let step = frequency.months_between_payments();
    (0..count)
        .map(|i| {
            u32::try_from(i)
                .ok()
                .and_then(|i| i.checked_mul(step))
                .and_then(|months| first_pmt_date.checked_add_months(Months::new(months)))
                .ok_or_else(|| {
                    LoanError::InvalidDate(format!(
                        "payment {} after {} is out of range",
                        i + 1,
                        first_pmt_date
                    ))
                })
        })
        .collect()
}

pub fn write_summary<W: Write>(out: &mut W, summary: &LoanSummary) -> io::Result<()> {
    writeln!(out, "Periodic payment: {:.2}", summary.payment)?;
    writeln!(
        out,
        "Total to pay over {} installments: {:.2}",
        summary.number_of_payments, summary.total_to_pay
    )?;
    writeln!(out, "Total interest: {:.2}", summary.total_interest)
}

/// Summary followed by the schedule as aligned columns. `dates`, when given,
/// must be as long as `sched`.
pub fn write_table<W: Write>(
    out: &mut W,
    summary: &LoanSummary,
    sched: &[PeriodRecord],
    dates: Option<&[NaiveDate]>,
) -> io::Result<()> {
    write_summary(out, summary)?;
    writeln!(out)?;

    let date_col = dates.is_some();
    if date_col {
        write!(out, "{:>6} {:>10}", "Period", "Date")?;
    } else {
        write!(out, "{:>6}", "Period")?;
    }
    writeln!(
        out,
        " {:>12} {:>12} {:>12} {:>14}",
        "Payment", "Interest", "Principal", "Balance"
    )?;
    writeln!(out, "{}", "-".repeat(if date_col { 71 } else { 60 }))?;

    for (i, pmt) in sched.iter().enumerate() {
        match dates.and_then(|d| d.get(i)) {
            Some(date) => write!(out, "{:>6} {:>10}", pmt.period, date)?,
            None if date_col => write!(out, "{:>6} {:>10}", pmt.period, "")?,
            None => write!(out, "{:>6}", pmt.period)?,
        }
        writeln!(
            out,
            " {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            pmt.payment, pmt.interest, pmt.principal, pmt.balance
        )?;
    }
    Ok(())
}

/// Schedule as CSV with a header row; amounts fixed at two decimals.
pub fn write_csv<W: Write>(
    out: W,
    sched: &[PeriodRecord],
    dates: Option<&[NaiveDate]>,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header = vec!["period", "payment", "interest", "principal", "balance"];
    if dates.is_some() {
        header.insert(0, "date");
    }
    wtr.write_record(&header)?;

    for (i, pmt) in sched.iter().enumerate() {
        let mut row = vec![
            pmt.period.to_string(),
            format!("{:.2}", pmt.payment),
            format!("{:.2}", pmt.interest),
            format!("{:.2}", pmt.principal),
            format!("{:.2}", pmt.balance),
        ];
        if let Some(dates) = dates {
            let date = dates.get(i).map(|d| d.to_string()).unwrap_or_default();
            row.insert(0, date);
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_log::test;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_totals() {
        let terms = LoanTerms::with_frequency(100000., 6., 30, Frequency::Monthly).unwrap();
        let summary = LoanSummary::new(&terms).unwrap();

        assert_eq!(summary.number_of_payments, 360);
        assert_abs_diff_eq!(summary.total_to_pay, summary.payment * 360., epsilon = 1e-9);
        assert_abs_diff_eq!(summary.total_interest, 115838.19, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_summary() {
        let terms = LoanTerms::with_frequency(12000., 0., 1, Frequency::Monthly).unwrap();
        let summary = LoanSummary::new(&terms).unwrap();
        assert_eq!(summary.payment, 1000.);
        assert_eq!(summary.total_to_pay, 12000.);
        assert_eq!(summary.total_interest, 0.);
    }

    #[test]
    fn test_payment_dates() {
        let dates = payment_dates(ymd(2024, 2, 1), Frequency::Monthly, 3).unwrap();
        assert_eq!(dates, vec![ymd(2024, 2, 1), ymd(2024, 3, 1), ymd(2024, 4, 1)]);

        let dates = payment_dates(ymd(2023, 11, 30), Frequency::Quarterly, 3).unwrap();
        assert_eq!(dates, vec![ymd(2023, 11, 30), ymd(2024, 2, 29), ymd(2024, 5, 30)]);

        let dates = payment_dates(ymd(2022, 8, 31), Frequency::SemiAnnual, 3).unwrap();
        assert_eq!(dates, vec![ymd(2022, 8, 31), ymd(2023, 2, 28), ymd(2023, 8, 31)]);

        let dates = payment_dates(ymd(2024, 2, 29), Frequency::Annual, 2).unwrap();
        assert_eq!(dates, vec![ymd(2024, 2, 29), ymd(2025, 2, 28)]);

        assert!(payment_dates(ymd(2024, 1, 1), Frequency::Monthly, 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_payment_dates_out_of_range() {
        let err = payment_dates(NaiveDate::MAX, Frequency::Monthly, 2).unwrap_err();
        assert!(matches!(err, LoanError::InvalidDate(_)));
    }

    #[test]
    fn test_write_table() {
        let terms = LoanTerms::with_frequency(12000., 0., 1, Frequency::Quarterly).unwrap();
        let summary = LoanSummary::new(&terms).unwrap();
        let sched = terms.amortization_schedule().unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &summary, &sched, None).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Periodic payment: 3000.00");
        assert_eq!(lines[1], "Total to pay over 4 installments: 12000.00");
        assert_eq!(lines[2], "Total interest: 0.00");
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("Period"));
        assert_eq!(
            lines[6],
            "     1      3000.00         0.00      3000.00        9000.00"
        );
        assert_eq!(lines.len(), 10);
        assert!(lines[9].ends_with("0.00"));
    }

    #[test]
    fn test_write_table_dated() {
        let terms = LoanTerms::with_frequency(1000., 0., 1, Frequency::SemiAnnual).unwrap();
        let summary = LoanSummary::new(&terms).unwrap();
        let sched = terms.amortization_schedule().unwrap();
        let dates = payment_dates(ymd(2025, 1, 15), Frequency::SemiAnnual, sched.len()).unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &summary, &sched, Some(&dates)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Period       Date"));
        assert!(text.contains("     2 2025-07-15       500.00"));
    }

    #[test]
    fn test_write_csv() {
        let sched = vec![
            PeriodRecord::new(1, 599.55, 500., 99.55, 99900.45),
            PeriodRecord::new(2, 599.55, 499.5, 100.05, 99800.4),
        ];

        let mut out = Vec::new();
        write_csv(&mut out, &sched, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "period,payment,interest,principal,balance\n\
             1,599.55,500.00,99.55,99900.45\n\
             2,599.55,499.50,100.05,99800.40\n"
        );

        let dates = [ymd(2024, 1, 1), ymd(2024, 2, 1)];
        let mut out = Vec::new();
        write_csv(&mut out, &sched, Some(&dates)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("date,period,payment"));
        assert!(text.contains("2024-02-01,2,599.55"));
    }
}

use crate::error::{LoanError, LoanResult};
use log::{debug, trace};
use std::fmt;

/// Decimal places applied to every amount in a [`PeriodRecord`].
pub const DISPLAY_DECIMALS: i32 = 2;

/// Payment (and compounding) frequencies offered at the input boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Annual,
        Frequency::SemiAnnual,
        Frequency::Quarterly,
        Frequency::Monthly,
    ];

    pub fn periods_per_year(self) -> i32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Calendar months between two consecutive payments.
    pub fn months_between_payments(self) -> u32 {
        (12 / self.periods_per_year()) as u32
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        f.write_str(name)
    }
}

/// One row of an amortization schedule. Amounts are rounded to
/// [`DISPLAY_DECIMALS`] places, each field independently, so `payment` may
/// differ from `interest + principal` by a cent.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodRecord {
    pub period: i32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl PeriodRecord {
    pub fn new(period: i32, payment: f64, interest: f64, principal: f64, balance: f64) -> Self {
        Self {
            period,
            payment,
            interest,
            principal,
            balance,
        }
    }
}

impl fmt::Display for PeriodRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {}, payment ${:.2}, interest ${:.2}, principal ${:.2}, balance ${:.2}",
            self.period, self.payment, self.interest, self.principal, self.balance
        )
    }
}

/// Validated terms of a fixed-rate, fixed-term loan.
///
/// `annual_rate` is a percentage (6.0 means 6%). Construction is the only
/// place preconditions are checked; a `LoanTerms` value is always computable.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoanTerms {
    principal: f64,
    annual_rate: f64,
    term_years: i32,
    periods_per_year: i32,
}

impl LoanTerms {
    pub fn new(
        principal: f64,
        annual_rate: f64,
        term_years: i32,
        periods_per_year: i32,
    ) -> LoanResult<Self> {
        if !principal.is_finite() || principal <= 0. {
            return Err(LoanError::terms(
                "principal",
                format!("must be a positive amount, got {}", principal),
            ));
        }
        if !annual_rate.is_finite() || annual_rate < 0. {
            return Err(LoanError::terms(
                "annual rate",
                format!("must be zero or more, got {}", annual_rate),
            ));
        }
        if term_years <= 0 {
            return Err(LoanError::terms(
                "term",
                format!("must be at least one year, got {}", term_years),
            ));
        }
        if periods_per_year <= 0 {
            return Err(LoanError::terms(
                "frequency",
                format!("must be at least one period per year, got {}", periods_per_year),
            ));
        }
        if term_years.checked_mul(periods_per_year).is_none() {
            return Err(LoanError::terms(
                "term",
                format!(
                    "{} years at {} periods per year is too many payments",
                    term_years, periods_per_year
                ),
            ));
        }

        Ok(Self {
            principal,
            annual_rate,
            term_years,
            periods_per_year,
        })
    }

    pub fn with_frequency(
        principal: f64,
        annual_rate: f64,
        term_years: i32,
        frequency: Frequency,
    ) -> LoanResult<Self> {
        Self::new(
            principal,
            annual_rate,
            term_years,
            frequency.periods_per_year(),
        )
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    pub fn term_years(&self) -> i32 {
        self.term_years
    }

    pub fn periods_per_year(&self) -> i32 {
        self.periods_per_year
    }

    pub fn number_of_payments(&self) -> i32 {
        // overflow is rejected in new()
        self.term_years * self.periods_per_year
    }

    pub fn rate_per_period(&self) -> f64 {
        (self.annual_rate / 100.) / self.periods_per_year as f64
    }

    /// Fixed payment that brings the balance to zero after
    /// [`number_of_payments`](Self::number_of_payments) periods. Not rounded.
    pub fn periodic_payment(&self) -> LoanResult<f64> {
        let pmt_count = self.number_of_payments() as f64;
        let rate = self.rate_per_period();

        let payment = if rate == 0. {
            self.principal / pmt_count
        } else {
            let factor = (1. + rate).powf(pmt_count);
            if factor.is_infinite() {
                // factor / (factor - 1) tends to 1
                self.principal * rate
            } else if factor == 1. {
                // rate is below f64 resolution
                self.principal / pmt_count
            } else {
                (self.principal * rate * factor) / (factor - 1.)
            }
        };

        if !payment.is_finite() || payment <= 0. {
            return Err(LoanError::terms(
                "principal",
                format!("{} yields no positive payment", self.principal),
            ));
        }
        debug!(
            "payment {} over {} periods at {} per period",
            payment, pmt_count, rate
        );
        Ok(payment)
    }

    /// Period by period breakdown of the fixed payment into interest and
    /// principal, in chronological order.
    pub fn amortization_schedule(&self) -> LoanResult<Vec<PeriodRecord>> {
        let pmt_amount = self.periodic_payment()?;
        let rate = self.rate_per_period();
        let pmt_count = self.number_of_payments();

        let mut sched_pmt = Vec::with_capacity(pmt_count as usize);
        let mut balance = self.principal;

        for pmt_number in 1..=pmt_count {
            let interest = balance * rate;
            let principal_paid = pmt_amount - interest;
            balance = (balance - principal_paid).max(0.);

            trace!(
                "pmt # {}, interest {}, principal {}, end bal {}",
                pmt_number,
                interest,
                principal_paid,
                balance
            );

            sched_pmt.push(PeriodRecord::new(
                pmt_number,
                round(pmt_amount, DISPLAY_DECIMALS),
                round(interest, DISPLAY_DECIMALS),
                round(principal_paid, DISPLAY_DECIMALS),
                round(balance, DISPLAY_DECIMALS),
            ));
        }
        Ok(sched_pmt)
    }
}

/// Periodic payment of a fully amortizing fixed-rate loan.
pub fn periodic_payment(
    principal: f64,
    annual_rate: f64,
    term_years: i32,
    periods_per_year: i32,
) -> LoanResult<f64> {
    LoanTerms::new(principal, annual_rate, term_years, periods_per_year)?.periodic_payment()
}

/// Amortization schedule of a fully amortizing fixed-rate loan.
pub fn amortization_schedule(
    principal: f64,
    annual_rate: f64,
    term_years: i32,
    periods_per_year: i32,
) -> LoanResult<Vec<PeriodRecord>> {
    LoanTerms::new(principal, annual_rate, term_years, periods_per_year)?.amortization_schedule()
}

/// Amounts at or above this have no fractional digits left in an f64.
const ROUNDING_LIMIT: f64 = 1e15;

/// Rounds to `dec` places; exact halves go to the even digit.
pub(crate) fn round(amt: f64, dec: i32) -> f64 {
    if amt == 0. {
        return 0.;
    }
    let scale = 10_f64.powi(dec);
    let scaled = amt * scale;
    if amt.abs() >= ROUNDING_LIMIT || !scaled.is_finite() {
        amt
    } else {
        scaled.round_ties_even() / scale
    }
}

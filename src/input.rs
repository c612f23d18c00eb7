//! Parsing of user supplied text into loan terms.
//!
//! Everything here runs before the calculation core is touched; the
//! functions double as clap value parsers for the command line.

use crate::error::InputError;
use crate::loan::Frequency;
use std::str::FromStr;

/// Maps a frequency keyword (or its periods per year) to a [`Frequency`].
pub fn parse_frequency(text: &str) -> Result<Frequency, InputError> {
    match text.trim().to_lowercase().as_str() {
        "annual" | "annually" | "yearly" | "1" => Ok(Frequency::Annual),
        "semi-annual" | "semi-annually" | "semiannual" | "semiannually" | "2" => {
            Ok(Frequency::SemiAnnual)
        }
        "quarterly" | "4" => Ok(Frequency::Quarterly),
        "monthly" | "12" => Ok(Frequency::Monthly),
        _ => Err(InputError::InvalidFrequency(text.trim().to_string())),
    }
}

impl FromStr for Frequency {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_frequency(s)
    }
}

/// Loan amount.
pub fn parse_amount(text: &str) -> Result<f64, InputError> {
    parse_real("loan amount", text)
}

/// Annual interest rate as a percentage.
pub fn parse_rate(text: &str) -> Result<f64, InputError> {
    parse_real("interest rate", text)
}

/// Repayment time in whole years.
pub fn parse_years(text: &str) -> Result<i32, InputError> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| non_numeric("repayment time", text))
}

fn parse_real(field: &'static str, text: &str) -> Result<f64, InputError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(non_numeric(field, text)),
    }
}

fn non_numeric(field: &'static str, text: &str) -> InputError {
    InputError::NonNumericInput {
        field,
        value: text.trim().to_string(),
    }
}

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Which characters separate the fraction and the thousands groups of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorConvention {
    pub decimal: char,
    pub grouping: char,
}

/// bunq export: `1,234.56`
pub const SOURCE_CONVENTION: SeparatorConvention = SeparatorConvention {
    decimal: '.',
    grouping: ',',
};

/// ING import: `1.234,56` (written without grouping)
pub const TARGET_CONVENTION: SeparatorConvention = SeparatorConvention {
    decimal: ',',
    grouping: '.',
};

const OUTPUT_SCALE: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount contains no digits")]
    NoDigits,

    #[error("unexpected character '{0}' in amount")]
    UnexpectedCharacter(char),

    #[error("amount is out of range")]
    OutOfRange,
}

/// Debit or credit, as the `Af Bij` column spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Af,
    Bij,
}

impl Direction {
    /// Strictly negative amounts are debits, everything else (zero included) is a credit.
    pub fn of(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            Direction::Af
        } else {
            Direction::Bij
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Af => "Af",
            Direction::Bij => "Bij",
        }
    }
}

/// Parses a signed amount written in `convention`.
///
/// Grouping separators may appear anywhere between the digits of the integer
/// part; group sizes are not checked. Surrounding whitespace is ignored.
/// Unlike a locale `atof`, a grouping separator before the first digit or
/// after the decimal separator is rejected, so `",123"` and `"12.3,4"` fail.
pub fn parse_amount(input: &str, convention: SeparatorConvention) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut integer = String::with_capacity(body.len());
    let mut fraction = String::new();
    let mut in_fraction = false;

    for c in body.chars() {
        if c.is_ascii_digit() {
            if in_fraction {
                fraction.push(c);
            } else {
                integer.push(c);
            }
        } else if c == convention.decimal && !in_fraction {
            in_fraction = true;
        } else if c == convention.grouping && !in_fraction && !integer.is_empty() {
            continue;
        } else {
            return Err(AmountError::UnexpectedCharacter(c));
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return Err(AmountError::NoDigits);
    }
    if integer.is_empty() {
        integer.push('0');
    }

    let mut normalized = String::with_capacity(integer.len() + fraction.len() + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(&integer);
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(&fraction);
    }

    Decimal::from_str(&normalized).map_err(|_| AmountError::OutOfRange)
}

/// Formats the magnitude of `amount` with exactly two fraction digits and no grouping.
///
/// Midpoints round away from zero: `0.125` becomes `0,13`.
pub fn format_amount(amount: Decimal, convention: SeparatorConvention) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(OUTPUT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", OUTPUT_SCALE as usize, rounded);
    if convention.decimal == '.' {
        plain
    } else {
        plain.replacen('.', &convention.decimal.to_string(), 1)
    }
}

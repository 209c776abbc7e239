//! Local parameter checks run before any request reaches Bybit.
use thiserror::Error;

/// Implemented by every tool parameter struct.
pub trait Validate {
    fn validate(&self) -> Result<(), RequestValidationError> {
        Ok(())
    }
}

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("`{field}` is required")]
    MissingField { field: &'static str },
    #[error("`{field}` must be a plain decimal number (got `{value}`)")]
    InvalidDecimal { field: &'static str, value: String },
    #[error("`{field}` must not be zero")]
    ZeroAmount { field: &'static str },
    #[error("`{field}` must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("`{field}` must be one of {allowed:?} (got {value})")]
    NotAllowed {
        field: &'static str,
        value: i64,
        allowed: &'static [i64],
    },
    #[error("`{start}` must not be later than `{end}`")]
    InvalidTimeRange {
        start: &'static str,
        end: &'static str,
    },
    #[error("either `order_id` or `order_link_id` is required")]
    MissingOrderIdentifier,
    #[error("`price` is required for Limit orders")]
    MissingLimitPrice,
    #[error("at least one of {fields:?} must be provided")]
    NothingToChange { fields: &'static [&'static str] },
    #[error("either `symbol` or `coin` is required")]
    MissingScope,
    #[error("`orders` must contain between 1 and {max} entries (got {count})")]
    BatchSize { count: usize, max: usize },
    #[error("orders[{index}]: {reason}")]
    BatchEntry {
        index: usize,
        reason: Box<RequestValidationError>,
    },
}

/// Reject blank text.
pub fn require_text(field: &'static str, value: &str) -> Result<(), RequestValidationError> {
    if value.trim().is_empty() {
        return Err(RequestValidationError::MissingField { field });
    }
    Ok(())
}

/// Reject a present but blank optional text.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), RequestValidationError> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

/// Unsigned decimal literal such as `0.001` or `25`.
pub fn require_decimal(field: &'static str, value: &str) -> Result<(), RequestValidationError> {
    require_text(field, value)?;
    if !is_decimal_literal(value) {
        return Err(RequestValidationError::InvalidDecimal {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub fn optional_decimal(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), RequestValidationError> {
    match value {
        Some(value) => require_decimal(field, value),
        None => Ok(()),
    }
}

/// Signed, non-zero decimal literal such as `-10` or `+2.5`.
pub fn require_signed_nonzero_decimal(
    field: &'static str,
    value: &str,
) -> Result<(), RequestValidationError> {
    require_text(field, value)?;
    let unsigned = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    if !is_decimal_literal(unsigned) {
        return Err(RequestValidationError::InvalidDecimal {
            field,
            value: value.to_string(),
        });
    }
    if unsigned.chars().all(|c| c == '0' || c == '.') {
        return Err(RequestValidationError::ZeroAmount { field });
    }
    Ok(())
}

/// Page size within `1..=max`.
pub fn limit_in_range(
    field: &'static str,
    value: Option<u32>,
    max: u32,
) -> Result<(), RequestValidationError> {
    match value {
        Some(value) if value == 0 || value > max => Err(RequestValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min: 1,
            max: i64::from(max),
        }),
        _ => Ok(()),
    }
}

pub fn one_of(
    field: &'static str,
    value: u8,
    allowed: &'static [i64],
) -> Result<(), RequestValidationError> {
    if allowed.contains(&i64::from(value)) {
        return Ok(());
    }
    Err(RequestValidationError::NotAllowed {
        field,
        value: i64::from(value),
        allowed,
    })
}

pub fn optional_one_of(
    field: &'static str,
    value: Option<u8>,
    allowed: &'static [i64],
) -> Result<(), RequestValidationError> {
    match value {
        Some(value) => one_of(field, value, allowed),
        None => Ok(()),
    }
}

/// Both bounds are milliseconds; only checked when both are present.
pub fn time_range(
    start_field: &'static str,
    start: Option<i64>,
    end_field: &'static str,
    end: Option<i64>,
) -> Result<(), RequestValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(RequestValidationError::InvalidTimeRange {
            start: start_field,
            end: end_field,
        }),
        _ => Ok(()),
    }
}

pub fn require_order_identifier(
    order_id: Option<&str>,
    order_link_id: Option<&str>,
) -> Result<(), RequestValidationError> {
    let present = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());
    if present(order_id) || present(order_link_id) {
        return Ok(());
    }
    Err(RequestValidationError::MissingOrderIdentifier)
}

/// Check batch size and validate each entry, reporting the first failing index.
pub fn validate_batch<T>(
    entries: &[T],
    max: usize,
    validate_entry: impl Fn(&T) -> Result<(), RequestValidationError>,
) -> Result<(), RequestValidationError> {
    if entries.is_empty() || entries.len() > max {
        return Err(RequestValidationError::BatchSize {
            count: entries.len(),
            max,
        });
    }
    for (index, entry) in entries.iter().enumerate() {
        validate_entry(entry).map_err(|reason| RequestValidationError::BatchEntry {
            index,
            reason: Box::new(reason),
        })?;
    }
    Ok(())
}

fn is_decimal_literal(value: &str) -> bool {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    !(whole.is_empty() && fraction.is_empty()) && digits(whole) && digits(fraction)
}

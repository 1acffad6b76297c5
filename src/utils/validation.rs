use crate::utils::error::{LibraryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| LibraryError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Ids and names typed at the prompt. Surrounding whitespace is dropped.
pub fn require_text(field_name: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::invalid_input(field_name, raw, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Copy counts typed at the prompt: a non-negative integer.
pub fn parse_copies(field_name: &str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(LibraryError::invalid_input(
            field_name,
            trimmed,
            "must not be negative",
        )),
        Ok(n) => u32::try_from(n)
            .map_err(|_| LibraryError::invalid_input(field_name, trimmed, "is too large")),
        Err(_) => Err(LibraryError::invalid_input(
            field_name,
            trimmed,
            "must be a whole number",
        )),
    }
}

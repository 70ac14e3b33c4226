use crate::utils::error::{GnssError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GnssError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GnssError::InvalidConfigValueError {
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
        return Err(GnssError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Zone offsets accepted for rendering: -14..=14 hours, -59..=59 minutes.
pub fn validate_offset(hours: i32, minutes: i32) -> Result<()> {
    validate_range("offset_hours", hours, -14, 14)?;
    validate_range("offset_minutes", minutes, -59, 59)
}

/// Every character must be `*` or a known RINEX system code.
pub fn validate_system_codes(field_name: &str, codes: &str) -> Result<()> {
    validate_non_empty_string(field_name, codes)?;
    if codes == "*" {
        return Ok(());
    }
    for c in codes.chars() {
        if crate::domain::SatSystem::by_char_code(c).is_none() {
            return Err(GnssError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: codes.to_string(),
                reason: format!("Unknown system code '{}'", c),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("output.offset_hours", 3, -14, 14).is_ok());
        assert!(validate_range("output.offset_hours", -14, -14, 14).is_ok());
        assert!(validate_range("output.offset_hours", 15, -14, 14).is_err());
    }

    #[test]
    fn test_validate_offset() {
        assert!(validate_offset(14, -59).is_ok());
        assert!(validate_offset(15, 0).is_err());
        assert!(validate_offset(0, 60).is_err());
        assert!(validate_offset(i32::MIN, 0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("output.pattern", "YYYY").is_ok());
        assert!(validate_non_empty_string("output.pattern", "   ").is_err());
    }

    #[test]
    fn test_validate_system_codes() {
        assert!(validate_system_codes("filter.systems", "*").is_ok());
        assert!(validate_system_codes("filter.systems", "GREJCS").is_ok());
        assert!(validate_system_codes("filter.systems", "GX").is_err());
        assert!(validate_system_codes("filter.systems", "").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(5);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("a", &present).unwrap(), 5);
        assert!(matches!(
            validate_required_field("b", &missing),
            Err(GnssError::MissingConfigError { .. })
        ));
    }
}

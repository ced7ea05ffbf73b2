use crate::utils::error::{Result, ValidationError};
use regex::Regex;

pub const AGE_MIN: u32 = 0;
pub const AGE_MAX: u32 = 100;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts `local-part@domain.tld` with a 2-7 letter top-level domain.
pub fn validate_email(field_name: &'static str, email: &str) -> std::result::Result<(), ValidationError> {
    let re = Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}$").unwrap();

    if re.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: field_name,
            value: email.to_string(),
        })
    }
}

/// Parses an age out of raw form input. Non-numeric text is rejected before
/// the range check so the two failures stay distinguishable.
pub fn parse_age(field_name: &'static str, value: &str) -> std::result::Result<u32, ValidationError> {
    let age: i64 = value.trim().parse().map_err(|_| ValidationError::NotNumeric {
        field: field_name,
        value: value.to_string(),
    })?;

    if age < i64::from(AGE_MIN) || age > i64::from(AGE_MAX) {
        return Err(ValidationError::OutOfRange {
            field: field_name,
            value: value.to_string(),
            min: AGE_MIN,
            max: AGE_MAX,
        });
    }

    Ok(age as u32)
}

/// Range check for an already-numeric age.
pub fn validate_age(field_name: &'static str, age: u32) -> std::result::Result<(), ValidationError> {
    if age > AGE_MAX {
        return Err(ValidationError::OutOfRange {
            field: field_name,
            value: age.to_string(),
            min: AGE_MIN,
            max: AGE_MAX,
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &'static str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidFormat {
            field: field_name,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &'static str, path: &str) -> std::result::Result<(), ValidationError> {
    if path.is_empty() || path.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field: field_name,
            value: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "alice@x.com").is_ok());
        assert!(validate_email("email", "first.last+tag@sub.domain.museum").is_ok());
        assert!(validate_email("email", "a_b%c@host.io").is_ok());

        // Missing '@' or a dot-separated tld.
        assert!(validate_email("email", "alice.x.com").is_err());
        assert!(validate_email("email", "alice@xcom").is_err());
        assert!(validate_email("email", "alice@x.c").is_err());
        assert!(validate_email("email", "alice@x.abcdefgh").is_err());
        assert!(validate_email("email", "").is_err());
    }

    #[test]
    fn test_validate_email_error_kind() {
        let err = validate_email("email", "not-an-email").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "email",
                value: "not-an-email".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_age_accepts_bounds() {
        assert_eq!(parse_age("age", "0").unwrap(), 0);
        assert_eq!(parse_age("age", "20").unwrap(), 20);
        assert_eq!(parse_age("age", "100").unwrap(), 100);
        assert_eq!(parse_age("age", " 42 ").unwrap(), 42);
    }

    #[test]
    fn test_parse_age_rejects_out_of_range() {
        assert!(matches!(
            parse_age("age", "-3"),
            Err(ValidationError::OutOfRange { min: 0, max: 100, .. })
        ));
        assert!(matches!(
            parse_age("age", "101"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_age_rejects_non_numeric() {
        assert!(matches!(
            parse_age("age", "twenty"),
            Err(ValidationError::NotNumeric { .. })
        ));
        assert!(matches!(parse_age("age", ""), Err(ValidationError::NotNumeric { .. })));
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age("age", 100).is_ok());
        assert!(validate_age("age", 101).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Alice").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_dir", "./data").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_path("data_dir", "bad\0path").is_err());
    }
}

use crate::utils::error::{HotelError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    let path = std::path::Path::new(name);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(()),
        Some(other) => Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: format!("Unsupported file extension: {}. Expected json", other),
        }),
        None => Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HotelError::InvalidConfigValueError {
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
    // NaN fails both comparisons, so reject it explicitly through partial_cmp
    if value.partial_cmp(&min).is_none() || value < min || value > max {
        return Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_dir", "./data").is_ok());
        assert!(validate_path("storage.data_dir", "").is_err());
        assert!(validate_path("storage.data_dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("storage.rooms_file", "rooms.json").is_ok());
        assert!(validate_file_name("storage.rooms_file", "rooms.csv").is_err());
        assert!(validate_file_name("storage.rooms_file", "rooms").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("billing.tax_rate", 0.1, 0.0, 1.0).is_ok());
        assert!(validate_range("billing.tax_rate", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("billing.tax_rate", -0.1, 0.0, 1.0).is_err());
        assert!(validate_range("billing.tax_rate", f64::NAN, 0.0, 1.0).is_err());
    }
}

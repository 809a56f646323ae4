use crate::utils::error::{DesignError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DesignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DesignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Design labels become file stems, so they may not contain path separators.
pub fn validate_file_stem(field_name: &str, stem: &str) -> Result<()> {
    validate_path(field_name, stem)?;

    if stem.contains('/') || stem.contains('\\') {
        return Err(DesignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: stem.to_string(),
            reason: "File stem cannot contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DesignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_distinct(field_name: &str, first: &str, second: &str) -> Result<()> {
    if first == second {
        return Err(DesignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: second.to_string(),
            reason: format!("Value must differ from '{}'", first),
        });
    }
    Ok(())
}

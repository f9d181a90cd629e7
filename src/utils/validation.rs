use crate::utils::error::{CompareError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CompareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CompareError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.escape_default().to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

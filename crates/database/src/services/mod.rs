use crate::error::ServiceError;

pub mod game;
pub mod location;

/// Rejects values wider than their column, counted in characters
pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ServiceError> {
    let len = value.chars().count();
    if len > max {
        return Err(ServiceError::Validation(format!(
            "{field} is {len} characters long, at most {max} allowed"
        )));
    }

    Ok(())
}

// Validation utilities
// Author: Gabriel Demetrios Lafis

/// Validate that a value is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}, got {}",
            name, min, max, value
        ))
    } else {
        Ok(())
    }
}

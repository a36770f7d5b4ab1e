//! Common validation utilities.

use validator::ValidationError;

/// Maximum accepted length for a free-text search query.
const MAX_SEARCH_QUERY_LENGTH: usize = 200;

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z0-9_.-]{3,32}$").unwrap();
}

/// Validates a username: 3-32 characters from `[a-zA-Z0-9_.-]`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_format");
        err.message =
            Some("Username must be 3-32 characters (letters, digits, '_', '.', '-')".into());
        Err(err)
    }
}

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates a search query: non-blank and bounded.
pub fn validate_search_query(query: &str) -> Result<(), ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("search_query_blank");
        err.message = Some("Search query must not be blank".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        let mut err = ValidationError::new("search_query_length");
        err.message = Some(
            format!(
                "Search query must be at most {} characters",
                MAX_SEARCH_QUERY_LENGTH
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_accepts_common_forms() {
        assert!(validate_username("dungeon_master").is_ok());
        assert!(validate_username("player.one").is_ok());
        assert!(validate_username("a-b-c").is_ok());
        assert!(validate_username("abc").is_ok());
    }

    #[test]
    fn test_validate_username_rejects_short_and_long() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_username_rejects_bad_characters() {
        assert!(validate_username("has space").is_err());
        assert!(validate_username("semi;colon").is_err());
        assert!(validate_username("почта").is_err());
    }

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_latitude(-90.1).is_err());
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(0.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.1).is_err());
        assert!(validate_longitude(-180.1).is_err());
    }

    #[test]
    fn test_validate_search_query_blank() {
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
    }

    #[test]
    fn test_validate_search_query_bounds() {
        assert!(validate_search_query("dragon").is_ok());
        assert!(validate_search_query(&"q".repeat(200)).is_ok());
        assert!(validate_search_query(&"q".repeat(201)).is_err());
    }
}

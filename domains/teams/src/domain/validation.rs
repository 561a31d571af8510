//! Validation helpers and constants for team names

use regex::Regex;

lazy_static::lazy_static! {
    /// Team name validation regex
    /// Letters, digits, underscores and hyphens, 1 to 32 characters.
    /// Team names double as permission group names, so no spaces or dots.
    pub static ref TEAM_NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_-]{1,32}$").unwrap();
}

/// Validate a team name according to the rules
pub fn validate_team_name(name: &str) -> bool {
    TEAM_NAME_REGEX.is_match(name)
}

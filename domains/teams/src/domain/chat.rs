//! Chat colour code handling
//!
//! Minecraft formats chat with a section sign followed by a code character.
//! Players type `&` instead, which is translated on the way in.

use regex::Regex;

/// Section sign that starts a formatting code
pub const COLOR_CHAR: char = '\u{a7}';

const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

lazy_static::lazy_static! {
    static ref STRIP_COLOR_REGEX: Regex =
        Regex::new("(?i)\u{a7}[0-9A-FK-ORX]").unwrap();
}

/// Replace `alt` followed by a valid code character with the section sign.
///
/// Code characters are lower-cased; an `alt` that is not followed by a code
/// is left alone.
pub fn translate_color_codes(alt: char, text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == alt && COLOR_CODES.contains(chars[i + 1]) {
            chars[i] = COLOR_CHAR;
            chars[i + 1] = chars[i + 1].to_ascii_lowercase();
        }
    }
    chars.into_iter().collect()
}

/// Remove all formatting codes, leaving the plain text
pub fn strip_color_codes(text: &str) -> String {
    STRIP_COLOR_REGEX.replace_all(text, "").into_owned()
}

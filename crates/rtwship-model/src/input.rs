//! Checks on user-typed values, done before a command is built.

/// True if `text` is a whole number, surrounding blanks allowed.
pub fn is_int(text: &str) -> bool {
    parse_int(text).is_some()
}

/// Parse an optionally signed decimal integer.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// True if `text` is a usable coordinate.
pub fn is_float(text: &str) -> bool {
    parse_coordinate(text).is_some()
}

/// A finite decimal number, surrounding blanks allowed.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

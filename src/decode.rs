//! Query-string decoding: `%XY` escapes and `+` as space.

/// Decode `%XY` hex escapes and `+`. Malformed escapes pass through untouched.
pub fn url_decode(input: &str) -> Vec<u8> {
    urlencoding::decode_binary(input.replace('+', " ").as_bytes()).into_owned()
}

/// Decode into a `String`, replacing invalid UTF-8.
pub fn url_decode_lossy(input: &str) -> String {
    String::from_utf8_lossy(&url_decode(input)).into_owned()
}

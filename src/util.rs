//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with whole article bodies or error pages.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

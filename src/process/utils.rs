const QUOTES: &[char] = &['"', '\''];

/// 1) Trim whitespace, drop one leading and one trailing quote (`"` or `'`), trim again.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix(QUOTES).unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(QUOTES).unwrap_or(trimmed);
    trimmed.trim().to_string()
}

/// 2) Coerce a count column to an integer.
///
/// Honours a leading run of digits (`"12명"` → 12, `"3.5"` → 3) and falls
/// back to 0 for empty, negative or non-numeric tokens.
pub fn coerce_count(raw: &str) -> u32 {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

/// 3) Split a data line on commas outside quoted spans.
///
/// A `"` toggles the quoted state and is never copied into the token. The
/// content after the last delimiter always forms the final token, so a line
/// with `n` unquoted commas yields `n + 1` tokens.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    tokens.push(current);

    tokens.iter().map(|t| clean_str(t)).collect()
}

use std::fmt::Write;

/// Returns the key of a `key=value` token, or `None` for opaque fragments.
pub(crate) fn key_of(token: &str) -> Option<&str> {
    token.split_once('=').map(|(key, _)| key)
}

/// Builds a `key=value` token, quoting the value when it would not survive a
/// whitespace split or a `key=value` reparse.
pub fn pair(key: &str, value: &str) -> String {
    let mut token = String::with_capacity(key.len() + value.len() + 1);
    token.push_str(key);
    token.push('=');
    if needs_quoting(value) {
        let _ = write!(token, "{:?}", value);
    } else {
        token.push_str(value);
    }
    token
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '=' | '\\'))
}

/// Splits `kv` into tokens on whitespace that is not inside double quotes.
///
/// Quoted sections are kept verbatim (quotes and escapes included) so a token
/// renders exactly as the caller wrote it.
pub(crate) fn split(kv: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for c in kv.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if quoted => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                current.push(c);
                quoted = !quoted;
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Copies `tokens` with the first token keyed `key` swapped for `token`.
/// Appends `token` when no such key is present.
pub(crate) fn upsert(tokens: &[String], key: &str, token: String) -> Vec<String> {
    let mut next = Vec::with_capacity(tokens.len() + 1);
    let mut pending = Some(token);
    for existing in tokens {
        if pending.is_some() && key_of(existing) == Some(key) {
            next.extend(pending.take());
        } else {
            next.push(existing.clone());
        }
    }
    next.extend(pending);
    next
}

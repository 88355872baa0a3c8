const FENCE: &str = "```";

/// Strips markdown code fences wrapped around a provider response. Idempotent.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();
    loop {
        let stripped = strip_trailing_fence(strip_leading_fence(text)).trim();
        if stripped.len() == text.len() {
            return stripped.to_string();
        }
        text = stripped;
    }
}

fn strip_leading_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    let (first_line, remainder) = match rest.find('\n') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };

    // A bare language tag such as `json` occupies the rest of the fence line.
    let is_tag = first_line
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.'));

    if is_tag {
        remainder
    } else {
        rest.strip_prefix("json").unwrap_or(rest)
    }
}

fn strip_trailing_fence(text: &str) -> &str {
    text.strip_suffix(FENCE).unwrap_or(text)
}

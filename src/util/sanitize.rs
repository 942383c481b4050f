use regex::Regex;

// Story titles and author names come from other users via the server, so
// strip ANSI escape sequences and control chars before terminal display.
// Collapse newlines/tabs to spaces and truncate to a reasonable length.
pub fn sanitize_for_terminal(s: &str) -> String {
    // Strip CSI (ESC[ ... cmd) sequences; covers the common styling and
    // cursor-movement escapes. If the regex fails to compile (shouldn't),
    // fall back to the raw string.
    let re = Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").ok();
    let no_ansi = if let Some(r) = &re {
        r.replace_all(s, "").into_owned()
    } else {
        s.to_string()
    };

    // Remove other control characters (C0 and DEL)
    let mut cleaned = String::with_capacity(no_ansi.len());
    for ch in no_ansi.chars() {
        if ch >= ' ' && ch != '\x7f' {
            cleaned.push(ch);
        }
    }

    // Normalize whitespace and trim
    let collapsed = cleaned.replace(['\n', '\r', '\t'], " ");
    let trimmed = collapsed.trim();

    // Truncate to 200 chars to avoid overly wide rows
    trimmed.chars().take(200).collect()
}

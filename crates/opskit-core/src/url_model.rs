//! Output filenames for ad-hoc fetches, derived from a source URL.

/// Fallback name when a URL yields no usable path segment.
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Last non-empty path segment of `url` (query and fragment ignored).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Makes `name` safe as a single Linux path component.
///
/// Separators, NUL, whitespace and control characters become `_` (runs
/// collapsed); leading/trailing dots and underscores are trimmed; the result
/// is capped at 255 bytes.
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let bad = c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if bad {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Filename to save `url` under: sanitized last path segment, or `download.bin`.
pub fn derive_filename(url: &str) -> String {
    filename_from_url_path(url)
        .map(|s| sanitize_filename(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

//! Collect raw header lines from curl callbacks into (name, value) pairs.

/// Header lines of the most recent response seen by a transfer.
///
/// With redirects enabled curl reports the headers of every hop; a new status
/// line resets the collection so only the final response remains.
#[derive(Debug, Default, Clone)]
pub struct HeaderLines {
    status_line: Option<String>,
    lines: Vec<String>,
}

impl HeaderLines {
    /// Feed one raw header line as delivered by curl's header callback.
    pub fn push_raw(&mut self, data: &[u8]) {
        let line = String::from_utf8_lossy(data);
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            self.status_line = Some(line.to_string());
            self.lines.clear();
            return;
        }
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    /// `Content-Length` of the current response, if present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.lines.iter().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }

    /// Parsed `(name, value)` pairs in arrival order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        parse_header_lines(&self.lines)
    }
}

/// Parse header lines into `(name, value)` pairs. Status lines and lines without `:` are skipped.
pub fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            out.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    out
}

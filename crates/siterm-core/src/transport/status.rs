//! Status line parsing for response headers collected from libcurl.

/// Parses `HTTP/1.1 404 Not Found` into `(404, "Not Found")`.
///
/// Returns `None` for lines that are not status lines. HTTP/2 status lines
/// carry no reason phrase, so the reason is empty there.
pub fn parse_status_line(line: &str) -> Option<(u32, String)> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let mut parts = line.splitn(3, ' ');
    parts.next()?;
    let code = parts.next()?.parse::<u32>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some((code, reason))
}

/// Reason phrase of the last status line in `lines`.
///
/// With redirects followed, libcurl reports the headers of every hop; the
/// final response is the last one.
pub(crate) fn final_reason(lines: &[String]) -> String {
    lines
        .iter()
        .filter_map(|l| parse_status_line(l))
        .last()
        .map(|(_, reason)| reason)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_and_reason() {
        assert_eq!(
            parse_status_line("HTTP/1.1 404 Not Found\r\n"),
            Some((404, "Not Found".to_string()))
        );
    }

    #[test]
    fn http2_has_empty_reason() {
        assert_eq!(parse_status_line("HTTP/2 200"), Some((200, String::new())));
    }

    #[test]
    fn header_lines_are_not_status_lines() {
        assert_eq!(parse_status_line("Content-Length: 10"), None);
        assert_eq!(parse_status_line(""), None);
    }

    #[test]
    fn final_reason_uses_last_hop() {
        let lines = [
            "HTTP/1.1 302 Found".to_string(),
            "Location: /b".to_string(),
            "".to_string(),
            "HTTP/1.1 200 OK".to_string(),
            "Content-Length: 2".to_string(),
        ];
        assert_eq!(final_reason(&lines), "OK");
    }

    #[test]
    fn final_reason_empty_without_status_line() {
        assert_eq!(final_reason(&[]), "");
    }
}

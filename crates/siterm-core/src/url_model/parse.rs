//! Split an endpoint string into its components and put it back together.

use crate::error::RequestError;

/// Components of an endpoint URL.
///
/// `params` is the `;`-parameter section of the last path segment. `host` is
/// normalized: domains are lowercased and IPv6 literals keep their brackets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
    /// True if the input carried a `//` authority section.
    pub has_authority: bool,
}

impl UrlParts {
    /// `host` or `host:port`; the port appears only if it was written in the input.
    pub fn netloc(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Reassembles the URL without any userinfo.
    pub fn to_url(&self) -> String {
        let mut out = String::new();
        if !self.scheme.is_empty() {
            out.push_str(&self.scheme);
            out.push(':');
        }
        let netloc = self.netloc();
        if self.has_authority || !netloc.is_empty() {
            out.push_str("//");
            out.push_str(&netloc);
            if !self.path.is_empty() && !self.path.starts_with('/') {
                out.push('/');
            }
        }
        out.push_str(&self.path);
        if !self.params.is_empty() {
            out.push(';');
            out.push_str(&self.params);
        }
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

/// Splits `input` into [`UrlParts`].
///
/// Fails only when the authority section has an unparseable port or host.
pub fn split_url(input: &str) -> Result<UrlParts, RequestError> {
    let mut parts = UrlParts::default();

    let mut rest = input;
    if let Some((scheme, after)) = input.split_once(':') {
        if is_scheme(scheme) {
            parts.scheme = scheme.to_ascii_lowercase();
            rest = after;
        }
    }

    let mut netloc = "";
    if let Some(after) = rest.strip_prefix("//") {
        parts.has_authority = true;
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        netloc = &after[..end];
        rest = &after[end..];
    }

    if let Some((before, fragment)) = rest.split_once('#') {
        parts.fragment = fragment.to_string();
        rest = before;
    }
    if let Some((before, query)) = rest.split_once('?') {
        parts.query = query.to_string();
        rest = before;
    }

    // Parameters only ever belong to the last path segment.
    let last_segment = rest.rfind('/').unwrap_or(0);
    match rest[last_segment..].find(';') {
        Some(i) => {
            parts.path = rest[..last_segment + i].to_string();
            parts.params = rest[last_segment + i + 1..].to_string();
        }
        None => parts.path = rest.to_string(),
    }

    let host_port = match netloc.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            let (user, password) = match userinfo.split_once(':') {
                Some((u, p)) => (u, Some(p)),
                None => (userinfo, None),
            };
            // Any userinfo counts as credentials, even with an empty user.
            parts.username = Some(user.to_string());
            parts.password = password.map(str::to_string);
            host_port
        }
        None => netloc,
    };

    let (host, port) = split_host_port(host_port, input)?;
    parts.host = normalize_host(host, input)?;
    parts.port = port;

    Ok(parts)
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

fn split_host_port<'a>(host_port: &'a str, input: &str) -> Result<(&'a str, Option<u16>), RequestError> {
    let (host, port) = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => {
                let tail = &host_port[end + 1..];
                let port = match tail.strip_prefix(':') {
                    Some(p) => p,
                    None if tail.is_empty() => "",
                    None => return Err(invalid(input, "junk after IPv6 literal")),
                };
                (&host_port[..=end], port)
            }
            None => return Err(invalid(input, "unterminated IPv6 literal")),
        }
    } else {
        host_port.rsplit_once(':').unwrap_or((host_port, ""))
    };

    if port.is_empty() {
        return Ok((host, None));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| invalid(input, &format!("invalid port {:?}", port)))?;
    Ok((host, Some(port)))
}

fn normalize_host(host: &str, input: &str) -> Result<String, RequestError> {
    if host.is_empty() {
        return Ok(String::new());
    }
    url::Host::parse(host)
        .map(|h| h.to_string())
        .map_err(|e| invalid(input, &e.to_string()))
}

fn invalid(input: &str, reason: &str) -> RequestError {
    RequestError::InvalidUrl(format!("cannot parse endpoint {}: {}", input, reason))
}

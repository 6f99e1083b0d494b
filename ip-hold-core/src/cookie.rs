use percent_encoding::percent_decode_str;

/// Cookie carrying the anti-forgery token echoed in `X-CSRFToken`.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Extract the value of cookie `name` from a raw `Cookie` header string.
///
/// Pairs are split on `;` and trimmed; the first pair starting with `name=`
/// wins and its value is percent-decoded. Returns `None` when no cookies are
/// present, the name is absent, or the value does not decode to UTF-8.
pub fn get_token(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.trim().is_empty() || name.is_empty() {
        return None;
    }

    let raw = cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))?;

    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|value| value.into_owned())
}

/// Shorthand for the CSRF token lookup used by state-changing requests.
pub fn csrf_token(cookie_header: &str) -> Option<String> {
    get_token(cookie_header, CSRF_COOKIE)
}

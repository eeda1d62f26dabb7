use url::Url;

/// Extracts the short code from a pasted short link of the form
/// `https://host/link/{code}`.
pub fn extract_short_code(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    let mut segments = url.path_segments()?;

    if segments.next()? != "link" {
        return None;
    }

    let code = segments.next()?;
    if code.is_empty() {
        return None;
    }
    Some(code.to_string())
}

use url::Url;

/// Normalizes a website or social link: adds a scheme when missing and
/// forces https. Returns `None` when the value cannot be parsed as a URL.
pub fn normalize_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&candidate).ok()?;
    match url.scheme() {
        "https" => {}
        "http" => url.set_scheme("https").ok()?,
        _ => return None,
    }
    // A URL without a real host ("https://") is not a usable link.
    url.host_str()?;

    Some(url.to_string())
}

/// Turn a scraped `href` into an absolute URL where possible.
///
/// Absolute `http`/`https` links pass through untouched and root-relative
/// links get `base_origin` prefixed. Anything else is returned as-is and may
/// not be absolute.
pub fn normalize_url(href: &str, base_origin: &str) -> String {
    if has_http_scheme(href) {
        return href.to_string();
    }
    if href.starts_with('/') {
        return format!("{}{}", base_origin.trim_end_matches('/'), href);
    }
    href.to_string()
}

fn has_http_scheme(href: &str) -> bool {
    starts_with_ignore_case(href, "http://") || starts_with_ignore_case(href, "https://")
}

pub(crate) fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

pub(crate) fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| value.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

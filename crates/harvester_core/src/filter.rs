use crate::normalize::ends_with_ignore_case;

/// Component after the last `/` of a link's path.
///
/// Query string and fragment are not part of the segment and trailing slashes
/// are ignored, so `https://h/a/b.zip?x=1` and `https://h/a/b.zip/` both
/// yield `b.zip`. Returns an empty string when no segment is left.
pub fn final_path_segment(link: &str) -> &str {
    let path = link
        .split(['?', '#'])
        .next()
        .unwrap_or(link)
        .trim_end_matches('/');
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Keep the links whose final path segment is not on `denied`, in order.
pub fn exclude_denied(links: Vec<String>, denied: &[&str]) -> Vec<String> {
    links
        .into_iter()
        .filter(|link| !denied.contains(&final_path_segment(link)))
        .collect()
}

/// Whether `link` names an archive worth downloading.
pub fn is_archive_link(link: &str, suffix: &str) -> bool {
    ends_with_ignore_case(link, suffix)
}

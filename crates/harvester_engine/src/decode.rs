use encoding_rs::{Encoding, UTF_8};

/// Decode a fetched page into text.
///
/// A byte-order mark wins, then the `charset` of the Content-Type header,
/// then UTF-8. Undecodable sequences become U+FFFD; link extraction is
/// best-effort so a damaged page is not an error.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let (name, value) = part.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_is_honoured() {
        let latin1 = b"caf\xe9 jdbc";
        let text = decode_page(latin1, Some("text/html; Charset=\"ISO-8859-1\""));
        assert_eq!(text, "café jdbc");
    }

    #[test]
    fn bom_overrides_header() {
        let bytes = b"\xef\xbb\xbfok";
        assert_eq!(decode_page(bytes, Some("text/html; charset=latin1")), "ok");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let text = decode_page(b"a\xffb", None);
        assert_eq!(text, "a\u{fffd}b");
    }
}

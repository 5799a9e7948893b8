use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex matching the self-describing data-URI marker on encoded images.
    /// Captures the MIME subtype so the payload can be split off in one pass.
    /// - Valid: "data:image/jpeg;base64,/9j/4AA...", "data:image/png;base64,iVBOR..."
    /// - Invalid: "data:text/plain;base64,...", raw base64 without a marker
    pub static ref DATA_URI_REGEX: Regex =
        Regex::new(r"^data:(image/[a-z0-9.+-]+);base64,").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_regex_valid() {
        assert!(DATA_URI_REGEX.is_match("data:image/jpeg;base64,/9j/4AAQSkZJRg=="));
        assert!(DATA_URI_REGEX.is_match("data:image/png;base64,iVBORw0KGgo="));
        assert!(DATA_URI_REGEX.is_match("data:image/webp;base64,UklGRg=="));
        assert!(DATA_URI_REGEX.is_match("data:image/svg+xml;base64,PHN2Zz4="));
    }

    #[test]
    fn test_data_uri_regex_invalid() {
        assert!(!DATA_URI_REGEX.is_match("data:text/plain;base64,aGVsbG8=")); // not an image
        assert!(!DATA_URI_REGEX.is_match("iVBORw0KGgo=")); // no marker
        assert!(!DATA_URI_REGEX.is_match("data:image/png,iVBORw0KGgo=")); // not base64
        assert!(!DATA_URI_REGEX.is_match("DATA:IMAGE/PNG;BASE64,iVBORw0KGgo=")); // uppercase
        assert!(!DATA_URI_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_data_uri_regex_captures_mime() {
        let caps = DATA_URI_REGEX
            .captures("data:image/jpeg;base64,/9j/4AAQ")
            .unwrap();
        assert_eq!(&caps[1], "image/jpeg");
    }
}

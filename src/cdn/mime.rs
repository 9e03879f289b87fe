//! Content types for proxied CDN assets.
//!
//! Upstream `Content-Type` headers are ignored; the type follows the file
//! extension so cached and freshly fetched copies are served identically.

/// Extension → media type. Anything else is served as [`FALLBACK`].
const TYPES: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("map", "application/json"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("eot", "application/vnd.ms-fontobject"),
    ("svg", "image/svg+xml"),
];

pub const FALLBACK: &str = "application/octet-stream";

/// Media types that get an explicit UTF-8 charset.
const TEXT_PREFIXES: &[&str] = &[
    "text/",
    "application/json",
    "application/javascript",
    "application/xml",
];

/// `Content-Type` value for a CDN path, charset included where textual.
pub fn content_type(path: &str) -> String {
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext);

    let mime = extension
        .and_then(|ext| TYPES.iter().find(|(known, _)| *known == ext))
        .map_or(FALLBACK, |(_, mime)| mime);

    with_charset(mime)
}

fn with_charset(mime: &str) -> String {
    if mime.contains("charset") || !TEXT_PREFIXES.iter().any(|p| mime.starts_with(p)) {
        return mime.to_string();
    }
    format!("{mime}; charset=UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type("npm/a@1/dist/full.min.css"), "text/css; charset=UTF-8");
        assert_eq!(
            content_type("npm/alpinejs@3/dist/cdn.min.js"),
            "application/javascript; charset=UTF-8"
        );
        assert_eq!(content_type("npm/a/a.js.map"), "application/json; charset=UTF-8");
        assert_eq!(content_type("npm/f/font.woff2"), "font/woff2");
        assert_eq!(content_type("npm/i/icon.svg"), "image/svg+xml");
    }

    #[test]
    fn test_unknown_or_missing_extension_falls_back() {
        assert_eq!(content_type("tailwindcss/tailwind"), FALLBACK);
        assert_eq!(content_type("npm/x.y@1/LICENSE"), FALLBACK);
        assert_eq!(content_type("npm/a/data.bin"), FALLBACK);
    }

    #[test]
    fn test_charset_not_repeated() {
        assert_eq!(with_charset("text/css; charset=latin1"), "text/css; charset=latin1");
    }
}

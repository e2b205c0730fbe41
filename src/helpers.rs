use crate::error::Error;
use percent_encoding::percent_decode_str;

/// Percent-decodes a path segment or query component. A malformed encoding
/// (invalid UTF-8 after decoding) is a fault.
pub(crate) fn percent_decode(raw: &str) -> crate::Result<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::new(format!("could not percent-decode {:?}: {}", raw, e)).into())
}

/// Splits a raw route into its bare path and the optional query text after
/// the first `?`.
pub(crate) fn split_route(route: &str) -> (&str, Option<&str>) {
    match route.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (route, None),
    }
}

/// Parses `key=value` pairs separated by `&`, percent-decoding both sides.
/// A pair without `=` gets an empty value; empty elements are skipped.
pub(crate) fn parse_query(query: &str) -> crate::Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for element in query.split('&') {
        if element.is_empty() {
            continue;
        }
        let (key, value) = element.split_once('=').unwrap_or((element, ""));
        pairs.push((percent_decode(key)?, percent_decode(value)?));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_route_and_query() {
        assert_eq!(split_route("/users/42"), ("/users/42", None));
        assert_eq!(split_route("/search?q=x"), ("/search", Some("q=x")));
        assert_eq!(split_route("/a?b=1?c=2"), ("/a", Some("b=1?c=2")));
    }

    #[test]
    fn parses_and_decodes_pairs() {
        let pairs = parse_query("q=a%20b&flag&x=1").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("q".to_owned(), "a b".to_owned()),
                ("flag".to_owned(), String::new()),
                ("x".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn skips_empty_elements() {
        assert!(parse_query("").unwrap().is_empty());
        assert_eq!(parse_query("&&a=1").unwrap().len(), 1);
    }

    #[test]
    fn invalid_utf8_is_a_fault() {
        assert!(parse_query("q=%FF").is_err());
    }
}

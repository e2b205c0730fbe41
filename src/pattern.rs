use crate::helpers;
use std::collections::HashMap;

/// A registered route pattern, tokenized into path segments.
///
/// A segment starting with `:` is a named parameter and binds exactly one
/// non-empty path segment; every other segment must match byte-for-byte.
/// Matching is strict about segment counts: `/users/42/` carries a trailing
/// empty segment and therefore does not match `/users/:id`. Parameter
/// values are percent-decoded at extraction time; literals are compared
/// against the path as sent.
#[derive(Debug, Clone)]
pub(crate) struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    has_params: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl RoutePattern {
    pub(crate) fn parse<P: Into<String>>(pattern: P) -> RoutePattern {
        let raw = pattern.into();
        let segments: Vec<Segment> = raw
            .split('/')
            .map(|part| match part.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Literal(part.to_owned()),
            })
            .collect();
        let has_params = segments.iter().any(|s| matches!(s, Segment::Param(_)));

        RoutePattern {
            raw,
            segments,
            has_params,
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }

    pub(crate) fn has_params(&self) -> bool {
        self.has_params
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(parts)
            .all(|(segment, part)| match segment {
                Segment::Literal(literal) => literal == part,
                Segment::Param(_) => !part.is_empty(),
            })
    }

    /// Extracts the named parameter values out of a path this pattern
    /// matches, percent-decoding each bound segment.
    pub(crate) fn params(&self, path: &str) -> crate::Result<HashMap<String, String>> {
        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(path.split('/')) {
            if let Segment::Param(name) = segment {
                params.insert(name.clone(), helpers::percent_decode(part)?);
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::RoutePattern;

    #[test]
    fn literal_pattern() {
        let pattern = RoutePattern::parse("/about");
        assert!(!pattern.has_params());
        assert!(pattern.matches("/about"));
        assert!(!pattern.matches("/about/me"));
    }

    #[test]
    fn named_parameter() {
        let pattern = RoutePattern::parse("/users/:id");
        assert!(pattern.has_params());
        assert!(pattern.matches("/users/42"));
        let params = pattern.params("/users/42").unwrap();
        assert_eq!(params["id"], "42");
    }

    #[test]
    fn parameter_values_are_decoded() {
        let pattern = RoutePattern::parse("/users/:name");
        let params = pattern.params("/users/jane%20doe").unwrap();
        assert_eq!(params["name"], "jane doe");
    }

    #[test]
    fn trailing_slash_does_not_match() {
        let pattern = RoutePattern::parse("/users/:id");
        assert!(!pattern.matches("/users/42/"));
    }

    #[test]
    fn empty_segment_does_not_bind() {
        let pattern = RoutePattern::parse("/users/:id");
        assert!(!pattern.matches("/users/"));
    }

    #[test]
    fn adjacent_parameters_are_unambiguous() {
        let pattern = RoutePattern::parse("/pair/:a/:b");
        assert!(pattern.matches("/pair/1/2"));
        let params = pattern.params("/pair/1/2").unwrap();
        assert_eq!(params["a"], "1");
        assert_eq!(params["b"], "2");
    }

    #[test]
    fn literal_between_parameters() {
        let pattern = RoutePattern::parse("/users/:user/books/:book");
        let params = pattern.params("/users/alice/books/dune").unwrap();
        assert_eq!(params["user"], "alice");
        assert_eq!(params["book"], "dune");
    }
}

//! # Matcher Module
//!
//! Decides whether a request path fits a [`CompiledPattern`] and, if so,
//! binds each parameter to its typed value.
//!
//! Matching is a single left-to-right walk with no backtracking:
//!
//! 1. Tokenize the path with [`split_segments`] (same rule as templates)
//! 2. Bail out if the segment count differs from the pattern length
//! 3. Compare literals exactly; convert parameter segments with their type
//! 4. The first failed pair ends the walk with no match
//!
//! A failed conversion (e.g. `abc` for an `int` parameter) is a no-match,
//! never an error, so a route table can move on to its next candidate.
//!
//! The pattern is only read, so one pattern can serve any number of
//! concurrent matches.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::params::ParamValue;
use crate::template::{split_segments, CompiledPattern, PathItem};

/// Maximum number of bindings kept inline before spilling to the heap.
/// Most routes carry at most a handful of parameters.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Inline storage for `(name, value)` pairs.
///
/// Names are `Arc<str>` shared with the compiled pattern, so a match only
/// allocates for the values.
pub type ParamVec = SmallVec<[(Arc<str>, ParamValue); MAX_INLINE_PARAMS]>;

/// Path segments borrowed from the request path.
pub(crate) type SegmentVec<'a> = SmallVec<[&'a str; 16]>;

/// Parameter bindings produced by a successful match, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    params: ParamVec,
}

impl Bindings {
    /// Look up a bound value by parameter name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(ParamValue::as_int)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Copy the bindings into a `HashMap`.
    /// Note: This allocates - use `get()` in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, ParamValue> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn push(&mut self, name: &Arc<str>, value: ParamValue) {
        self.params.push((Arc::clone(name), value));
    }
}

impl Serialize for Bindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (name, value) in &self.params {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}

/// Match `path` against `pattern`.
///
/// Returns `None` on a segment-count mismatch, a literal mismatch, or a
/// parameter segment that does not convert to the declared type.
///
/// # Example
///
/// ```rust
/// use ctrlroute::{matcher::match_path, template::parse};
///
/// let pattern = parse("users/{id:int}").unwrap();
/// let bindings = match_path(&pattern, "/users/42").unwrap();
/// assert_eq!(bindings.get_int("id"), Some(42));
///
/// assert!(match_path(&pattern, "users/abc").is_none());
/// assert!(match_path(&pattern, "users/42/extra").is_none());
/// ```
#[must_use]
pub fn match_path(pattern: &CompiledPattern, path: &str) -> Option<Bindings> {
    let segments: SegmentVec<'_> = split_segments(path).collect();
    match_segments(pattern, &segments)
}

/// Match an already tokenized path.
pub(crate) fn match_segments(pattern: &CompiledPattern, segments: &[&str]) -> Option<Bindings> {
    if segments.len() != pattern.len() {
        return None;
    }

    let mut bindings = Bindings::default();

    for (item, &segment) in pattern.items().iter().zip(segments) {
        match item {
            PathItem::Literal(literal) => {
                if literal != segment {
                    return None;
                }
            }
            PathItem::Parameter { name, param_type } => {
                let value = param_type.convert(segment)?;
                bindings.push(name, value);
            }
        }
    }

    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse;

    #[test]
    fn test_int_parameter_binds_integer() {
        let pattern = parse("users/{id:int}").unwrap();
        let bindings = match_path(&pattern, "users/42").unwrap();
        assert_eq!(bindings.get("id"), Some(&ParamValue::Int(42)));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_match_segments_on_pre_split_path() {
        let pattern = parse("users/{id:int}/posts/{slug}").unwrap();
        let segments: SegmentVec<'_> = split_segments("//users/9/posts/hello/").collect();
        let bindings = match_segments(&pattern, &segments).unwrap();
        assert_eq!(bindings, match_path(&pattern, "users/9/posts/hello").unwrap());
        assert_eq!(bindings.get_int("id"), Some(9));
        assert!(match_segments(&pattern, &segments[..3]).is_none());
    }

    #[test]
    fn test_conversion_failure_is_no_match() {
        let pattern = parse("users/{id:int}").unwrap();
        assert!(match_path(&pattern, "users/abc").is_none());
        assert!(match_path(&pattern, "users/99999999999").is_none());
    }

    #[test]
    fn test_segment_count_mismatch() {
        let pattern = parse("a/b").unwrap();
        assert!(match_path(&pattern, "a/b/c").is_none());
        assert!(match_path(&pattern, "a").is_none());
    }

    #[test]
    fn test_empty_segments_collapse() {
        let pattern = parse("a/b").unwrap();
        let bindings = match_path(&pattern, "/a//b/").unwrap();
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let pattern = parse("Users/{name}").unwrap();
        assert!(match_path(&pattern, "users/bob").is_none());
        assert_eq!(
            match_path(&pattern, "Users/Bob").unwrap().get_str("name"),
            Some("Bob")
        );
    }

    #[test]
    fn test_root_pattern_matches_root_only() {
        let pattern = parse("/").unwrap();
        assert!(match_path(&pattern, "").is_some());
        assert!(match_path(&pattern, "//").is_some());
        assert!(match_path(&pattern, "/x").is_none());
    }

    #[test]
    fn test_bindings_keep_template_order() {
        let pattern = parse("{lang}/docs/{section}/{page:int}").unwrap();
        let bindings = match_path(&pattern, "en/docs/routing/3").unwrap();
        let names: Vec<_> = bindings.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["lang", "section", "page"]);

        let map = bindings.to_map();
        assert_eq!(map.get("page"), Some(&ParamValue::Int(3)));
        assert_eq!(map.get("lang"), Some(&ParamValue::from("en")));
    }

    #[test]
    fn test_typed_accessors() {
        let pattern = parse("{name}/{id:int}").unwrap();
        let bindings = match_path(&pattern, "widget/-5").unwrap();
        assert_eq!(bindings.get_int("id"), Some(-5));
        assert_eq!(bindings.get_str("id"), None);
        assert_eq!(bindings.get_str("name"), Some("widget"));
        assert_eq!(bindings.get_int("missing"), None);
    }

    #[test]
    fn test_string_parameter_keeps_segment_verbatim() {
        let pattern = parse("files/{name}").unwrap();
        let bindings = match_path(&pattern, "files/Report%20v2.PDF").unwrap();
        assert_eq!(bindings.get_str("name"), Some("Report%20v2.PDF"));
    }

    #[test]
    fn test_matching_is_deterministic() {
        let pattern = parse("shop/{category}/{page:int}").unwrap();
        let first = match_path(&pattern, "shop/books/2");
        let second = match_path(&pattern, "shop/books/2");
        assert_eq!(first, second);
    }

    #[test]
    fn test_bindings_serialize_as_object() {
        let pattern = parse("users/{id:int}/{tab}").unwrap();
        let bindings = match_path(&pattern, "users/7/posts").unwrap();
        let json = serde_json::to_value(&bindings).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "tab": "posts"}));
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let template: Vec<String> = (0..10).map(|i| format!("{{p{i}:int}}")).collect();
        let pattern = parse(&template.join("/")).unwrap();
        let path: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let bindings = match_path(&pattern, &path.join("/")).unwrap();
        assert_eq!(bindings.len(), 10);
        assert_eq!(bindings.get_int("p9"), Some(9));
    }
}

//! Path normalization shared by route registration and request matching.
//!
//! Both sides of the router see paths through the same lens so that
//! `/hello/`, `//hello` and `/hello` all address the same route:
//!
//! - a missing leading `/` is implied
//! - empty segments produced by repeated slashes are ignored
//! - trailing slashes are stripped (the bare root stays `/`)
//! - `.` segments are dropped and `..` removes the preceding segment,
//!   never climbing above the root

use smallvec::SmallVec;

/// Segments kept inline before spilling to the heap.
/// Request paths deeper than this are rare; they still work, they just allocate.
pub const MAX_INLINE_SEGMENTS: usize = 16;

/// Borrowed path segments, stack-allocated for typical path depths.
pub type SegmentVec<'a> = SmallVec<[&'a str; MAX_INLINE_SEGMENTS]>;

/// Split a path into its normalized, non-empty segments.
///
/// ```rust
/// use segrouter::path::segments;
///
/// assert_eq!(segments("//users/./42/../7/").as_slice(), &["users", "7"]);
/// assert!(segments("/").is_empty());
/// ```
#[must_use]
pub fn segments(path: &str) -> SegmentVec<'_> {
    let mut out = SegmentVec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out
}

/// Normalize a path into its canonical `/a/b/c` form.
///
/// ```rust
/// use segrouter::path::normalize;
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("hello//world/"), "/hello/world");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let parts = segments(path);
    if parts.is_empty() {
        return "/".to_string();
    }

    let mut out = String::with_capacity(path.len() + 1);
    for part in parts {
        out.push('/');
        out.push_str(part);
    }
    out
}

/// Join a router prefix with a route path and normalize the result.
#[must_use]
pub fn join(prefix: &str, path: &str) -> String {
    let mut joined = String::with_capacity(prefix.len() + path.len() + 1);
    joined.push_str(prefix);
    joined.push('/');
    joined.push_str(path);
    normalize(&joined)
}

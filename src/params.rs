//! # Parameter Store
//!
//! Path parameters captured while matching a request. A fresh [`Params`] is
//! built for every successful match and installed into the request's
//! extensions, so each in-flight request owns its bindings exclusively.
//!
//! Plain lookups return `Option<&str>`. Typed accessors report a missing
//! binding and an unparsable value as distinct [`ParamError`] variants so
//! callers can branch on absence versus malformed input.

use smallvec::SmallVec;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Names are `Arc<str>` shared with the route tree, so binding one is an
/// atomic increment rather than a string copy. Values are per-request data
/// taken from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Error returned by the typed parameter accessors
#[derive(Debug)]
pub enum ParamError {
    /// No parameter with this name was bound for the request
    Missing {
        /// The requested parameter name
        name: String,
    },
    /// The parameter is bound but its value does not parse as the requested type
    Parse {
        /// The requested parameter name
        name: String,
        /// The raw captured value
        value: String,
        /// The underlying conversion error
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ParamError {
    /// True when the parameter was never bound
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, ParamError::Missing { .. })
    }

    /// Name of the parameter this error refers to
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ParamError::Missing { name } | ParamError::Parse { name, .. } => name,
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Missing { name } => {
                write!(f, "path parameter '{}' is not bound", name)
            }
            ParamError::Parse {
                name,
                value,
                source,
            } => write!(
                f,
                "path parameter '{}' has unparsable value '{}': {}",
                name, value, source
            ),
        }
    }
}

impl StdError for ParamError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ParamError::Missing { .. } => None,
            ParamError::Parse { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Path parameters bound by a successful route match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    /// Create an empty parameter store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_vec(inner: ParamVec) -> Self {
        Self { inner }
    }

    /// Bind `value` to `name`.
    ///
    /// Earlier bindings with the same name are kept but shadowed.
    pub fn push(&mut self, name: impl Into<Arc<str>>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Get a parameter by name
    ///
    /// Uses "last write wins" semantics: if the same name is bound at
    /// different path depths (e.g., `/org/:id/user/:id`), the deepest
    /// binding is returned.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parse a parameter into any `FromStr` type
    ///
    /// # Errors
    ///
    /// [`ParamError::Missing`] when `name` is unbound,
    /// [`ParamError::Parse`] when the value fails to parse.
    pub fn get_parsed<T>(&self, name: &str) -> Result<T, ParamError>
    where
        T: FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        let value = self.get(name).ok_or_else(|| ParamError::Missing {
            name: name.to_string(),
        })?;
        value.parse::<T>().map_err(|e| ParamError::Parse {
            name: name.to_string(),
            value: value.to_string(),
            source: Box::new(e),
        })
    }

    /// Parse a parameter as a signed 64-bit integer
    ///
    /// # Errors
    ///
    /// See [`Params::get_parsed`].
    pub fn get_i64(&self, name: &str) -> Result<i64, ParamError> {
        self.get_parsed(name)
    }

    /// Parse a parameter as an unsigned 64-bit integer
    ///
    /// # Errors
    ///
    /// See [`Params::get_parsed`].
    pub fn get_u64(&self, name: &str) -> Result<u64, ParamError> {
        self.get_parsed(name)
    }

    /// Parse a parameter as a 64-bit float
    ///
    /// # Errors
    ///
    /// See [`Params::get_parsed`].
    pub fn get_f64(&self, name: &str) -> Result<f64, ParamError> {
        self.get_parsed(name)
    }

    /// Parse a parameter as a boolean
    ///
    /// Accepts `true`/`false` as well as `1`/`0`, `t`/`f` in any case.
    ///
    /// # Errors
    ///
    /// See [`Params::get_parsed`].
    pub fn get_bool(&self, name: &str) -> Result<bool, ParamError> {
        let value = self.get(name).ok_or_else(|| ParamError::Missing {
            name: name.to_string(),
        })?;
        match value {
            "1" | "t" | "T" => Ok(true),
            "0" | "f" | "F" => Ok(false),
            v if v.eq_ignore_ascii_case("true") => Ok(true),
            v if v.eq_ignore_ascii_case("false") => Ok(false),
            v => Err(ParamError::Parse {
                name: name.to_string(),
                value: v.to_string(),
                source: Box::new(ParseBoolError),
            }),
        }
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing was bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(name, value)` pairs in binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }
}

#[derive(Debug)]
struct ParseBoolError;

impl fmt::Display for ParseBoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of true, false, t, f, 1, 0")
    }
}

impl StdError for ParseBoolError {}

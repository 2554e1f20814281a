//! RFC 7807 problem details as an error value.
//!
//! # Value Semantics
//!
//! A [`Problem`] is an immutable snapshot. Every mutator consumes the problem
//! and hands back an updated one; wrapping (`wrap`, `with_stack`,
//! `with_message`) does the same and only ever replaces the cause.
//!
//! The cause lives behind an `Arc` and is never mutated in place. Clones are
//! cheap and fully independent: a clone taken before a wrap keeps the cause
//! it was taken with.
//!
//! ```rust
//! use problem_details::Problem;
//!
//! let original = Problem::new("Bad Request", "field X missing", 400);
//! let wrapped = original.clone().wrap("while validating payload");
//!
//! assert_eq!(original.to_string(), "field X missing");
//! assert_eq!(wrapped.to_string(), "while validating payload: field X missing");
//! ```
//!
//! # Detail and Cause
//!
//! `detail` is taken from the cause's message once, at construction. Later
//! wraps change the cause (and therefore `Display`) but leave `detail`
//! alone, so the serialized body stays stable while the internal error chain
//! gains context.

use crate::chain::{Annotation, Chained, ErrorChain, StackChain};
use crate::logging::ProblemLog;
use crate::BoxError;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Problem type used when no specific type URI is given.
pub const DEFAULT_TYPE: &str = "about:blank";

/// Structured error carrying RFC 7807 problem details and an underlying cause.
#[derive(Clone)]
#[must_use = "problems should be returned or rendered"]
pub struct Problem {
    title: String,
    detail: String,
    type_uri: String,
    instance: String,
    status: u16,
    cause: Arc<dyn Error + Send + Sync>,
}

impl Problem {
    /// Create a problem whose cause is a new error carrying `detail`.
    ///
    /// The problem type starts as [`DEFAULT_TYPE`].
    pub fn new(title: impl Into<String>, detail: impl Into<String>, status: u16) -> Self {
        Self::with_cause(Arc::new(Chained::new(detail)), title.into(), status)
    }

    /// Create a problem around an existing error.
    ///
    /// `detail` is the error's message; title is empty and status unset.
    ///
    /// ```rust
    /// use problem_details::Problem;
    /// use std::io;
    ///
    /// let p = Problem::from_error(io::Error::other("disk full"))
    ///     .with_title("Storage Unavailable")
    ///     .with_status(503);
    /// assert_eq!(p.detail(), "disk full");
    /// ```
    pub fn from_error(err: impl Into<BoxError>) -> Self {
        Self::with_cause(Arc::from(err.into()), String::new(), 0)
    }

    fn with_cause(cause: Arc<dyn Error + Send + Sync>, title: String, status: u16) -> Self {
        Self {
            title,
            detail: cause.to_string(),
            type_uri: DEFAULT_TYPE.to_owned(),
            instance: String::new(),
            status,
            cause,
        }
    }

    /// Replace the title.
    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the detail. The cause is left as is.
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Set the problem type URI. An empty value resets it to [`DEFAULT_TYPE`].
    #[inline]
    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.type_uri = normalize_type(type_uri.into());
        self
    }

    /// Replace the instance URI.
    #[inline]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    /// Set the status code. `0` means unset.
    #[inline]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Wrap the cause with `message` and record a stack.
    #[inline]
    pub fn wrap(self, message: impl Into<String>) -> Self {
        self.annotate_with(&StackChain, Annotation::Wrap(message.into()))
    }

    /// Record a stack on the cause.
    #[inline]
    pub fn with_stack(self) -> Self {
        self.annotate_with(&StackChain, Annotation::Stack)
    }

    /// Prefix the cause with `message` without recording a stack.
    #[inline]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.annotate_with(&StackChain, Annotation::Message(message.into()))
    }

    /// Annotate the cause through `chain`. All other fields are untouched.
    pub fn annotate_with<C>(mut self, chain: &C, annotation: Annotation) -> Self
    where
        C: ErrorChain + ?Sized,
    {
        let cause: BoxError = Box::new(Arc::clone(&self.cause));
        self.cause = Arc::from(chain.annotate(cause, annotation));
        self
    }

    /// Short summary of the problem type.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Explanation of this occurrence.
    #[inline]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Problem type URI. Never empty.
    #[inline]
    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    /// URI of this occurrence.
    #[inline]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Status code, `0` when unset.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The underlying error.
    #[inline]
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }

    /// Borrowed structured view for loggers.
    ///
    /// The view cannot outlive the problem.
    #[inline]
    pub fn log(&self) -> ProblemLog<'_> {
        ProblemLog::new(self)
    }

    /// Callback form of [`Problem::log`].
    ///
    /// ```rust
    /// # use problem_details::Problem;
    /// let p = Problem::new("Not Found", "no such user", 404);
    /// let line = p.with_log(|log| {
    ///     let mut line = String::new();
    ///     log.write_to(&mut line).map(|_| line)
    /// });
    /// assert!(line.unwrap().starts_with("[404]"));
    /// ```
    #[inline]
    pub fn with_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ProblemLog<'_>) -> R,
    {
        let log = self.log();
        f(&log)
    }
}

#[inline]
fn normalize_type(type_uri: String) -> String {
    if type_uri.is_empty() {
        DEFAULT_TYPE.to_owned()
    } else {
        type_uri
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("title", &self.title)
            .field("detail", &self.detail)
            .field("type", &self.type_uri)
            .field("instance", &self.instance)
            .field("status", &self.status)
            .field("cause", &format_args!("{}", self.cause))
            .finish()
    }
}

impl fmt::Display for Problem {
    /// `{}` is the cause's message.
    ///
    /// `{:#}` is the rich rendering: the cause's own alternate form when the
    /// cause came from the default chain (messages and stacks), otherwise the
    /// detail.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return match self.cause.downcast_ref::<Chained>() {
                Some(rich) => fmt::Display::fmt(rich, f),
                None => f.write_str(&self.detail),
            };
        }
        fmt::Display::fmt(&*self.cause, f)
    }
}

impl Error for Problem {
    /// Transparent over the cause: the cause's message is already this
    /// problem's message, so the chain continues at the cause's source.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.source()
    }
}

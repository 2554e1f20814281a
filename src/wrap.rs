//! Wrap-family operations over arbitrary errors.
//!
//! [`wrap`], [`with_stack`] and [`with_message`] accept any boxed error:
//!
//! - `None` passes through as `None`.
//! - A [`Problem`] stays a problem. The annotation is applied to its cause
//!   and every structured field is kept.
//! - Anything else is handed to the [`ErrorChain`] and comes back opaque.
//!
//! The `*_with` forms take the chain explicitly; the plain forms use
//! [`StackChain`].
//!
//! ```rust
//! use problem_details::{as_problem, wrap, BoxError, Problem};
//!
//! let err: BoxError = Problem::new("Bad Request", "field X missing", 400).into();
//! let err = wrap(Some(err), "while validating payload").unwrap();
//!
//! let problem = as_problem(&*err).unwrap();
//! assert_eq!(problem.title(), "Bad Request");
//! assert_eq!(problem.to_string(), "while validating payload: field X missing");
//! ```

use crate::chain::{Annotation, ErrorChain, StackChain};
use crate::{BoxError, Problem};
use std::error::Error;

/// Wrap `err` with `message` and record a stack.
#[inline]
pub fn wrap(err: Option<BoxError>, message: impl Into<String>) -> Option<BoxError> {
    wrap_with(&StackChain, err, message)
}

/// Record a stack on `err`.
#[inline]
pub fn with_stack(err: Option<BoxError>) -> Option<BoxError> {
    with_stack_with(&StackChain, err)
}

/// Prefix `err` with `message` without recording a stack.
#[inline]
pub fn with_message(err: Option<BoxError>, message: impl Into<String>) -> Option<BoxError> {
    with_message_with(&StackChain, err, message)
}

/// [`wrap`] through an explicit chain.
#[inline]
pub fn wrap_with<C>(chain: &C, err: Option<BoxError>, message: impl Into<String>) -> Option<BoxError>
where
    C: ErrorChain + ?Sized,
{
    annotate(chain, err, Annotation::Wrap(message.into()))
}

/// [`with_stack`] through an explicit chain.
#[inline]
pub fn with_stack_with<C>(chain: &C, err: Option<BoxError>) -> Option<BoxError>
where
    C: ErrorChain + ?Sized,
{
    annotate(chain, err, Annotation::Stack)
}

/// [`with_message`] through an explicit chain.
#[inline]
pub fn with_message_with<C>(
    chain: &C,
    err: Option<BoxError>,
    message: impl Into<String>,
) -> Option<BoxError>
where
    C: ErrorChain + ?Sized,
{
    annotate(chain, err, Annotation::Message(message.into()))
}

/// Apply `annotation` to `err`, keeping problems intact.
pub fn annotate<C>(chain: &C, err: Option<BoxError>, annotation: Annotation) -> Option<BoxError>
where
    C: ErrorChain + ?Sized,
{
    err.map(|err| annotate_error(chain, err, annotation))
}

fn annotate_error<C>(chain: &C, err: BoxError, annotation: Annotation) -> BoxError
where
    C: ErrorChain + ?Sized,
{
    match err.downcast::<Problem>() {
        Ok(problem) => Box::new((*problem).annotate_with(chain, annotation)),
        Err(other) => chain.annotate(other, annotation),
    }
}

/// The problem behind `err`, if it is one.
#[inline]
pub fn as_problem<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Problem> {
    err.downcast_ref::<Problem>()
}

/// Whether `err` is a problem.
#[inline]
pub fn is_problem(err: &(dyn Error + 'static)) -> bool {
    err.is::<Problem>()
}

/// Wrap-family operations on the error arm of a `Result`.
///
/// ```rust
/// use problem_details::{as_problem, Problem, ResultExt};
///
/// fn parse(input: &str) -> Result<u32, Problem> {
///     input
///         .parse()
///         .map_err(|_| Problem::new("Bad Request", "not a number", 400))
/// }
///
/// let err = parse("x").wrap_err("reading quantity").unwrap_err();
/// assert_eq!(as_problem(&*err).unwrap().status(), 400);
/// ```
pub trait ResultExt<T> {
    /// [`wrap`] the error.
    fn wrap_err(self, message: impl Into<String>) -> Result<T, BoxError>;

    /// [`with_stack`] the error.
    fn stack_err(self) -> Result<T, BoxError>;

    /// [`with_message`] the error.
    fn message_err(self, message: impl Into<String>) -> Result<T, BoxError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn wrap_err(self, message: impl Into<String>) -> Result<T, BoxError> {
        self.map_err(|err| annotate_error(&StackChain, err.into(), Annotation::Wrap(message.into())))
    }

    #[inline]
    fn stack_err(self) -> Result<T, BoxError> {
        self.map_err(|err| annotate_error(&StackChain, err.into(), Annotation::Stack))
    }

    #[inline]
    fn message_err(self, message: impl Into<String>) -> Result<T, BoxError> {
        self.map_err(|err| {
            annotate_error(&StackChain, err.into(), Annotation::Message(message.into()))
        })
    }
}

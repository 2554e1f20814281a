//! Generic error chaining.
//!
//! Problems never annotate their cause themselves. Every annotation (a
//! wrapping message, a captured stack, a prefixed message) goes through an
//! [`ErrorChain`], so the chaining strategy can be swapped without touching
//! the problem type.
//!
//! The default strategy is [`StackChain`], which produces [`Chained`] nodes:
//!
//! | Operation | Message | Stack | Renders as |
//! |-----------|---------|-------|------------|
//! | [`Chained::new`] | yes | yes | `msg` |
//! | wrap | yes | yes | `msg: cause` |
//! | with_stack | no | yes | `cause` |
//! | with_message | yes | no | `msg: cause` |
//!
//! The alternate form (`{:#}`) is the rich rendering: the cause chain from
//! the innermost error outwards, one message per line, each followed by the
//! stack frames captured at that point.
//!
//! Stack capture is controlled by the `backtrace` feature. With the feature
//! disabled, nodes are still created but carry no stack.

use crate::BoxError;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Kind of annotation applied to an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Wrap with a message and record a stack.
    Wrap(String),
    /// Record a stack without adding a message.
    Stack,
    /// Add a message without recording a stack.
    Message(String),
}

impl Annotation {
    /// Message carried by this annotation, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Wrap(message) | Self::Message(message) => Some(message),
            Self::Stack => None,
        }
    }
}

/// Strategy used to annotate errors that are not problems, and the causes of
/// those that are.
///
/// When annotating a problem's cause, `err` is the cause's shared handle;
/// use [`unshared`] to reach the original error.
pub trait ErrorChain {
    /// Wrap `err` with `message`, recording a stack.
    fn wrap(&self, err: BoxError, message: String) -> BoxError;

    /// Record a stack on `err`.
    fn with_stack(&self, err: BoxError) -> BoxError;

    /// Prefix `err` with `message` without recording a stack.
    fn with_message(&self, err: BoxError, message: String) -> BoxError;

    /// Apply `annotation` to `err`.
    fn annotate(&self, err: BoxError, annotation: Annotation) -> BoxError {
        match annotation {
            Annotation::Wrap(message) => self.wrap(err, message),
            Annotation::Stack => self.with_stack(err),
            Annotation::Message(message) => self.with_message(err, message),
        }
    }
}

/// Default chain. Produces [`Chained`] nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackChain;

impl ErrorChain for StackChain {
    #[inline]
    fn wrap(&self, err: BoxError, message: String) -> BoxError {
        Box::new(Chained::wrap(err, message))
    }

    #[inline]
    fn with_stack(&self, err: BoxError) -> BoxError {
        Box::new(Chained::with_stack(err))
    }

    #[inline]
    fn with_message(&self, err: BoxError, message: String) -> BoxError {
        Box::new(Chained::with_message(err, message))
    }
}

/// Stack captured when an error node was created.
///
/// Capture is unresolved; symbols are only resolved when the stack is
/// rendered, so errors that are never printed stay cheap.
#[derive(Clone)]
pub struct Stack {
    #[cfg(feature = "backtrace")]
    trace: backtrace::Backtrace,
}

impl Stack {
    /// Capture the current stack. Always `None` without the `backtrace` feature.
    #[cfg(feature = "backtrace")]
    #[inline]
    pub fn capture() -> Option<Self> {
        Some(Self {
            trace: backtrace::Backtrace::new_unresolved(),
        })
    }

    /// Capture the current stack. Always `None` without the `backtrace` feature.
    #[cfg(not(feature = "backtrace"))]
    #[inline]
    pub fn capture() -> Option<Self> {
        None
    }

    /// Number of captured frames.
    #[cfg(feature = "backtrace")]
    #[inline]
    pub fn depth(&self) -> usize {
        self.trace.frames().len()
    }

    /// Number of captured frames.
    #[cfg(not(feature = "backtrace"))]
    #[inline]
    pub fn depth(&self) -> usize {
        0
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("frames", &self.depth()).finish()
    }
}

#[cfg(feature = "backtrace")]
impl fmt::Display for Stack {
    /// One `\n    at symbol (file:line)` line per resolved symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut trace = self.trace.clone();
        trace.resolve();
        for frame in trace.frames() {
            for symbol in frame.symbols() {
                match symbol.name() {
                    Some(name) => write!(f, "\n    at {name}")?,
                    None => f.write_str("\n    at <unknown>")?,
                }
                if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                    write!(f, " ({}:{})", file.display(), line)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(feature = "backtrace"))]
impl fmt::Display for Stack {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// Error node produced by [`StackChain`].
pub struct Chained {
    message: Option<String>,
    cause: Option<BoxError>,
    stack: Option<Stack>,
}

impl Chained {
    /// Fundamental error: a message and the stack at the call site.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
            stack: Stack::capture(),
        }
    }

    /// `message: cause`, with a stack.
    pub fn wrap(cause: BoxError, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause),
            stack: Stack::capture(),
        }
    }

    /// `cause` unchanged, with a stack.
    pub fn with_stack(cause: BoxError) -> Self {
        Self {
            message: None,
            cause: Some(cause),
            stack: Stack::capture(),
        }
    }

    /// `message: cause`, without a stack.
    pub fn with_message(cause: BoxError, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause),
            stack: None,
        }
    }

    /// Message added by this node.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Stack recorded by this node.
    #[inline]
    pub fn stack(&self) -> Option<&Stack> {
        self.stack.as_ref()
    }
}

impl fmt::Debug for Chained {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chained")
            .field("message", &self.message)
            .field("cause", &self.cause)
            .field("stack", &self.stack)
            .finish()
    }
}

impl fmt::Display for Chained {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            match (&self.cause, &self.message) {
                (Some(cause), Some(message)) => write!(f, "{cause:#}\n{message}")?,
                (Some(cause), None) => write!(f, "{cause:#}")?,
                (None, Some(message)) => f.write_str(message)?,
                (None, None) => {}
            }
            if let Some(stack) = &self.stack {
                write!(f, "{stack}")?;
            }
            return Ok(());
        }

        match (&self.message, &self.cause) {
            (Some(message), Some(cause)) => write!(f, "{message}: {cause}"),
            (Some(message), None) => f.write_str(message),
            (None, Some(cause)) => write!(f, "{cause}"),
            (None, None) => Ok(()),
        }
    }
}

impl Error for Chained {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| unshared(e.as_ref() as &(dyn Error + 'static)))
    }
}

/// The error behind a shared handle.
///
/// A problem's cause is shared, so chains annotating it receive an
/// `Arc<dyn Error + Send + Sync>` rather than the original error. This
/// returns the original error for such a handle and `err` otherwise.
pub fn unshared<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    match err.downcast_ref::<Arc<dyn Error + Send + Sync>>() {
        Some(shared) => &**shared,
        None => err,
    }
}

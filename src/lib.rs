//! # Problem Details
//!
//! RFC 7807 problem details as a Rust error type that survives error
//! chaining.
//!
//! ## Design Philosophy
//!
//! 1. **Structured fields are for clients**: title, detail, type, instance
//!    and status make up the response body
//! 2. **The cause is for operators**: it carries the internal error chain
//!    and never reaches the wire
//! 3. **Wrapping preserves identity**: annotating a problem annotates its
//!    cause and keeps every structured field
//! 4. **Values, not references**: every mutator and wrap returns a new
//!    snapshot, so no alias can observe a change
//!
//! ## Quick Start
//!
//! ```rust
//! use problem_details::{Problem, Result};
//!
//! fn validate(payload: &str) -> Result<()> {
//!     if !payload.contains("x") {
//!         return Err(Problem::new("Bad Request", "field X missing", 400));
//!     }
//!     Ok(())
//! }
//!
//! let p = validate("{}").map_err(|p| p.wrap("while validating payload")).unwrap_err();
//!
//! // Client-facing fields are untouched by wrapping:
//! assert_eq!(p.title(), "Bad Request");
//! assert_eq!(p.detail(), "field X missing");
//!
//! // The error chain carries the context:
//! assert_eq!(p.to_string(), "while validating payload: field X missing");
//! ```
//!
//! ## Wrapping Arbitrary Errors
//!
//! The free functions in [`wrap`](mod@wrap) accept any boxed error, keep
//! problems as problems and delegate everything else to an [`ErrorChain`]:
//!
//! ```rust
//! use problem_details::{is_problem, with_message, BoxError, Problem};
//! use std::io;
//!
//! let io: BoxError = io::Error::other("refused").into();
//! assert!(!is_problem(&*with_message(Some(io), "connecting").unwrap()));
//!
//! let p: BoxError = Problem::new("Unavailable", "refused", 503).into();
//! assert!(is_problem(&*with_message(Some(p), "connecting").unwrap()));
//! ```
//!
//! ## Rendering
//!
//! - `{}`: the cause's message
//! - `{:#}`: rich rendering with the whole chain and captured stacks
//! - [`Problem::log`]: borrowed structured view for loggers
//! - `serde`: the RFC 7807 JSON document, see [`wire`]
//!
//! ## Features
//!
//! - `backtrace` (default): capture stacks when errors are created or wrapped

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::error::Error;
use std::result;

pub mod chain;
pub mod convenience;
pub mod logging;
pub mod problem;
pub mod wire;
pub mod wrap;

pub use chain::*;
pub use logging::*;
pub use problem::*;
pub use wire::*;
pub use wrap::*;

/// Boxed error accepted by the wrap family.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Type alias for Results using our error type.
pub type Result<T, E = Problem> = result::Result<T, E>;

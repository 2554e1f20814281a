//! Convenience macros for creating problems with format strings.
//!
//! # Usage
//!
//! ```rust
//! # use problem_details::{problem, Problem};
//! let field = "email";
//! let p = problem!(422, "Unprocessable Entity", "field '{}' is required", field);
//! assert_eq!(p.detail(), "field 'email' is required");
//! ```
//!
//! ```rust
//! # use problem_details::{ensure_problem, Problem};
//! fn withdraw(balance: u64, amount: u64) -> Result<u64, Problem> {
//!     ensure_problem!(amount <= balance, 403, "Out of credit", "balance is {balance}, cost is {amount}");
//!     Ok(balance - amount)
//! }
//!
//! let p = withdraw(30, 50).unwrap_err();
//! assert_eq!(p.detail(), "balance is 30, cost is 50");
//! ```
//!
//! `bail_problem!` and `ensure_problem!` convert with `.into()`, so they work
//! in functions returning `Result<_, Problem>` as well as `Result<_, BoxError>`.

/// Create a [`Problem`](crate::Problem) with a formatted detail.
///
/// `problem!(status, title, format, args...)`
#[macro_export]
macro_rules! problem {
    ($status:expr, $title:expr, $($detail:tt)+) => {
        $crate::Problem::new($title, ::std::format!($($detail)+), $status)
    };
}

/// Return early with a [`Problem`](crate::Problem).
#[macro_export]
macro_rules! bail_problem {
    ($($arg:tt)+) => {
        return ::std::result::Result::Err($crate::problem!($($arg)+).into())
    };
}

/// Return early with a [`Problem`](crate::Problem) unless a condition holds.
#[macro_export]
macro_rules! ensure_problem {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail_problem!($($arg)+);
        }
    };
}

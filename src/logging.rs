//! Structured log view of a problem.
//!
//! This crate never logs on its own. Callers hand a [`ProblemLog`] to
//! whatever logger they use, either field by field or as a single
//! `key='value'` line via [`ProblemLog::write_to`].
//!
//! The view borrows from the [`Problem`] that created it and cannot outlive
//! it. Accessors return borrowed data; only `write_to` renders the cause
//! chain, and every rendered field is truncated to bound log line size.

use crate::Problem;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed structured view of a [`Problem`].
///
/// # Example
///
/// ```rust
/// # use problem_details::Problem;
/// let p = Problem::new("Bad Gateway", "upstream refused", 502).wrap("calling billing");
/// let log = p.log();
/// assert_eq!(log.status(), 502);
/// assert_eq!(log.sources().len(), 1);
/// ```
#[derive(Debug)]
pub struct ProblemLog<'a> {
    title: &'a str,
    detail: &'a str,
    type_uri: &'a str,
    instance: &'a str,
    status: u16,
    cause: &'a (dyn Error + 'static),
    sources: SmallVec<[&'a (dyn Error + 'static); 4]>,
}

impl<'a> ProblemLog<'a> {
    pub(crate) fn new(problem: &'a Problem) -> Self {
        let cause: &'a (dyn Error + 'static) = problem.cause();

        let mut sources = SmallVec::new();
        let mut next = cause.source();
        while let Some(err) = next {
            sources.push(err);
            next = err.source();
        }

        Self {
            title: problem.title(),
            detail: problem.detail(),
            type_uri: problem.type_uri(),
            instance: problem.instance(),
            status: problem.status(),
            cause,
            sources,
        }
    }

    /// Write the problem as a single structured line.
    ///
    /// Format:
    /// `[status] title='..' type='..' detail='..' instance='..' cause='..' source[0]='..'`
    ///
    /// `instance` is omitted when empty, an unset status renders as `-`, and
    /// each `source[n]` is the next error down the cause chain.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        if self.status == 0 {
            f.write_str("[-]")?;
        } else {
            write!(f, "[{}]", self.status)?;
        }

        write!(
            f,
            " title='{}' type='{}' detail='{}'",
            truncate_with_indicator(self.title),
            truncate_with_indicator(self.type_uri),
            truncate_with_indicator(self.detail)
        )?;

        if !self.instance.is_empty() {
            write!(f, " instance='{}'", truncate_with_indicator(self.instance))?;
        }

        write!(
            f,
            " cause='{}'",
            truncate_with_indicator(&self.cause.to_string())
        )?;

        for (depth, source) in self.sources.iter().enumerate() {
            write!(
                f,
                " source[{}]='{}'",
                depth,
                truncate_with_indicator(&source.to_string())
            )?;
        }

        Ok(())
    }

    /// Problem title.
    #[inline]
    pub const fn title(&self) -> &str {
        self.title
    }

    /// Problem detail.
    #[inline]
    pub const fn detail(&self) -> &str {
        self.detail
    }

    /// Problem type URI.
    #[inline]
    pub const fn type_uri(&self) -> &str {
        self.type_uri
    }

    /// Occurrence URI, empty when unset.
    #[inline]
    pub const fn instance(&self) -> &str {
        self.instance
    }

    /// Status code, `0` when unset.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The problem's cause.
    #[inline]
    pub const fn cause(&self) -> &(dyn Error + 'static) {
        self.cause
    }

    /// Errors below the cause, nearest first.
    #[inline]
    pub fn sources(&self) -> &[&'a (dyn Error + 'static)] {
        &self.sources
    }
}

/// Cut a field value to [`MAX_FIELD_OUTPUT_LEN`] bytes on a char boundary,
/// ending it with [`TRUNCATION_INDICATOR`]. Short values are borrowed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    // Last char boundary at or before the limit
    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn line(problem: &Problem) -> String {
        let mut buffer = String::new();
        problem.log().write_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn write_to_renders_all_fields() {
        let p = Problem::new("Not Found", "no such user", 404)
            .with_type("https://example.com/probs/missing")
            .with_instance("/users/42");

        assert_eq!(
            line(&p),
            "[404] title='Not Found' type='https://example.com/probs/missing' \
             detail='no such user' instance='/users/42' cause='no such user'"
        );
    }

    #[test]
    fn unset_status_and_empty_instance() {
        let p = Problem::new("Oops", "broken", 0);
        let rendered = line(&p);
        assert!(rendered.starts_with("[-] title='Oops'"));
        assert!(!rendered.contains("instance="));
    }

    #[test]
    fn sources_follow_the_chain() {
        let p = Problem::new("Bad Gateway", "upstream refused", 502)
            .wrap("calling billing")
            .with_message("settling invoice");

        let log = p.log();
        assert_eq!(log.cause().to_string(), "settling invoice: calling billing: upstream refused");
        assert_eq!(log.sources().len(), 2);
        assert_eq!(log.sources()[0].to_string(), "calling billing: upstream refused");
        assert_eq!(log.sources()[1].to_string(), "upstream refused");

        let rendered = line(&p);
        assert!(rendered.contains(" source[0]='calling billing: upstream refused'"));
        assert!(rendered.contains(" source[1]='upstream refused'"));
        assert!(rendered.contains(" detail='upstream refused'"));
    }

    #[test]
    fn foreign_cause_without_source() {
        let p = Problem::from_error(io::Error::other("disk full")).with_status(507);
        let log = p.log();
        assert!(log.sources().is_empty());
        assert_eq!(log.title(), "");
        assert_eq!(log.detail(), "disk full");
    }

    #[test]
    fn long_fields_are_truncated() {
        let p = Problem::new("t", "x".repeat(MAX_FIELD_OUTPUT_LEN * 4), 500);
        let rendered = line(&p);
        assert!(rendered.contains(TRUNCATION_INDICATOR));
        assert!(rendered.len() < MAX_FIELD_OUTPUT_LEN * 3);
    }

    fn field_values<'l>(rendered: &'l str, key: &str) -> Vec<&'l str> {
        rendered
            .split(key)
            .skip(1)
            .filter_map(|rest| rest.split('\'').next())
            .collect()
    }

    #[test]
    fn every_level_of_a_long_chain_is_truncated() {
        let mut p = Problem::new("Bad Gateway", "é".repeat(MAX_FIELD_OUTPUT_LEN), 502);
        for level in 0..3 {
            p = p.with_message(format!("layer {level}"));
        }

        let rendered = line(&p);
        let sources: Vec<_> = (0..3)
            .flat_map(|n| field_values(&rendered, &format!("source[{n}]='")))
            .collect();
        assert_eq!(sources.len(), 3);
        assert!(!rendered.contains("source[3]"));

        let mut values = sources;
        values.extend(field_values(&rendered, " cause='"));
        values.extend(field_values(&rendered, " detail='"));
        assert_eq!(values.len(), 5);
        for value in values {
            assert!(value.len() <= MAX_FIELD_OUTPUT_LEN);
            assert!(value.ends_with(TRUNCATION_INDICATOR));
        }
        assert!(rendered.len() < MAX_FIELD_OUTPUT_LEN * 6);
    }

    #[test]
    fn only_fields_past_the_limit_are_truncated() {
        let p = Problem::new("t", "a".repeat(MAX_FIELD_OUTPUT_LEN), 400);
        assert!(!line(&p).contains(TRUNCATION_INDICATOR));

        let rendered = line(&p.with_message("ctx"));
        assert_eq!(rendered.matches(TRUNCATION_INDICATOR).count(), 1);
        let cause = field_values(&rendered, " cause='");
        assert!(cause[0].starts_with("ctx: a"));
        assert!(cause[0].ends_with(TRUNCATION_INDICATOR));
        assert_eq!(field_values(&rendered, " source[0]='")[0].len(), MAX_FIELD_OUTPUT_LEN);
    }

    #[test]
    fn no_truncate_when_under_limit() {
        let s = "short string";
        let truncated = truncate_with_indicator(s);

        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated, s);
    }

    #[test]
    fn truncate_emoji() {
        let s = "🔥".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(std::str::from_utf8(truncated.as_bytes()).is_ok());
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }
}

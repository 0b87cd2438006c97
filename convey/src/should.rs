//! Comparisons for [`Context::so`](crate::Context::so).
//!
//! Each constructor captures the expected arguments and returns an
//! [`Assertion`]; the engine only looks at the resulting [`Verdict`].
//!
//! ```
//! use convey::should::{self, Assertion, Verdict};
//!
//! assert_eq!(should::equal(2).check(&2), Verdict::Pass);
//! assert!(matches!(should::be_less_than(1).check(&3), Verdict::Fail(_)));
//! ```

use std::fmt::Debug;

use regex::Regex;

/// Outcome of evaluating one assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// The assertion did not hold; the message is shown to the reporter.
    Fail(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    fn from_bool(holds: bool, message: impl FnOnce() -> String) -> Self {
        if holds {
            Verdict::Pass
        } else {
            Verdict::Fail(message())
        }
    }
}

/// A comparison with its expected arguments already bound.
pub trait Assertion<A: ?Sized> {
    fn check(&self, actual: &A) -> Verdict;
}

fn mismatch(expected: impl Debug, actual: impl Debug, what: &str) -> String {
    format!("Expected: {expected:?}\nActual:   {actual:?}\n({what})")
}

pub struct Equal<E>(E);

/// `actual == expected`.
pub fn equal<E>(expected: E) -> Equal<E> {
    Equal(expected)
}

impl<A, E> Assertion<A> for Equal<E>
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    fn check(&self, actual: &A) -> Verdict {
        Verdict::from_bool(*actual == self.0, || {
            mismatch(&self.0, actual, "Should be equal")
        })
    }
}

pub struct NotEqual<E>(E);

/// `actual != expected`.
pub fn not_equal<E>(expected: E) -> NotEqual<E> {
    NotEqual(expected)
}

impl<A, E> Assertion<A> for NotEqual<E>
where
    A: PartialEq<E> + Debug,
    E: Debug,
{
    fn check(&self, actual: &A) -> Verdict {
        Verdict::from_bool(*actual != self.0, || {
            format!("Expected {actual:?}\nto NOT equal {:?}\n(but it did)", self.0)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

pub struct Ordered<E> {
    expected: E,
    bound: Bound,
}

pub fn be_less_than<E>(expected: E) -> Ordered<E> {
    Ordered {
        expected,
        bound: Bound::Less,
    }
}

pub fn be_less_than_or_equal_to<E>(expected: E) -> Ordered<E> {
    Ordered {
        expected,
        bound: Bound::LessOrEqual,
    }
}

pub fn be_greater_than<E>(expected: E) -> Ordered<E> {
    Ordered {
        expected,
        bound: Bound::Greater,
    }
}

pub fn be_greater_than_or_equal_to<E>(expected: E) -> Ordered<E> {
    Ordered {
        expected,
        bound: Bound::GreaterOrEqual,
    }
}

impl<A, E> Assertion<A> for Ordered<E>
where
    A: PartialOrd<E> + Debug,
    E: Debug,
{
    fn check(&self, actual: &A) -> Verdict {
        let (holds, relation) = match self.bound {
            Bound::Less => (*actual < self.expected, "less than"),
            Bound::LessOrEqual => (*actual <= self.expected, "less than or equal to"),
            Bound::Greater => (*actual > self.expected, "greater than"),
            Bound::GreaterOrEqual => (*actual >= self.expected, "greater than or equal to"),
        };
        Verdict::from_bool(holds, || {
            format!(
                "Expected {actual:?} to be {relation} {:?} (but it wasn't)!",
                self.expected
            )
        })
    }
}

pub struct Flag(bool);

pub fn be_true() -> Flag {
    Flag(true)
}

pub fn be_false() -> Flag {
    Flag(false)
}

impl Assertion<bool> for Flag {
    fn check(&self, actual: &bool) -> Verdict {
        Verdict::from_bool(*actual == self.0, || mismatch(self.0, actual, "Should be equal"))
    }
}

pub struct Absent;

pub fn be_none() -> Absent {
    Absent
}

impl<T: Debug> Assertion<Option<T>> for Absent {
    fn check(&self, actual: &Option<T>) -> Verdict {
        Verdict::from_bool(actual.is_none(), || {
            format!("Expected None, got {actual:?}")
        })
    }
}

pub struct Present;

pub fn be_some() -> Present {
    Present
}

impl<T> Assertion<Option<T>> for Present {
    fn check(&self, actual: &Option<T>) -> Verdict {
        Verdict::from_bool(actual.is_some(), || "Expected Some(..), got None".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMatch {
    Substring,
    Prefix,
    Suffix,
}

pub struct Text {
    needle: String,
    mode: TextMatch,
}

pub fn contain_substring(needle: impl Into<String>) -> Text {
    Text {
        needle: needle.into(),
        mode: TextMatch::Substring,
    }
}

pub fn start_with(prefix: impl Into<String>) -> Text {
    Text {
        needle: prefix.into(),
        mode: TextMatch::Prefix,
    }
}

pub fn end_with(suffix: impl Into<String>) -> Text {
    Text {
        needle: suffix.into(),
        mode: TextMatch::Suffix,
    }
}

impl<A: AsRef<str> + ?Sized> Assertion<A> for Text {
    fn check(&self, actual: &A) -> Verdict {
        let haystack = actual.as_ref();
        let needle = self.needle.as_str();
        let (holds, relation) = match self.mode {
            TextMatch::Substring => (haystack.contains(needle), "contain"),
            TextMatch::Prefix => (haystack.starts_with(needle), "start with"),
            TextMatch::Suffix => (haystack.ends_with(needle), "end with"),
        };
        Verdict::from_bool(holds, || {
            format!("Expected {haystack:?} to {relation} {needle:?} (but it didn't)!")
        })
    }
}

pub struct MatchRegex(String);

/// Actual text matches `pattern` (unanchored, `regex` syntax).
pub fn match_regex(pattern: impl Into<String>) -> MatchRegex {
    MatchRegex(pattern.into())
}

impl<A: AsRef<str> + ?Sized> Assertion<A> for MatchRegex {
    fn check(&self, actual: &A) -> Verdict {
        let regex = match Regex::new(&self.0) {
            Ok(regex) => regex,
            Err(err) => return Verdict::Fail(format!("invalid pattern {:?}: {err}", self.0)),
        };
        let text = actual.as_ref();
        Verdict::from_bool(regex.is_match(text), || {
            format!("Expected {text:?} to match {:?} (but it didn't)!", self.0)
        })
    }
}

pub struct Contain<T>(T);

/// The actual collection holds an element equal to `item`.
pub fn contain<T>(item: T) -> Contain<T> {
    Contain(item)
}

impl<A, T> Assertion<A> for Contain<T>
where
    A: AsRef<[T]> + ?Sized,
    T: PartialEq + Debug,
{
    fn check(&self, actual: &A) -> Verdict {
        let items = actual.as_ref();
        Verdict::from_bool(items.contains(&self.0), || {
            format!("Expected {items:?} to contain {:?} (but it didn't)!", self.0)
        })
    }
}

pub struct Satisfy<F> {
    description: String,
    predicate: F,
}

/// Custom predicate; `description` names the expectation in the failure message.
pub fn satisfy<A: ?Sized, F>(description: impl Into<String>, predicate: F) -> Satisfy<F>
where
    F: Fn(&A) -> bool,
{
    Satisfy {
        description: description.into(),
        predicate,
    }
}

impl<A, F> Assertion<A> for Satisfy<F>
where
    A: Debug + ?Sized,
    F: Fn(&A) -> bool,
{
    fn check(&self, actual: &A) -> Verdict {
        Verdict::from_bool((self.predicate)(actual), || {
            format!("Expected {actual:?} to {}", self.description)
        })
    }
}

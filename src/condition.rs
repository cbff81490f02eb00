//! Conditions that decide when polling stops.
//!
//! A [`Condition`] looks at the latest producer result and returns `true` to
//! accept it. Any `Fn(&T) -> bool` closure is a condition, and conditions can
//! be combined with [`ConditionExt`].
//!
//! # Example
//!
//! ```rust
//! use fluentwait::condition::*;
//!
//! let in_range = (|n: &i32| *n > 0).and(|n: &i32| *n < 100);
//! assert!(in_range.check(&50));
//! assert!(!in_range.check(&150));
//! assert!(in_range.not().check(&0));
//! ```

use std::marker::PhantomData;

/// A test applied to each producer result.
///
/// Conditions may be evaluated many times during a run, so they should be
/// free of side effects.
pub trait Condition<T: ?Sized>: Send + Sync {
    /// Returns true if `value` ends the run.
    fn check(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Condition<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// Extension trait for condition combinators.
pub trait ConditionExt<T: ?Sized>: Condition<T> + Sized {
    /// Accept only when both conditions accept.
    fn and<C: Condition<T>>(self, other: C) -> And<Self, C> {
        And(self, other)
    }

    /// Accept when either condition accepts.
    fn or<C: Condition<T>>(self, other: C) -> Or<Self, C> {
        Or(self, other)
    }

    /// Invert the condition.
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, C: Condition<T>> ConditionExt<T> for C {}

/// AND combinator.
#[derive(Clone, Copy, Debug)]
pub struct And<C1, C2>(pub C1, pub C2);

impl<T: ?Sized, C1: Condition<T>, C2: Condition<T>> Condition<T> for And<C1, C2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}

/// OR combinator.
#[derive(Clone, Copy, Debug)]
pub struct Or<C1, C2>(pub C1, pub C2);

impl<T: ?Sized, C1: Condition<T>, C2: Condition<T>> Condition<T> for Or<C1, C2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) || self.1.check(value)
    }
}

/// NOT combinator.
#[derive(Clone, Copy, Debug)]
pub struct Not<C>(pub C);

impl<T: ?Sized, C: Condition<T>> Condition<T> for Not<C> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        !self.0.check(value)
    }
}

/// Condition with a fixed answer.
#[derive(Clone, Copy, Debug)]
pub struct Constant<T: ?Sized> {
    answer: bool,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Condition<T> for Constant<T> {
    #[inline]
    fn check(&self, _value: &T) -> bool {
        self.answer
    }
}

/// Accept the first result, whatever it is.
///
/// The run still waits one delay and calls the producer once.
pub fn always<T: ?Sized>() -> Constant<T> {
    Constant {
        answer: true,
        _marker: PhantomData,
    }
}

/// Never accept: the run always times out.
pub fn never<T: ?Sized>() -> Constant<T> {
    Constant {
        answer: false,
        _marker: PhantomData,
    }
}

/// Accept `Some` results.
///
/// Producers that may not have anything yet usually return `Option<T>`; this
/// waits until they do.
///
/// ```rust
/// use fluentwait::condition::{is_some, Condition};
///
/// assert!(is_some().check(&Some(1)));
/// assert!(!is_some::<i32>().check(&None));
/// ```
pub fn is_some<T>() -> IsSome<T> {
    IsSome(PhantomData)
}

/// Condition accepting `Some` results, created by [`is_some`].
#[derive(Clone, Copy, Debug)]
pub struct IsSome<T>(PhantomData<fn(&T)>);

impl<T> Condition<Option<T>> for IsSome<T> {
    #[inline]
    fn check(&self, value: &Option<T>) -> bool {
        value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_condition() {
        let c = |s: &String| s.is_empty();
        assert!(c.check(&String::new()));
        assert!(!c.check(&"x".to_string()));
    }

    #[test]
    fn falsy_values_are_ordinary_results() {
        assert!((|n: &i32| *n == 0).check(&0));
        assert!((|s: &&str| s.is_empty()).check(&""));
        assert!((|b: &bool| !*b).check(&false));
    }

    #[test]
    fn and_or_not() {
        let positive = |n: &i32| *n > 0;
        let even = |n: &i32| n % 2 == 0;

        assert!(positive.and(even).check(&4));
        assert!(!positive.and(even).check(&3));
        assert!(positive.or(even).check(&-2));
        assert!(!positive.or(even).check(&-3));
        assert!(positive.not().check(&-1));
    }

    #[test]
    fn constants() {
        assert!(always::<str>().check("anything"));
        assert!(!never::<i32>().check(&1));
        assert!(never::<i32>().not().check(&1));
    }

    #[test]
    fn is_some_condition() {
        assert!(is_some().check(&Some("data")));
        assert!(!is_some::<&str>().check(&None));
    }
}

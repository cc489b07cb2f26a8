use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::{LocalObjectReference, Probe, ResourceRequirements},
    apimachinery::pkg::util::intstr::IntOrString,
};

pub use agent_operator_derive::Merge;

/// A type that can be merged with a set of defaults, while keeping track of what the defaults
/// actually contributed.
///
/// This is the backbone of the defaulting pass: a user-supplied desired state is merged with the
/// built-in defaults, and the values that had to be filled in are returned as an *override
/// shadow*. The shadow has the same type as the merged value, but only the fields that were
/// previously unset are populated.
///
/// Most users will want to implement this for custom types using [the associated derive
/// macro](`derive@Merge`).
///
/// # Example
///
/// ```
/// # use agent_operator::config::merge::Merge;
/// #[derive(Merge, Debug, Default, PartialEq, Eq)]
/// struct Foo {
///     bar: Option<i32>,
///     baz: Option<i32>,
/// }
///
/// let mut config = Foo {
///     bar: Some(0),
///     baz: None,
/// };
/// let overrides = config.merge_tracked(&Foo {
///     bar: Some(1),
///     baz: Some(2),
/// });
/// assert_eq!(config, Foo {
///     bar: Some(0), // Kept, since it was already set
///     baz: Some(2), // Fallback is used
/// });
/// assert_eq!(overrides, Foo {
///     bar: None,
///     baz: Some(2),
/// });
/// ```
///
/// # Options
///
/// A field should be [`Option`]al if it is [`Atomic`] (for example: [`i32`]) or an enum (since the
/// discriminant matters in this case). Composite objects (such as regular structs) should
/// generally *not* be optional: a nested struct with every field unset is treated as absent.
pub trait Merge: Sized {
    /// Merges with `defaults`, preferring values from `self` if they are set there.
    ///
    /// Returns the override shadow: a value of the same shape containing exactly the fields that
    /// were taken from `defaults`.
    fn merge_tracked(&mut self, defaults: &Self) -> Self;

    /// Returns `true` if no value is set anywhere in `self`.
    fn is_unset(&self) -> bool;

    /// Merges with `defaults`, discarding the override shadow.
    fn merge(&mut self, defaults: &Self) {
        self.merge_tracked(defaults);
    }
}

/// Moving version of [`Merge::merge_tracked`], to produce slightly nicer test output.
///
/// Returns the merged value and the override shadow.
pub fn merge<T: Merge>(mut overrides: T, defaults: &T) -> (T, T) {
    let shadow = overrides.merge_tracked(defaults);
    (overrides, shadow)
}

/// A marker trait for types that are merged atomically (as one single value) rather than
/// trying to merge each field individually.
pub trait Atomic: Clone {}
impl Atomic for i32 {}
impl Atomic for bool {}
impl Atomic for String {}
impl<T: Clone> Atomic for Vec<T> {}
impl<K: Clone, V: Clone> Atomic for BTreeMap<K, V> {}
impl Atomic for IntOrString {}
impl Atomic for LocalObjectReference {}
impl Atomic for Probe {}
impl Atomic for ResourceRequirements {}

impl<T: Atomic> Merge for Option<T> {
    fn merge_tracked(&mut self, defaults: &Self) -> Self {
        if self.is_none() && defaults.is_some() {
            self.clone_from(defaults);
            defaults.clone()
        } else {
            None
        }
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

//! The override-tracking configuration system.
//!
//! # What problem does this solve?
//!
//! Users describe an agent deployment with a *partial* desired state: every field is optional,
//! and leaving a field out means "let the operator choose". Before anything can be deployed, the
//! operator has to fill in every missing value. At the same time we want to tell the user what we
//! chose for them, so the values that were filled in are published back in the status of the
//! custom resource (the *override shadow*).
//!
//! Doing this by hand is tedious and error-prone: every defaulted field needs an `if unset { set
//! it; record it }` dance, and forgetting the second half silently breaks the status.
//!
//! # How does it work?
//!
//! The desired state is modelled as a tree where
//!
//! - leaves are [`Option`]s of [`Atomic`] values (strings, numbers, Kubernetes probes, ...), and
//! - inner nodes are plain structs deriving [`Merge`].
//!
//! A tree of defaults with the *same type* is then merged into the user's tree with
//! [`Merge::merge_tracked`]. Every leaf that is [`None`] in the user tree takes the default, and
//! the same value is written into the returned shadow tree. Leaves that were already set are left
//! alone and stay [`None`] in the shadow.
//!
//! For example:
//!
//! ```
//! # use agent_operator::config::merge::Merge;
//! #[derive(Merge, Default, Debug, PartialEq)]
//! struct Image {
//!     name: Option<String>,
//!     tag: Option<String>,
//! }
//!
//! let mut image = Image {
//!     name: Some("my-registry/agent".to_string()),
//!     tag: None,
//! };
//! let shadow = image.merge_tracked(&Image {
//!     name: Some("agent".to_string()),
//!     tag: Some("7.28.0".to_string()),
//! });
//!
//! assert_eq!(image.name.as_deref(), Some("my-registry/agent"));
//! assert_eq!(image.tag.as_deref(), Some("7.28.0"));
//! assert_eq!(shadow, Image {
//!     name: None,
//!     tag: Some("7.28.0".to_string()),
//! });
//! ```
//!
//! Nested structs are not wrapped in [`Option`]. A nested struct where every field is unset
//! ([`Merge::is_unset`]) is indistinguishable from one that was never specified, which is exactly
//! the semantics the defaulting rules need.
//!
//! # What about rules that depend on other fields?
//!
//! Not every default is a constant. Some subtrees are only defaulted if they are enabled, some
//! defaults depend on the image version. Those rules live in [`crate::defaults`], which builds the
//! defaults tree for each subtree and then hands the mechanical part to [`Merge::merge_tracked`].
//!
//! [`Merge`]: merge::Merge
//! [`Merge::merge_tracked`]: merge::Merge::merge_tracked
//! [`Merge::is_unset`]: merge::Merge::is_unset
//! [`Atomic`]: merge::Atomic

pub mod merge;

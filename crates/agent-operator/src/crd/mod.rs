//! Custom resources describing the desired state of an agent deployment.
//!
//! Two API versions are served:
//!
//! - [`v1alpha1`] is organised by *component* (node agent, cluster agent, cluster checks runner).
//!   It is the shape the [defaulting pass](crate::defaults) operates on.
//! - [`v2alpha1`] is organised by *feature*, with global settings such as the container process
//!   model living next to them.
//!
//! Every field is optional. Nested structs are never wrapped in [`Option`], an all-empty struct
//! means "not specified" (see [`crate::config`]).

pub mod common;
pub mod v1alpha1;
pub mod v2alpha1;

/// The API group of all custom resources in this crate.
pub const GROUP: &str = "agents.monitoring.io";

/// Configuration subtrees that are switched on and off as a whole.
///
/// When a subtree is disabled, none of its other fields are defaulted.
pub trait Toggle {
    fn enabled(&self) -> Option<bool>;

    fn enabled_mut(&mut self) -> &mut Option<bool>;

    /// Returns `true` only if the subtree is explicitly enabled.
    fn is_enabled(&self) -> bool {
        self.enabled().unwrap_or(false)
    }

    /// Whether the subtree is switched on, using `default` if the switch is unset.
    fn is_enabled_or(&self, default: bool) -> bool {
        self.enabled().unwrap_or(default)
    }
}

/// Implements [`Toggle`] for structs with an `enabled: Option<bool>` field.
macro_rules! impl_toggle {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::crd::Toggle for $ty {
                fn enabled(&self) -> Option<bool> {
                    self.enabled
                }

                fn enabled_mut(&mut self) -> &mut Option<bool> {
                    &mut self.enabled
                }
            }
        )+
    };
}
pub(crate) use impl_toggle;

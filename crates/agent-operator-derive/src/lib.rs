use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod merge;

/// Derives `Merge` for structs with named fields that all implement `Merge`.
///
/// The override shadow is assembled from the shadows of the fields. Enums have to be wrapped in
/// an `Option` and marked `Atomic` instead.
///
/// `#[merge(path_overrides(merge = "crate::config::merge"))]` overrides the path of the `merge`
/// module, which is needed when deriving inside `agent-operator` itself.
#[proc_macro_derive(Merge, attributes(merge))]
pub fn derive_merge(input: TokenStream) -> TokenStream {
    merge::derive(parse_macro_input!(input as DeriveInput)).into()
}

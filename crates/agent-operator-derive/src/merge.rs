use darling::{FromDeriveInput, FromField, FromMeta, ast::Data, util::Ignored};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{DeriveInput, Generics, Path, parse_quote};

#[derive(FromMeta)]
struct PathOverrides {
    #[darling(default = "PathOverrides::default_merge")]
    merge: Path,
}

impl Default for PathOverrides {
    fn default() -> Self {
        Self {
            merge: Self::default_merge(),
        }
    }
}

impl PathOverrides {
    fn default_merge() -> Path {
        parse_quote!(::agent_operator::config::merge)
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(merge), supports(struct_named))]
struct MergeInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, MergeField>,
    #[darling(default)]
    path_overrides: PathOverrides,
}

#[derive(FromField)]
struct MergeField {
    ident: Option<Ident>,
}

/// Every field is merged on its own, the struct is unset if all of its fields are.
pub fn derive(input: DeriveInput) -> TokenStream {
    let MergeInput {
        ident,
        generics,
        data,
        path_overrides: PathOverrides { merge: merge_mod },
    } = match MergeInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    // Enums and tuple structs were rejected by `supports` above.
    let fields = data
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|field| field.ident)
        .collect::<Vec<_>>();

    let defaults_fields = fields
        .iter()
        .map(|field| format_ident!("defaults_{field}"))
        .collect::<Vec<_>>();

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics #merge_mod::Merge for #ident #ty_generics #where_clause {
            fn merge_tracked(&mut self, defaults: &Self) -> Self {
                let Self { #(#fields: #defaults_fields,)* } = defaults;
                Self {
                    #(#fields: #merge_mod::Merge::merge_tracked(&mut self.#fields, #defaults_fields),)*
                }
            }

            fn is_unset(&self) -> bool {
                true #(&& #merge_mod::Merge::is_unset(&self.#fields))*
            }
        }
    }
}

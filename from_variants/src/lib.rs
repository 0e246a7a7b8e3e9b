use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

/// Generate `From<T> for Enum` for every variant `T(T)`.
///
/// The field type is compared by its last path segment, so `Variant(crate::nodes::Variant)`
/// qualifies as well as `Variant(Variant)`. Variants that do not follow the pattern are skipped.
#[proc_macro_derive(FromVariants)]
pub fn derive_from_variants(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "FromVariants can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let implementations = data_enum.variants.iter().filter_map(|variant| {
        let Fields::Unnamed(fields) = &variant.fields else {
            return None;
        };
        if fields.unnamed.len() != 1 {
            return None;
        }
        let field_type = &fields.unnamed[0].ty;
        let Type::Path(path) = field_type else {
            return None;
        };
        let last_segment = path.path.segments.last()?;
        if last_segment.ident != variant.ident || !last_segment.arguments.is_empty() {
            return None;
        }
        let variant_name = &variant.ident;
        Some(quote! {
            impl #impl_generics From<#field_type> for #name #type_generics #where_clause {
                fn from(value: #field_type) -> Self {
                    #name::#variant_name(value)
                }
            }
        })
    });

    quote! {
        #(#implementations)*
    }
    .into()
}

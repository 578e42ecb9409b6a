use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, ItemStruct, parse_macro_input};

/// Implementation of `#[register_extension(kind)]` attribute macro.
///
/// Leaves the decorated struct unchanged and appends a
/// `#[::tessera_framework::linkme::distributed_slice]` static holding an
/// `ExtensionDescriptor` that builds the struct through `Default`.
pub fn register_extension(attr: TokenStream, item: TokenStream) -> TokenStream {
    let kind = parse_macro_input!(attr as Ident);
    let item = parse_macro_input!(item as ItemStruct);

    if !item.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &item.generics,
            "generic extensions cannot be registered",
        )
        .into_compile_error()
        .into();
    }

    let ty = &item.ident;
    let static_name = Ident::new(
        &format!("_EXTENSION_REGISTER_{}", ty.to_string().to_uppercase()),
        Span::call_site(),
    );

    let slice = match kind.to_string().as_str() {
        "builtin" => quote!(::tessera_framework::BUILTIN_EXTENSIONS),
        "custom" => quote!(::tessera_framework::CUSTOM_EXTENSIONS),
        other => {
            return syn::Error::new(
                kind.span(),
                format!("unknown extension kind `{other}`, expected one of: builtin, custom"),
            )
            .into_compile_error()
            .into();
        }
    };

    quote! {
        #item

        #[::tessera_framework::linkme::distributed_slice(#slice)]
        #[linkme(crate = ::tessera_framework::linkme)]
        static #static_name: ::tessera_framework::ExtensionDescriptor =
            ::tessera_framework::ExtensionDescriptor {
                module_path: ::core::module_path!(),
                create: || -> ::std::boxed::Box<dyn ::tessera_framework::Extension> {
                    ::std::boxed::Box::new(<#ty as ::core::default::Default>::default())
                },
            };
    }
    .into()
}

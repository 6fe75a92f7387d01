// workroom/workroom-proc-macros
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use proc_macro::TokenStream;

use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident};

/// Implements `From<&AppDependencies>` for a struct.
///
/// Fields marked with `#[inject]` are cloned from the field with the same name in
/// `AppDependencies`. `#[inject(from = other_name)]` clones `AppDependencies::other_name` instead.
/// All remaining fields are initialized with `Default::default()`.
#[proc_macro_derive(InjectDependencies, attributes(inject))]
pub fn inject_deps(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let mut field_initialization = Vec::with_capacity(fields.named.len());

    for field in fields.named.iter() {
        let Some(ref ident) = field.ident else {
            continue;
        };

        let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("inject")) else {
            field_initialization.push(quote! { #ident: Default::default() });
            continue;
        };

        match source_field(attr) {
            Ok(Some(source)) => field_initialization.push(quote! { #ident: deps.#source.clone() }),
            Ok(None) => field_initialization.push(quote! { #ident: deps.#ident.clone() }),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    let name = &input.ident;
    let expanded = quote! {
        impl From<&crate::app::deps::AppDependencies> for #name {
            fn from(deps: &crate::app::deps::AppDependencies) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Generates a `<Name>Dependencies` struct with the same fields as the annotated struct and a
/// `From` conversion into it.
#[proc_macro_derive(DependenciesStruct)]
pub fn dependencies_struct(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(struct_data) = &input.data else {
        panic!("This macro only supports structs.")
    };

    let Fields::Named(fields) = &struct_data.fields else {
        panic!("This macro only supports structs with named fields.")
    };

    let name = &input.ident;
    let vis = &input.vis;
    let dependencies_struct_name = format_ident!("{}Dependencies", name);

    let struct_fields = fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let field_type = &field.ty;
            Some(quote! { pub #ident: #field_type })
        })
        .collect::<Vec<_>>();

    let field_initialization = fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            Some(quote! { #ident: deps.#ident })
        })
        .collect::<Vec<_>>();

    let expanded = quote! {
        #vis struct #dependencies_struct_name {
            #(#struct_fields,)*
        }

        impl From<#dependencies_struct_name> for #name {
            fn from(deps: #dependencies_struct_name) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Parses the optional `from = name` argument of an `#[inject]` attribute.
fn source_field(attr: &Attribute) -> syn::Result<Option<Ident>> {
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(None);
    }

    let mut source = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("from") {
            source = Some(meta.value()?.parse::<Ident>()?);
            return Ok(());
        }
        Err(meta.error("unsupported inject argument, expected `from = field_name`"))
    })?;

    Ok(source)
}

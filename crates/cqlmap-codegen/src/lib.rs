// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitInt, LitStr, Path, Token};

/// `#[cql(...)]` attributes on the struct itself.
#[derive(Default)]
struct ContainerAttrs {
    table: Option<Option<String>>,
    udt: Option<Option<String>>,
    accessor: bool,
    keyspace: Option<String>,
    case_sensitive_keyspace: bool,
    case_sensitive_name: bool,
    implements: Vec<Path>,
}

/// `#[cql(...)]` attributes on one field.
#[derive(Default)]
struct FieldAttrs {
    column: Option<Option<String>>,
    field: Option<Option<String>>,
    case_sensitive: bool,
    codec: Option<Path>,
    partition_key: Option<i32>,
    clustering_column: Option<i32>,
    computed: Option<String>,
    transient: bool,
    frozen: bool,
    frozen_key: bool,
    frozen_value: bool,
    extends: bool,
}

/// `#[derive(Mapped)]` macro: generates a cached `ClassDecl` for the struct
///
/// Container attributes:
/// - `table [= "name"]`, `udt [= "name"]`, `accessor`
/// - `keyspace = "ks"`, `case_sensitive_keyspace`, `case_sensitive_name`
/// - `implements(Iface, ..)`: interface declarations (types implementing `Mapped`)
///
/// Field attributes:
/// - `column [= "name"]`, `field [= "name"]`, `case_sensitive`, `codec = path`
/// - `partition_key [= n]`, `clustering_column [= n]`, `computed = "expr"`
/// - `transient`, `frozen`, `frozen_key`, `frozen_value`
/// - `extends`: the field holds the superclass value
///
/// Every non-transient field must implement `cqlmap::types::HostRepr + Clone`.
///
/// Example:
/// ```ignore
/// use cqlmap::Mapped;
///
/// #[derive(Default, Mapped)]
/// #[cql(table = "sensors", keyspace = "telemetry")]
/// struct Sensor {
///     #[cql(partition_key)]
///     id: i32,
///     #[cql(clustering_column)]
///     ts: i64,
///     #[cql(column = "Reading", case_sensitive)]
///     reading: f64,
/// }
/// ```
#[proc_macro_derive(Mapped, attributes(cql))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let class_name = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Generic types are not supported",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => return Err(syn::Error::new_spanned(input, "Only named fields are supported")),
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let container = parse_container(&input.attrs)?;
    // Bare `codec` / `case_sensitive` go on @Field for UDT-only classes.
    let udt_context = container.udt.is_some() && container.table.is_none();

    let mut calls = container_calls(&container);
    let mut has_superclass = false;

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let ty = &field.ty;
        let attrs = parse_field(&field.attrs)?;

        if attrs.extends {
            if has_superclass {
                return Err(syn::Error::new_spanned(
                    field,
                    "Only one field can hold the superclass",
                ));
            }
            has_superclass = true;
            calls.push(quote! {
                .extends_embedded(
                    <#ty as ::cqlmap::mapping::Mapped>::class_decl(),
                    ::std::sync::Arc::new(::cqlmap::mapping::Embedded::<#name, #ty>::new(
                        |s: &#name| &s.#ident,
                        |s: &mut #name| &mut s.#ident,
                    )),
                )
            });
            continue;
        }

        let property = ident.to_string();
        let property = property.trim_start_matches("r#");
        let member = if attrs.transient {
            quote! {
                ::cqlmap::mapping::MemberDecl::declared(
                    #property,
                    ::cqlmap::mapping::MemberOrigin::Field,
                    ::cqlmap::types::HostType::Any,
                )
            }
        } else {
            quote! {
                ::cqlmap::mapping::MemberDecl::field::<#name, #ty>(
                    #property,
                    |s: &#name| &s.#ident,
                    |s: &mut #name| &mut s.#ident,
                )
            }
        };
        let markers = field_markers(&attrs, udt_context);
        calls.push(quote! {
            .member(#member #(.with_marker(#markers))*)
        });
    }

    Ok(quote! {
        impl ::cqlmap::mapping::Mapped for #name {
            fn class_decl() -> ::std::sync::Arc<::cqlmap::mapping::ClassDecl> {
                static DECL: ::std::sync::OnceLock<::std::sync::Arc<::cqlmap::mapping::ClassDecl>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(DECL.get_or_init(|| {
                    ::cqlmap::mapping::ClassDecl::builder_for::<#name>(
                        #class_name,
                        ::cqlmap::mapping::ClassShape::Class,
                    )
                    #(#calls)*
                    .build()
                }))
            }
        }
    })
}

fn optional_str(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        Ok(Some(meta.value()?.parse::<LitStr>()?.value()))
    } else {
        Ok(None)
    }
}

fn required_str(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    Ok(meta.value()?.parse::<LitStr>()?.value())
}

fn position(meta: &ParseNestedMeta<'_>) -> syn::Result<i32> {
    if !meta.input.peek(Token![=]) {
        return Ok(0);
    }
    let input = meta.value()?;
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let n: i32 = input.parse::<LitInt>()?.base10_parse()?;
    Ok(if negative { -n } else { n })
}

fn parse_container(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("cql")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                out.table = Some(optional_str(&meta)?);
            } else if meta.path.is_ident("udt") {
                out.udt = Some(optional_str(&meta)?);
            } else if meta.path.is_ident("accessor") {
                out.accessor = true;
            } else if meta.path.is_ident("keyspace") {
                out.keyspace = Some(required_str(&meta)?);
            } else if meta.path.is_ident("case_sensitive_keyspace") {
                out.case_sensitive_keyspace = true;
            } else if meta.path.is_ident("case_sensitive_name") {
                out.case_sensitive_name = true;
            } else if meta.path.is_ident("implements") {
                meta.parse_nested_meta(|iface| {
                    out.implements.push(iface.path);
                    Ok(())
                })?;
            } else {
                return Err(meta.error("unknown cql container attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

// @audit-ok: Simple pattern matching (cyclo 16, cogni 2) - one branch per attribute keyword
fn parse_field(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("cql")) {
        attr.parse_nested_meta(|meta| {
            let path = &meta.path;
            if path.is_ident("column") {
                out.column = Some(optional_str(&meta)?);
            } else if path.is_ident("field") {
                out.field = Some(optional_str(&meta)?);
            } else if path.is_ident("case_sensitive") {
                out.case_sensitive = true;
            } else if path.is_ident("codec") {
                out.codec = Some(meta.value()?.parse::<Path>()?);
            } else if path.is_ident("partition_key") {
                out.partition_key = Some(position(&meta)?);
            } else if path.is_ident("clustering_column") {
                out.clustering_column = Some(position(&meta)?);
            } else if path.is_ident("computed") {
                out.computed = Some(required_str(&meta)?);
            } else if path.is_ident("transient") {
                out.transient = true;
            } else if path.is_ident("frozen") {
                out.frozen = true;
            } else if path.is_ident("frozen_key") {
                out.frozen_key = true;
            } else if path.is_ident("frozen_value") {
                out.frozen_value = true;
            } else if path.is_ident("extends") {
                out.extends = true;
            } else {
                return Err(meta.error("unknown cql field attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn opt_arc(value: Option<&String>) -> TokenStream2 {
    match value {
        Some(v) => quote! { ::std::option::Option::Some(::std::sync::Arc::from(#v)) },
        None => quote! { ::std::option::Option::None },
    }
}

fn container_calls(attrs: &ContainerAttrs) -> Vec<TokenStream2> {
    let keyspace = opt_arc(attrs.keyspace.as_ref());
    let cs_keyspace = attrs.case_sensitive_keyspace;
    let cs_name = attrs.case_sensitive_name;
    let entity_name = |name: &Option<String>| {
        let name = opt_arc(name.as_ref());
        quote! {
            ::cqlmap::mapping::EntityName {
                keyspace: #keyspace,
                name: #name,
                case_sensitive_keyspace: #cs_keyspace,
                case_sensitive_name: #cs_name,
            }
        }
    };

    let mut calls = Vec::new();
    if let Some(name) = &attrs.table {
        let entity = entity_name(name);
        calls.push(quote! { .table(#entity) });
    }
    if let Some(name) = &attrs.udt {
        let entity = entity_name(name);
        calls.push(quote! { .udt(#entity) });
    }
    if attrs.accessor {
        calls.push(quote! { .accessor() });
    }
    for iface in &attrs.implements {
        calls.push(quote! {
            .implements(<#iface as ::cqlmap::mapping::Mapped>::class_decl())
        });
    }
    calls
}

fn column_name(name: Option<&String>, case_sensitive: bool, codec: Option<&Path>) -> TokenStream2 {
    let name = opt_arc(name);
    let codec = match codec {
        Some(path) => quote! {
            ::std::option::Option::Some(#path as ::cqlmap::codec::CodecFactory)
        },
        None => quote! { ::std::option::Option::None },
    };
    quote! {
        ::cqlmap::mapping::ColumnName {
            name: #name,
            case_sensitive: #case_sensitive,
            codec: #codec,
        }
    }
}

fn field_markers(attrs: &FieldAttrs, udt_context: bool) -> Vec<TokenStream2> {
    let mut markers = Vec::new();
    let names_column = attrs.case_sensitive || attrs.codec.is_some();

    let column = attrs
        .column
        .clone()
        .or_else(|| (names_column && attrs.field.is_none() && !udt_context).then_some(None));
    let field = attrs
        .field
        .clone()
        .or_else(|| (names_column && attrs.column.is_none() && udt_context).then_some(None));

    if let Some(name) = &column {
        let name = column_name(name.as_ref(), attrs.case_sensitive, attrs.codec.as_ref());
        markers.push(quote! { ::cqlmap::mapping::PropertyMarker::Column(#name) });
    }
    if let Some(name) = &field {
        let codec = if column.is_some() { None } else { attrs.codec.as_ref() };
        let name = column_name(name.as_ref(), attrs.case_sensitive, codec);
        markers.push(quote! { ::cqlmap::mapping::PropertyMarker::Field(#name) });
    }
    if let Some(n) = attrs.partition_key {
        markers.push(quote! { ::cqlmap::mapping::PropertyMarker::PartitionKey(#n) });
    }
    if let Some(n) = attrs.clustering_column {
        markers.push(quote! { ::cqlmap::mapping::PropertyMarker::ClusteringColumn(#n) });
    }
    if let Some(expr) = &attrs.computed {
        markers.push(quote! {
            ::cqlmap::mapping::PropertyMarker::Computed(::std::sync::Arc::from(#expr))
        });
    }
    for (set, marker) in [
        (attrs.transient, quote! { Transient }),
        (attrs.frozen, quote! { Frozen }),
        (attrs.frozen_key, quote! { FrozenKey }),
        (attrs.frozen_value, quote! { FrozenValue }),
    ] {
        if set {
            markers.push(quote! { ::cqlmap::mapping::PropertyMarker::#marker });
        }
    }
    markers
}

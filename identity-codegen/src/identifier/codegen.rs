use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{parse_quote, Field, Fields, Path};

use crate::identifier::lower::{BackingKind, Capability, IdentifiableIr, Ir, Plan};

pub type Rust = TokenStream;

pub fn codegen(ir: Ir) -> Rust {
    let Ir {
        attrs,
        vis,
        name,
        backing,
        backing_kind,
        capabilities,
        runtime,
    } = ir;

    let mut derives: Vec<Ident> = vec![format_ident!("Debug"), format_ident!("Clone")];
    derives.extend(
        capabilities
            .iter()
            .filter(|c| c.plan == Plan::Derive)
            .map(|c| c.ident.clone()),
    );
    let equality = if backing_kind == BackingKind::Float {
        bitwise_equality(&name)
    } else {
        derives.extend([
            format_ident!("PartialEq"),
            format_ident!("Eq"),
            format_ident!("Hash"),
        ]);
        quote!()
    };
    let ordering = ordering(&name, backing_kind, &capabilities);
    let serde = serde(&name, backing_kind, &runtime);
    let markers = capabilities
        .iter()
        .filter(|c| c.plan == Plan::Marker)
        .map(|c| {
            let capability = &c.ident;
            quote!(impl #capability for #name {})
        });

    quote! {
        #(#attrs)*
        #[derive(#(#derives),*)]
        #vis struct #name {
            #vis raw_value: #backing,
        }

        impl #name {
            #[must_use]
            #vis fn new(raw_value: #backing) -> Self {
                Self { raw_value }
            }
        }

        impl #runtime::Identifier for #name {
            type RawValue = #backing;

            fn from_raw_value(raw_value: #backing) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(Self::new(raw_value))
            }

            fn raw_value(&self) -> &#backing {
                &self.raw_value
            }

            fn into_raw_value(self) -> #backing {
                self.raw_value
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.raw_value, f)
            }
        }

        impl ::core::convert::From<#name> for #backing {
            fn from(id: #name) -> Self {
                id.raw_value
            }
        }

        #equality
        #ordering
        #serde
        #(#markers)*
    }
}

pub fn codegen_identifiable(ir: IdentifiableIr) -> Rust {
    let IdentifiableIr { mut host, id } = ir;
    let id_name = id.name.clone();
    let runtime = id.runtime.clone();
    let vis = host.vis.clone();

    let field: Field = parse_quote!(#vis id: #id_name);
    if let Fields::Named(fields) = &mut host.fields {
        fields.named.insert(0, field);
    } else if matches!(host.fields, Fields::Unit) {
        host.fields = Fields::Named(parse_quote!({ #field }));
        host.semi_token = None;
    }

    let id = codegen(id);
    let host_name = &host.ident;
    let (impl_generics, ty_generics, where_clause) = host.generics.split_for_impl();
    quote! {
        #id

        #host

        impl #impl_generics #runtime::Identifiable for #host_name #ty_generics #where_clause {
            type Id = #id_name;

            fn id(&self) -> Self::Id {
                ::core::clone::Clone::clone(&self.id)
            }
        }
    }
}

/// Floats have no `Eq`/`Hash`; identity is the bit pattern.
fn bitwise_equality(name: &Ident) -> TokenStream {
    quote! {
        impl ::core::cmp::PartialEq for #name {
            fn eq(&self, other: &Self) -> bool {
                self.raw_value.to_bits() == other.raw_value.to_bits()
            }
        }

        impl ::core::cmp::Eq for #name {}

        impl ::core::hash::Hash for #name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash(&self.raw_value.to_bits(), state)
            }
        }
    }
}

fn ordering(
    name: &Ident,
    backing_kind: BackingKind,
    capabilities: &[Capability],
) -> TokenStream {
    let float = backing_kind == BackingKind::Float;
    if capabilities.iter().any(|c| c.plan == Plan::TotalOrder) {
        let cmp = if float {
            quote!(self.raw_value.total_cmp(&other.raw_value))
        } else {
            quote!(::core::cmp::Ord::cmp(&self.raw_value, &other.raw_value))
        };
        quote! {
            impl ::core::cmp::PartialOrd for #name {
                fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                    ::core::option::Option::Some(::core::cmp::Ord::cmp(self, other))
                }
            }

            impl ::core::cmp::Ord for #name {
                fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                    #cmp
                }
            }
        }
    } else if capabilities.iter().any(|c| c.plan == Plan::PartialOrder) {
        let partial_cmp = if float {
            quote!(::core::option::Option::Some(self.raw_value.total_cmp(&other.raw_value)))
        } else {
            quote!(::core::cmp::PartialOrd::partial_cmp(&self.raw_value, &other.raw_value))
        };
        quote! {
            impl ::core::cmp::PartialOrd for #name {
                fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                    #partial_cmp
                }
            }
        }
    } else {
        quote!()
    }
}

fn serde(name: &Ident, backing_kind: BackingKind, runtime: &Path) -> TokenStream {
    let (serialize, deserialize) = match backing_kind {
        BackingKind::Uuid => (quote!(serialize_uuid), quote!(deserialize_uuid)),
        _ => (quote!(serialize_raw_value), quote!(deserialize)),
    };
    quote! {
        impl #runtime::__private::serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: #runtime::__private::serde::Serializer,
            {
                #runtime::codec::#serialize(&self.raw_value, serializer)
            }
        }

        impl<'de> #runtime::__private::serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: #runtime::__private::serde::Deserializer<'de>,
            {
                #runtime::codec::#deserialize::<Self, D>(deserializer)
            }
        }
    }
}

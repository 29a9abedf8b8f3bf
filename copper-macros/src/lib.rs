//! # Copper Macros
//!
//! Derive macros for the wire codec traits and packet id plumbing.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Ident, Meta,
    parse::{Parse, ParseStream},
    parse_macro_input,
    token::Paren,
};

const PRIMITIVE_TYPES: [&str; 8] = ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64"];

const WRONG_ATTR_FORMAT: &str = "attribute requires a list format: `#[read(as = ...)]`";

/// A parsed field strategy from `#[read(as = ...)]` / `#[write(as = ...)]`.
///
/// Supports `VarInt`, `VarLong`, `Prefixed` and `Prefixed(P)`.
#[derive(Debug, Clone)]
struct Strategy {
    name: Ident,
    prefix_type: Option<syn::Type>,
}

impl Strategy {
    fn name_str(&self) -> String {
        self.name.to_string()
    }

    /// The prefix type with known codec names expanded to full paths.
    fn prefix_type_tokens(&self) -> proc_macro2::TokenStream {
        self.prefix_type
            .as_ref()
            .map_or_else(|| quote! { copper_utils::codec::VarInt }, expand_known_type)
    }
}

fn expand_known_type(ty: &syn::Type) -> proc_macro2::TokenStream {
    if let syn::Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && type_path.path.segments.len() == 1
    {
        let segment = &type_path.path.segments[0];
        if segment.arguments.is_empty() {
            match segment.ident.to_string().as_str() {
                "VarInt" => return quote! { copper_utils::codec::VarInt },
                "VarLong" => return quote! { copper_utils::codec::VarLong },
                _ => {}
            }
        }
    }
    quote! { #ty }
}

impl Parse for Strategy {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        let mut prefix_type = None;

        if input.peek(Paren) {
            let content;
            syn::parenthesized!(content in input);
            if !content.is_empty() {
                prefix_type = Some(content.parse()?);
            }
        }

        Ok(Strategy { name, prefix_type })
    }
}

fn parse_strategy_attr(attrs: &[syn::Attribute], attr_name: &str) -> Option<Strategy> {
    let attr = attrs.iter().find(|a| a.path().is_ident(attr_name))?;
    let Meta::List(meta) = attr.meta.clone() else {
        panic!("{WRONG_ATTR_FORMAT}");
    };

    let mut strategy = None;
    meta.parse_nested_meta(|meta| {
        if meta.path.is_ident("as") {
            let value = meta.value()?;
            strategy = Some(value.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported property, expected `as = ...`"))
        }
    })
    .unwrap_or_else(|e| panic!("Failed to parse `{attr_name}` attribute: {e}"));

    strategy
}

/// Derives the `ReadFrom` trait.
///
/// # Panics
/// - On unions, tuple structs, enum variants with fields or without
///   explicit discriminants, and unknown strategies.
#[proc_macro_derive(ReadFrom, attributes(read))]
pub fn read_from_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    match input.data {
        Data::Struct(s) => read_from_struct(s, name),
        Data::Enum(e) => read_from_enum(e, name, &input.attrs),
        Data::Union(_) => panic!("ReadFrom can only be derived for structs or enums"),
    }
}

fn generate_read_code(strategy: &Strategy, field_type: &syn::Type) -> proc_macro2::TokenStream {
    match strategy.name_str().as_str() {
        "VarInt" => quote! {
            copper_utils::codec::VarInt::read(data)?.0 as #field_type
        },
        "VarLong" => quote! {
            copper_utils::codec::VarLong::read(data)?.0 as #field_type
        },
        "Prefixed" => {
            let prefix = strategy.prefix_type_tokens();
            quote! {
                {
                    use copper_utils::serial::PrefixedRead;
                    <#field_type>::read_prefixed::<#prefix>(data)?
                }
            }
        }
        s => panic!("Unknown read strategy: `{s}`. Expected one of: VarInt, VarLong, Prefixed"),
    }
}

fn read_from_struct(s: syn::DataStruct, name: Ident) -> TokenStream {
    let Fields::Named(fields) = s.fields else {
        panic!("ReadFrom only supports structs with named fields");
    };

    let readers = fields.named.iter().map(|f| {
        let field_name = f.ident.as_ref().expect("should have a named field");
        let field_type = &f.ty;

        if let Some(strategy) = parse_strategy_attr(&f.attrs, "read") {
            let read_code = generate_read_code(&strategy, field_type);
            quote! {
                let #field_name = #read_code;
            }
        } else {
            quote! {
                let #field_name = <#field_type>::read(data)?;
            }
        }
    });

    let field_names = fields
        .named
        .iter()
        .map(|f| f.ident.as_ref().expect("should have a named field"));

    let expanded = quote! {
        #[automatically_derived]
        impl copper_utils::serial::ReadFrom for #name {
            fn read(data: &mut impl std::io::Read) -> std::io::Result<Self> {
                #(#readers)*

                Ok(Self {
                    #(#field_names),*
                })
            }
        }
    };

    TokenStream::from(expanded)
}

fn read_from_enum(e: syn::DataEnum, name: Ident, attrs: &[syn::Attribute]) -> TokenStream {
    let readers = e.variants.iter().map(|v| {
        assert!(
            matches!(v.fields, Fields::Unit),
            "ReadFrom only supports enum variants without fields"
        );
        let Some((_, value)) = &v.discriminant else {
            panic!(
                "ReadFrom only supports enum variants with an explicit discriminant (e.g. {} = 0)",
                &v.ident
            )
        };
        let v_name = &v.ident;
        quote! {
            #value => #name::#v_name,
        }
    });

    let read_discriminant = match parse_strategy_attr(attrs, "read")
        .as_ref()
        .map(Strategy::name_str)
    {
        None => quote! { copper_utils::codec::VarInt::read(data)?.0 },
        Some(ref s) if s == "VarInt" => quote! { copper_utils::codec::VarInt::read(data)?.0 },
        Some(ref s) if s == "VarLong" => quote! { copper_utils::codec::VarLong::read(data)?.0 },
        Some(ref s) if PRIMITIVE_TYPES.contains(&s.as_str()) => {
            let enum_type = Ident::new(s, Span::call_site());
            quote! { <#enum_type as copper_utils::serial::ReadFrom>::read(data)? }
        }
        Some(s) => panic!(
            "Unknown read strategy for enum: `{s}`. \
            Expected one of: VarInt, VarLong, or a primitive type ({PRIMITIVE_TYPES:?})"
        ),
    };

    let error_msg = format!("Invalid {name}");

    TokenStream::from(quote! {
        #[automatically_derived]
        impl copper_utils::serial::ReadFrom for #name {
            fn read(data: &mut impl std::io::Read) -> std::io::Result<Self> {
                Ok(match i64::from({ #read_discriminant }) {
                    #(#readers)*
                    _ => {
                        return Err(std::io::Error::other(#error_msg));
                    }
                })
            }
        }
    })
}

/// Derives the `WriteTo` trait.
///
/// # Panics
/// - On unions, tuple structs, and unknown strategies.
#[proc_macro_derive(WriteTo, attributes(write))]
pub fn write_to_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    match input.data {
        Data::Struct(s) => write_to_struct(s, name, &input.generics),
        Data::Enum(_) => write_to_enum(&name, &input.attrs),
        Data::Union(_) => panic!("WriteTo can only be derived for structs and enums"),
    }
}

fn generate_write_code(
    strategy: &Strategy,
    value: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    match strategy.name_str().as_str() {
        "VarInt" => quote! {
            copper_utils::codec::VarInt(#value as i32).write(writer)?;
        },
        "VarLong" => quote! {
            copper_utils::codec::VarLong(#value as i64).write(writer)?;
        },
        "Prefixed" => {
            let prefix = strategy.prefix_type_tokens();
            quote! {
                {
                    use copper_utils::serial::PrefixedWrite;
                    (#value).write_prefixed::<#prefix>(writer)?;
                }
            }
        }
        s => panic!("Unknown write strategy: `{s}`. Expected one of: VarInt, VarLong, Prefixed"),
    }
}

fn write_to_struct(s: syn::DataStruct, name: Ident, generics: &syn::Generics) -> TokenStream {
    let Fields::Named(fields) = s.fields else {
        panic!("WriteTo only supports structs with named fields");
    };

    let writers = fields.named.iter().map(|f| {
        let field_name = f.ident.as_ref().expect("should have a named field");

        if let Some(strategy) = parse_strategy_attr(&f.attrs, "write") {
            generate_write_code(&strategy, quote! { self.#field_name })
        } else {
            quote! {
                self.#field_name.write(writer)?;
            }
        }
    });

    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics copper_utils::serial::WriteTo for #name #ty_generics {
            fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
                #(#writers)*

                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

fn write_to_enum(name: &Ident, attrs: &[syn::Attribute]) -> TokenStream {
    let strategy = parse_strategy_attr(attrs, "write")
        .expect("WriteTo for enums requires the `write` attribute: #[write(as = VarInt)]");
    let strategy_name = strategy.name_str();

    let writer = match strategy_name.as_str() {
        "VarInt" => quote! {
            copper_utils::codec::VarInt(*self as i32).write(writer)?;
        },
        s if PRIMITIVE_TYPES.contains(&s) => {
            let enum_type = Ident::new(s, Span::call_site());
            quote! {
                (*self as #enum_type).write(writer)?;
            }
        }
        s => panic!(
            "Unknown write strategy for enum: `{s}`. \
            Expected one of: VarInt, or a primitive type ({PRIMITIVE_TYPES:?})"
        ),
    };

    TokenStream::from(quote! {
        #[automatically_derived]
        impl copper_utils::serial::WriteTo for #name {
            fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
                #writer

                Ok(())
            }
        }
    })
}

/// Derives the `ClientPacket` trait from `#[packet_id(State = CONST)]`
/// attributes.
///
/// # Panics
/// - If no `packet_id` attribute is present or it is malformed.
#[proc_macro_derive(ClientPacket, attributes(packet_id))]
pub fn client_packet_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let attrs: Vec<_> = input
        .attrs
        .iter()
        .filter(|a| a.path().is_ident("packet_id"))
        .collect();

    assert!(
        !attrs.is_empty(),
        "ClientPacket derive macro requires at least one #[packet_id(...)] attribute"
    );

    let mut match_arms = Vec::new();

    for attr in attrs {
        if let Meta::List(meta) = attr.meta.clone() {
            meta.parse_nested_meta(|meta| {
                let state = meta
                    .path
                    .get_ident()
                    .expect("Expected an identifier for the protocol state")
                    .to_string();
                let value: syn::Expr = meta.value()?.parse()?;
                let state_ident = Ident::new(&state, Span::call_site());

                match_arms.push(quote! {
                    crate::utils::ConnectionProtocol::#state_ident => Some(#value),
                });

                Ok(())
            })
            .unwrap_or_else(|e| panic!("Failed to parse `packet_id` attribute: {e}"));
        } else {
            panic!("`packet_id` attribute must be a list: `#[packet_id(State = CONST)]`");
        }
    }

    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics crate::packet_traits::ClientPacket for #name #ty_generics {
            fn get_id(&self, protocol: crate::utils::ConnectionProtocol) -> Option<i32> {
                match protocol {
                    #(#match_arms)*
                    _ => None,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derives the `ServerPacket` marker trait.
#[proc_macro_derive(ServerPacket)]
pub fn server_packet_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let expanded = quote! {
        #[automatically_derived]
        impl crate::packet_traits::ServerPacket for #name {}
    };

    TokenStream::from(expanded)
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, PathSegment, Type, TypePath};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NumberKind {
    Signed { bits: u8 },
    Unsigned { bits: u8 },
    Float,
}

/// Value kind of a field, detected from the last path segment of its type.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldKind {
    String,
    Number(NumberKind),
    Binary,
    Time { optional: bool },
    Other,
}

impl FieldKind {
    pub fn detect(ty: &Type) -> Self {
        match ty {
            Type::Path(path) => detect_path(path),
            Type::Reference(reference) => Self::detect(&reference.elem),
            Type::Group(group) => Self::detect(&group.elem),
            Type::Paren(paren) => Self::detect(&paren.elem),
            _ => Self::Other,
        }
    }

    /// `Vec<u8>`, `[u8; N]`, `&[u8]` and boxed or borrowed byte slices.
    ///
    /// Serde encodes these as lists; they are binary only through
    /// `#[serde(with = "serde_bytes")]`.
    pub fn is_byte_sequence(ty: &Type) -> bool {
        match ty {
            Type::Array(array) => is_u8(&array.elem),
            Type::Slice(slice) => is_u8(&slice.elem),
            Type::Reference(reference) => Self::is_byte_sequence(&reference.elem),
            Type::Group(group) => Self::is_byte_sequence(&group.elem),
            Type::Paren(paren) => Self::is_byte_sequence(&paren.elem),
            Type::Path(path) => path.path.segments.last().is_some_and(|segment| {
                match segment.ident.to_string().as_str() {
                    "Vec" => first_generic_type(segment).is_some_and(is_u8),
                    "Box" | "Cow" => {
                        first_generic_type(segment).is_some_and(Self::is_byte_sequence)
                    }
                    _ => false,
                }
            }),
            _ => false,
        }
    }

    pub fn expand(&self) -> TokenStream {
        match self {
            Self::String => quote! { ::aws_dynamo_fns::FieldKind::String },
            Self::Number(number) => {
                let number = match number {
                    NumberKind::Signed { bits } => {
                        quote! { ::aws_dynamo_fns::NumberKind::Signed { bits: #bits } }
                    }
                    NumberKind::Unsigned { bits } => {
                        quote! { ::aws_dynamo_fns::NumberKind::Unsigned { bits: #bits } }
                    }
                    NumberKind::Float => quote! { ::aws_dynamo_fns::NumberKind::Float },
                };
                quote! { ::aws_dynamo_fns::FieldKind::Number(#number) }
            }
            Self::Binary => quote! { ::aws_dynamo_fns::FieldKind::Binary },
            Self::Time { optional } => {
                quote! { ::aws_dynamo_fns::FieldKind::Time { optional: #optional } }
            }
            Self::Other => quote! { ::aws_dynamo_fns::FieldKind::Other },
        }
    }
}

fn detect_path(path: &TypePath) -> FieldKind {
    let Some(path_segment) = path.path.segments.last() else {
        return FieldKind::Other;
    };

    match path_segment.ident.to_string().as_str() {
        "String" | "str" => FieldKind::String,
        "i8" => FieldKind::Number(NumberKind::Signed { bits: 8 }),
        "i16" => FieldKind::Number(NumberKind::Signed { bits: 16 }),
        "i32" => FieldKind::Number(NumberKind::Signed { bits: 32 }),
        "i64" | "isize" => FieldKind::Number(NumberKind::Signed { bits: 64 }),
        "i128" => FieldKind::Number(NumberKind::Signed { bits: 128 }),
        "u8" => FieldKind::Number(NumberKind::Unsigned { bits: 8 }),
        "u16" => FieldKind::Number(NumberKind::Unsigned { bits: 16 }),
        "u32" => FieldKind::Number(NumberKind::Unsigned { bits: 32 }),
        "u64" | "usize" => FieldKind::Number(NumberKind::Unsigned { bits: 64 }),
        "u128" => FieldKind::Number(NumberKind::Unsigned { bits: 128 }),
        "f32" | "f64" => FieldKind::Number(NumberKind::Float),
        "ByteBuf" | "Bytes" => FieldKind::Binary,
        "DateTime" => FieldKind::Time { optional: false },
        "Box" | "Cow" => first_generic_type(path_segment)
            .map(FieldKind::detect)
            .unwrap_or(FieldKind::Other),
        "Option" => match first_generic_type(path_segment).map(FieldKind::detect) {
            Some(FieldKind::Time { .. }) => FieldKind::Time { optional: true },
            _ => FieldKind::Other,
        },
        _ => FieldKind::Other,
    }
}

fn first_generic_type(path_segment: &PathSegment) -> Option<&Type> {
    match &path_segment.arguments {
        PathArguments::AngleBracketed(abga) => abga.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.path.is_ident("u8"))
}

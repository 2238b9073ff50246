use crate::dynamo::field_kind::FieldKind;

use proc_macro2::TokenStream;
use quote::quote;
use std::fmt::{Display, Formatter};
use syn::Path;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Role {
    HashKey,
    SortKey,
    Version,
    CreatedTime,
    ModifiedTime,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let val = match self {
            Self::HashKey => "hash_key",
            Self::SortKey => "sort_key",
            Self::Version => "version",
            Self::CreatedTime => "created_time",
            Self::ModifiedTime => "modified_time",
        };
        write!(f, "{val}")
    }
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::HashKey,
        Self::SortKey,
        Self::Version,
        Self::CreatedTime,
        Self::ModifiedTime,
    ];

    /// `range_key` is accepted as an alias of `sort_key`.
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.is_ident("range_key") {
            return Some(Self::SortKey);
        }
        Self::ALL
            .into_iter()
            .find(|role| path.is_ident(&role.to_string()))
    }

    pub fn accepts(&self, kind: FieldKind) -> bool {
        match self {
            Self::HashKey | Self::SortKey => matches!(
                kind,
                FieldKind::String | FieldKind::Number(_) | FieldKind::Binary
            ),
            Self::Version => matches!(kind, FieldKind::Number(_)),
            Self::CreatedTime | Self::ModifiedTime => matches!(kind, FieldKind::Time { .. }),
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(self, Self::CreatedTime | Self::ModifiedTime)
    }

    pub fn expand(&self) -> TokenStream {
        match self {
            Self::HashKey => quote! { ::aws_dynamo_fns::Role::HashKey },
            Self::SortKey => quote! { ::aws_dynamo_fns::Role::SortKey },
            Self::Version => quote! { ::aws_dynamo_fns::Role::Version },
            Self::CreatedTime => quote! { ::aws_dynamo_fns::Role::CreatedTime },
            Self::ModifiedTime => quote! { ::aws_dynamo_fns::Role::ModifiedTime },
        }
    }
}

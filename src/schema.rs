//! Static descriptors emitted by `#[derive(Table)]`.

use std::fmt::{Display, Formatter};

/// A record type that can be turned into DynamoDB requests.
///
/// Usually derived; see [`crate::Table`](derive@crate::Table). A manual
/// implementation must return a reference to a `static` descriptor: the
/// address of the descriptor identifies the type in the model cache.
pub trait Table {
    fn schema() -> &'static TableSchema;
}

/// Field tags of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub type_name: &'static str,
    pub table_name: Option<&'static str>,
    /// Only the tagged fields.
    pub fields: &'static [FieldSchema],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Attribute name the field serializes under.
    pub name: &'static str,
    pub kind: FieldKind,
    pub roles: &'static [Role],
    /// Timestamp stored as epoch seconds (type N).
    pub unix_time: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// Two's complement integer of `bits` width.
    Signed { bits: u8 },
    Unsigned { bits: u8 },
    Float,
}

/// Value kind of a field as seen by the derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Number(NumberKind),
    Binary,
    /// `DateTime<Utc>`, or `Option<DateTime<Utc>>` when `optional`.
    Time {
        optional: bool,
    },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    HashKey,
    SortKey,
    Version,
    CreatedTime,
    ModifiedTime,
}

impl Role {
    pub(crate) fn accepts(&self, kind: FieldKind) -> bool {
        match self {
            Self::HashKey | Self::SortKey => matches!(
                kind,
                FieldKind::String | FieldKind::Number(_) | FieldKind::Binary
            ),
            Self::Version => matches!(kind, FieldKind::Number(_)),
            Self::CreatedTime | Self::ModifiedTime => matches!(kind, FieldKind::Time { .. }),
        }
    }
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

use crate::expression::ExpressionError;
use crate::schema::{FieldKind, Role};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no hash_key field in type \"{0}\"")]
    MissingHashKey(&'static str),

    #[error("found multiple {role} fields in type \"{type_name}\"")]
    DuplicateRole {
        type_name: &'static str,
        role: Role,
    },

    #[error("unsupported {role} field type {kind:?} for attribute \"{name}\"")]
    UnsupportedFieldType {
        name: &'static str,
        role: Role,
        kind: FieldKind,
    },

    #[error("unix_time set on attribute \"{0}\" which is not a timestamp")]
    UnixTimeWithoutTimestamp(&'static str),

    #[error("no version field in type \"{0}\"")]
    MissingVersion(&'static str),

    #[error("no timestamp fields in type \"{0}\"")]
    MissingTimestamps(&'static str),

    #[error("no table name for type \"{0}\"")]
    MissingTableName(&'static str),

    #[error("encode item error: {0}")]
    Encode(#[source] serde_dynamo::Error),

    #[error("decode item error: {0}")]
    Decode(#[source] serde_dynamo::Error),

    #[error("attribute \"{0}\" is missing from the encoded item")]
    MissingAttribute(&'static str),

    #[error("key attribute \"{name}\" must encode as S, N or B, got {value}")]
    InvalidKey { name: &'static str, value: String },

    /// The version did not encode to a number of its declared kind.
    #[error("version attribute \"{name}\" has unknown numeric value {value:?}")]
    InvalidVersion { name: &'static str, value: String },

    #[error("timestamp attribute \"{name}\" has invalid value {value:?}")]
    InvalidTimestamp { name: &'static str, value: String },

    #[error("build expressions error: {0}")]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Build(#[from] aws_sdk_dynamodb::error::BuildError),

    #[error(transparent)]
    Service(Box<aws_sdk_dynamodb::Error>),
}

impl From<aws_sdk_dynamodb::Error> for Error {
    fn from(err: aws_sdk_dynamodb::Error) -> Self {
        Self::Service(Box::new(err))
    }
}

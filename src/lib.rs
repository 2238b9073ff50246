//! Builds `GetItem`, `PutItem`, `UpdateItem` and `DeleteItem` requests for
//! [`aws_sdk_dynamodb`] from structs tagged with `#[derive(Table)]`.
//!
//! Records are encoded with [`serde_dynamo`]. Field tags mark the key
//! attributes, an optional version attribute used for optimistic locking, and
//! optional created/modified timestamps that are filled in automatically.
//!
//! Generated timestamps are written the way the field serializes: RFC 3339
//! strings by default, epoch seconds for fields using
//! `chrono::serde::ts_seconds` or `ts_seconds_option`. Byte keys need
//! `#[serde(with = "serde_bytes")]` or `serde_bytes::ByteBuf` to encode as
//! binary.
//!
//! ```
//! use aws_dynamo_fns::{Fns, PutOpts, Table, UpdateOpts};
//! use chrono::{DateTime, Utc};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Table)]
//! #[serde(rename_all = "camelCase")]
//! #[dynamo(table_name = "notes")]
//! struct Note {
//!     #[dynamo(hash_key)]
//!     id: String,
//!     #[dynamo(version)]
//!     version: i64,
//!     #[dynamo(created_time)]
//!     created_time: Option<DateTime<Utc>>,
//!     #[serde(with = "chrono::serde::ts_seconds_option")]
//!     #[dynamo(modified_time, unix_time)]
//!     modified_time: Option<DateTime<Utc>>,
//!     body: String,
//! }
//!
//! let note = Note {
//!     id: "a".to_string(),
//!     version: 0,
//!     created_time: None,
//!     modified_time: None,
//!     body: "hello".to_string(),
//! };
//!
//! let fns = Fns::new();
//! let put = fns.put(&note, PutOpts::new()).unwrap();
//! assert_eq!(put.condition_expression(), Some("attribute_not_exists (#0)"));
//!
//! let update = fns.update(&note, UpdateOpts::new().set("body", "bye")).unwrap();
//! assert_eq!(
//!     update.update_expression(),
//!     Some("SET #1 = :0, #2 = :1, #3 = if_not_exists(#3, :2), #4 = :3\n")
//! );
//! ```
//!
//! ## Compile fail cases
//! ```compile_fail
//! use aws_dynamo_fns::Table;
//!
//! #[derive(serde::Serialize, Table)]
//! struct NoHashKey {
//!     #[dynamo(version)]
//!     version: i64, // compile fails: hash_key not found
//! }
//! ```
//! ```compile_fail
//! use aws_dynamo_fns::Table;
//!
//! #[derive(serde::Serialize, Table)]
//! struct TwoVersions {
//!     #[dynamo(hash_key)]
//!     id: String,
//!     #[dynamo(version)]
//!     version: i64,
//!     #[dynamo(version)]
//!     revision: i64, // compile fails: only one version is allowed
//! }
//! ```
//! ```compile_fail
//! use aws_dynamo_fns::Table;
//!
//! #[derive(serde::Serialize, Table)]
//! struct StringVersion {
//!     #[dynamo(hash_key)]
//!     id: String,
//!     #[dynamo(version)]
//!     version: String, // compile fails: version must be a number
//! }
//! ```
//! ```compile_fail
//! use aws_dynamo_fns::Table;
//!
//! #[derive(serde::Serialize, Table)]
//! struct UnixKey {
//!     #[dynamo(hash_key, unix_time)]
//!     id: i64, // compile fails: unix_time outside a timestamp
//! }
//! ```
//! ```compile_fail
//! use aws_dynamo_fns::Table;
//! use chrono::{DateTime, Utc};
//!
//! #[derive(serde::Serialize, Table)]
//! struct UnixWithoutSeconds {
//!     #[dynamo(hash_key)]
//!     id: String,
//!     #[dynamo(modified_time, unix_time)]
//!     modified: DateTime<Utc>, // compile fails: serializes as a string
//! }
//! ```
//! ```compile_fail
//! use aws_dynamo_fns::Table;
//!
//! #[derive(serde::Serialize, Table)]
//! struct ListKey {
//!     #[dynamo(hash_key)]
//!     id: Vec<u8>, // compile fails: serializes as a list
//! }
//! ```

extern crate self as aws_dynamo_fns;

mod delete;
mod error;
pub mod expression;
mod fns;
mod get;
mod item;
mod model;
mod put;
mod schema;
mod update;

pub use aws_dynamo_fns_derive::Table;
pub use delete::{delete_item_request, DeleteOpts};
pub use error::{Error, Result};
pub use fns::{decode, delete, do_delete, do_get, do_put, do_update, get, put, update, Fns, ParseOpts};
pub use get::{get_item_request, GetOpts};
pub use model::{Attribute, Model};
pub use put::{put_item_request, PutOpts};
pub use schema::{FieldKind, FieldSchema, NumberKind, Role, Table, TableSchema};
pub use update::{update_item_request, UpdateOpts};

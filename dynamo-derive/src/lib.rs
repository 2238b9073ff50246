mod container;
mod dynamo;
mod table;
mod util;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `aws_dynamo_fns::Table` from `#[dynamo(...)]` field tags.
///
/// ```rust,ignore
/// #[derive(Serialize, Table)]
/// #[dynamo(table_name = "notes")]
/// struct Note {
///     #[dynamo(hash_key)]
///     id: String,
///     #[dynamo(sort_key)]
///     sort: String,
///     #[dynamo(version)]
///     version: i64,
///     #[dynamo(created_time)]
///     created: DateTime<Utc>,
///     #[serde(with = "chrono::serde::ts_seconds_option")]
///     #[dynamo(modified_time)]
///     modified: Option<DateTime<Utc>>,
/// }
/// ```
#[proc_macro_derive(Table, attributes(dynamo))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);
    table::expand_table(&mut input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

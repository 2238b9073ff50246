use super::DYNAMO_ATTR_META_ENTRY;
use crate::container::Container;
use crate::dynamo::field_kind::FieldKind;
use crate::dynamo::role::Role;

use proc_macro2::{Span, TokenStream};
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{parenthesized, token, Attribute, Error, Expr, Field, LitStr, Result, Token};

const SERDE_ATTR_META_ENTRY: &str = "serde";
const UNIX_TIME: &str = "unix_time";
const SERDE_BYTES: &str = "serde_bytes";
const TS_SECONDS: [&str; 2] = ["ts_seconds", "ts_seconds_option"];

/// Tags parsed from the `#[dynamo(...)]` attributes of one field.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct FieldAttr {
    pub roles: Vec<Role>,
    pub unix_time: bool,
}

impl FieldAttr {
    pub fn parse(field: &Field) -> Result<Self> {
        let mut field_attr = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident(DYNAMO_ATTR_META_ENTRY) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(UNIX_TIME) {
                    field_attr.unix_time = true;
                    return Ok(());
                }

                let role = Role::from_path(&meta.path)
                    .ok_or_else(|| meta.error("unsupported dynamo attribute"))?;
                if field_attr.roles.contains(&role) {
                    return Err(meta.error(format!("duplicated {role} attribute")));
                }
                field_attr.roles.push(role);
                Ok(())
            })?;
        }

        if field_attr.unix_time && !field_attr.roles.iter().any(Role::is_time) {
            return Err(Error::new(
                field.span(),
                "unix_time is only allowed on created_time or modified_time fields",
            ));
        }

        if field_attr.roles.contains(&Role::HashKey) && field_attr.roles.contains(&Role::SortKey) {
            return Err(Error::new(
                field.span(),
                "a field cannot be both hash_key and sort_key",
            ));
        }

        Ok(field_attr)
    }
}

/// The parts of `#[serde(...)]` that decide the attribute name of a field.
#[derive(Debug, Default)]
pub struct SerdeAttr {
    pub rename: Option<LitStr>,
    pub skip: bool,
    /// `with` module, or the `serialize_with` function path.
    pub with: Option<LitStr>,
}

impl SerdeAttr {
    pub fn parse_field(attrs: &[Attribute]) -> Result<Self> {
        let mut serde_attr = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(SERDE_ATTR_META_ENTRY) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    serde_attr.rename = parse_serialize_name(&meta)?;
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    serde_attr.skip = true;
                } else if meta.path.is_ident("with") || meta.path.is_ident("serialize_with") {
                    serde_attr.with = Some(meta.value()?.parse()?);
                } else {
                    skip_meta_value(&meta)?;
                }
                Ok(())
            })?;
        }

        Ok(serde_attr)
    }

    /// Returns the `rename_all` rule of the container, if any.
    pub fn parse_rename_all(attrs: &[Attribute]) -> Result<Option<LitStr>> {
        let mut rename_all = None;

        for attr in attrs {
            if !attr.path().is_ident(SERDE_ATTR_META_ENTRY) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    rename_all = parse_serialize_name(&meta)?;
                } else {
                    skip_meta_value(&meta)?;
                }
                Ok(())
            })?;
        }

        Ok(rename_all)
    }
}

/// Reads `key = "..."` or `key(serialize = "...", deserialize = "...")`.
fn parse_serialize_name(meta: &ParseNestedMeta) -> Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            name = Some(inner.value()?.parse()?);
        } else {
            skip_meta_value(&inner)?;
        }
        Ok(())
    })?;
    Ok(name)
}

fn skip_meta_value(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<TokenStream>()?;
    }
    Ok(())
}

/// Aligns the kind and the timestamp encoding of a field with the serde
/// `with` module it serializes through.
///
/// Byte sequences are binary only through `serde_bytes`. Timestamps are
/// epoch seconds exactly when they go through `chrono::serde::ts_seconds` or
/// `ts_seconds_option`; any other `with` on a timestamp is rejected.
pub fn apply_serde_with(container: &mut Container, with: Option<&LitStr>) -> Result<()> {
    let module = with.map(LitStr::value);
    let module = module
        .as_deref()
        .map(|module| module.trim_end_matches("::serialize"));

    if module == Some(SERDE_BYTES) && FieldKind::is_byte_sequence(container.ty) {
        container.kind = FieldKind::Binary;
    }

    if !container.roles.iter().any(Role::is_time) {
        return Ok(());
    }

    let span = with.map_or_else(|| container.ty.span(), LitStr::span);
    match module {
        Some(module) if is_ts_seconds(module) => container.unix_time = true,
        Some(_) => {
            return Err(Error::new(
                span,
                "timestamp fields only support chrono::serde::ts_seconds or ts_seconds_option",
            ))
        }
        None if container.unix_time => {
            return Err(Error::new(
                span,
                "unix_time requires #[serde(with = \"chrono::serde::ts_seconds\")] or ts_seconds_option",
            ))
        }
        None => {}
    }
    Ok(())
}

fn is_ts_seconds(module: &str) -> bool {
    module
        .rsplit("::")
        .next()
        .is_some_and(|last| TS_SECONDS.contains(&last))
}

/// Checks that each role is claimed at most once and that a hash key exists.
pub fn validate_roles(containers: &[Container], span: Span) -> Result<()> {
    for role in Role::ALL {
        let claimed = containers
            .iter()
            .filter(|c| c.roles.contains(&role))
            .collect::<Vec<_>>();

        match (role, claimed.len()) {
            (Role::HashKey, 0) => return Err(Error::new(span, "hash_key not found")),
            (_, 2..) => {
                return Err(Error::new(
                    claimed[1].field_ident.span(),
                    format!("only one {role} is allowed"),
                ))
            }
            _ => {}
        }

        for container in claimed {
            if !role.accepts(container.kind) {
                return Err(Error::new(
                    container.ty.span(),
                    format!("unsupported {role} field type {:?}", container.kind),
                ));
            }
        }
    }

    Ok(())
}

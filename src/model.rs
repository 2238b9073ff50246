//! Validated metadata of a [`Table`] type, parsed once and cached.

use crate::error::{Error, Result};
use crate::schema::{FieldKind, FieldSchema, Role, Table, TableSchema};

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::debug;

/// Parsed models keyed by the address of their static [`TableSchema`].
///
/// Entries are never removed or replaced, so a poisoned lock still holds
/// consistent data.
static MODELS: LazyLock<RwLock<HashMap<usize, Arc<Model>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// A tagged field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: FieldKind,
    pub unix_time: bool,
}

impl From<&FieldSchema> for Attribute {
    fn from(field: &FieldSchema) -> Self {
        Self {
            name: field.name,
            kind: field.kind,
            unix_time: field.unix_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub type_name: &'static str,
    pub table_name: Option<&'static str>,
    pub hash_key: Attribute,
    pub sort_key: Option<Attribute>,
    pub version: Option<Attribute>,
    pub created_time: Option<Attribute>,
    pub modified_time: Option<Attribute>,
}

impl Model {
    /// Validates a schema: one hash key, each role claimed at most once, and
    /// field kinds that fit their roles.
    pub fn parse(schema: &TableSchema) -> Result<Self> {
        let type_name = schema.type_name;
        let mut hash_key = None;
        let mut sort_key = None;
        let mut version = None;
        let mut created_time = None;
        let mut modified_time = None;

        for field in schema.fields {
            if field.unix_time
                && !field
                    .roles
                    .iter()
                    .any(|role| matches!(role, Role::CreatedTime | Role::ModifiedTime))
            {
                return Err(Error::UnixTimeWithoutTimestamp(field.name));
            }

            for &role in field.roles {
                if !role.accepts(field.kind) {
                    return Err(Error::UnsupportedFieldType {
                        name: field.name,
                        role,
                        kind: field.kind,
                    });
                }

                let slot = match role {
                    Role::HashKey => &mut hash_key,
                    Role::SortKey => &mut sort_key,
                    Role::Version => &mut version,
                    Role::CreatedTime => &mut created_time,
                    Role::ModifiedTime => &mut modified_time,
                };
                if slot.is_some() {
                    return Err(Error::DuplicateRole { type_name, role });
                }
                *slot = Some(Attribute::from(field));
            }
        }

        Ok(Self {
            type_name,
            table_name: schema.table_name,
            hash_key: hash_key.ok_or(Error::MissingHashKey(type_name))?,
            sort_key,
            version,
            created_time,
            modified_time,
        })
    }

    /// Returns the cached model of `T`, parsing it on first use.
    pub fn load<T: Table + ?Sized>() -> Result<Arc<Self>> {
        let schema = T::schema();
        let key = std::ptr::from_ref(schema) as usize;

        if let Some(model) = MODELS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(model.clone());
        }

        let model = Arc::new(Self::parse(schema)?);
        let mut models = MODELS.write().unwrap_or_else(PoisonError::into_inner);
        let model = models.entry(key).or_insert_with(|| {
            debug!(type_name = schema.type_name, "parsed table model");
            model
        });
        Ok(model.clone())
    }

    /// Names of the key attributes, hash key first.
    pub fn key_names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.hash_key.name).chain(self.sort_key.map(|sort_key| sort_key.name))
    }
}

#[cfg(test)]
mod test {
    use super::{Attribute, Model};
    use crate::error::Error;
    use crate::schema::{FieldKind, FieldSchema, NumberKind, Role, Table, TableSchema};

    use std::sync::Arc;

    const fn field(name: &'static str, kind: FieldKind, roles: &'static [Role]) -> FieldSchema {
        FieldSchema {
            name,
            kind,
            roles,
            unix_time: false,
        }
    }

    struct Manual;

    impl Table for Manual {
        fn schema() -> &'static TableSchema {
            static SCHEMA: TableSchema = TableSchema {
                type_name: "Manual",
                table_name: None,
                fields: &[
                    field("id", FieldKind::String, &[Role::HashKey]),
                    field("sort", FieldKind::Binary, &[Role::SortKey]),
                    field(
                        "version",
                        FieldKind::Number(NumberKind::Unsigned { bits: 64 }),
                        &[Role::Version],
                    ),
                    FieldSchema {
                        name: "modified",
                        kind: FieldKind::Time { optional: true },
                        roles: &[Role::ModifiedTime],
                        unix_time: true,
                    },
                ],
            };
            &SCHEMA
        }
    }

    #[test]
    fn test_parse() {
        let model = Model::parse(Manual::schema()).unwrap();
        assert_eq!(model.hash_key.name, "id");
        assert_eq!(model.sort_key.unwrap().kind, FieldKind::Binary);
        assert_eq!(
            model.version,
            Some(Attribute {
                name: "version",
                kind: FieldKind::Number(NumberKind::Unsigned { bits: 64 }),
                unix_time: false,
            })
        );
        assert!(model.created_time.is_none());
        assert!(model.modified_time.unwrap().unix_time);
        assert_eq!(model.key_names().collect::<Vec<_>>(), vec!["id", "sort"]);
    }

    #[test]
    fn test_load_is_cached() {
        let a = Model::load::<Manual>().unwrap();
        let b = Model::load::<Manual>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_parse_errors() {
        const NO_KEY: TableSchema = TableSchema {
            type_name: "NoKey",
            table_name: None,
            fields: &[field(
                "version",
                FieldKind::Number(NumberKind::Signed { bits: 64 }),
                &[Role::Version],
            )],
        };
        assert!(matches!(
            Model::parse(&NO_KEY),
            Err(Error::MissingHashKey("NoKey"))
        ));

        const TWO_VERSIONS: TableSchema = TableSchema {
            type_name: "TwoVersions",
            table_name: None,
            fields: &[
                field("id", FieldKind::String, &[Role::HashKey]),
                field(
                    "v1",
                    FieldKind::Number(NumberKind::Signed { bits: 64 }),
                    &[Role::Version],
                ),
                field("v2", FieldKind::Number(NumberKind::Float), &[Role::Version]),
            ],
        };
        assert_eq!(
            Model::parse(&TWO_VERSIONS).unwrap_err().to_string(),
            "found multiple version fields in type \"TwoVersions\""
        );

        const BAD_KEY: TableSchema = TableSchema {
            type_name: "BadKey",
            table_name: None,
            fields: &[field("id", FieldKind::Other, &[Role::HashKey])],
        };
        assert!(matches!(
            Model::parse(&BAD_KEY),
            Err(Error::UnsupportedFieldType {
                role: Role::HashKey,
                ..
            })
        ));

        const BAD_TIME: TableSchema = TableSchema {
            type_name: "BadTime",
            table_name: None,
            fields: &[
                field("id", FieldKind::String, &[Role::HashKey]),
                field("created", FieldKind::String, &[Role::CreatedTime]),
            ],
        };
        assert_eq!(
            Model::parse(&BAD_TIME).unwrap_err().to_string(),
            "unsupported created_time field type String for attribute \"created\""
        );

        const BAD_UNIX_TIME: TableSchema = TableSchema {
            type_name: "BadUnixTime",
            table_name: None,
            fields: &[
                field("id", FieldKind::String, &[Role::HashKey]),
                FieldSchema {
                    name: "version",
                    kind: FieldKind::Number(NumberKind::Signed { bits: 64 }),
                    roles: &[Role::Version],
                    unix_time: true,
                },
            ],
        };
        assert!(matches!(
            Model::parse(&BAD_UNIX_TIME),
            Err(Error::UnixTimeWithoutTimestamp("version"))
        ));
    }
}

mod attr;

use crate::container::Container;
use crate::table::attr::{apply_serde_with, validate_roles, FieldAttr, SerdeAttr};
use crate::util::{apply_rename_all, strip_raw_prefix, to_pascal_case};

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DataStruct, DeriveInput, Error, LitStr, Result};

const KEY_TABLE_NAME: &str = "table_name";
const DYNAMO_ATTR_META_ENTRY: &str = "dynamo";

pub fn expand_table(input: &mut DeriveInput) -> Result<TokenStream> {
    let input_span = input.span();

    let DeriveInput {
        attrs,
        ident,
        generics,
        data,
        ..
    } = input;

    let table_name = get_table_name(ident, attrs)?;
    let ds = match &data {
        Data::Struct(ds) => ds,
        _ => return Err(Error::new(input_span, "only struct type available")),
    };

    let rename_all = SerdeAttr::parse_rename_all(attrs)?;
    let containers = get_containers(ds, rename_all.as_ref())?;
    validate_roles(&containers, input_span)?;

    let type_name = ident.to_string();
    let field_schemas = containers
        .iter()
        .filter(|c| !c.roles.is_empty())
        .map(Container::expand_field_schema)
        .collect::<Vec<_>>();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::aws_dynamo_fns::Table for #ident #ty_generics #where_clause {
            fn schema() -> &'static ::aws_dynamo_fns::TableSchema {
                static SCHEMA: ::aws_dynamo_fns::TableSchema = ::aws_dynamo_fns::TableSchema {
                    type_name: #type_name,
                    table_name: ::core::option::Option::Some(#table_name),
                    fields: &[ #( #field_schemas ),* ],
                };
                &SCHEMA
            }
        }
    })
}

fn get_table_name(id: &Ident, attrs: &[Attribute]) -> Result<LitStr> {
    let mut table_name = LitStr::new(&to_pascal_case(&id.to_string()), id.span());

    for attr in attrs {
        if attr.path().is_ident(DYNAMO_ATTR_META_ENTRY) {
            attr.parse_nested_meta(|table| {
                if table.path.is_ident(KEY_TABLE_NAME) {
                    table_name = table.value()?.parse()?;
                    Ok(())
                } else {
                    Err(table.error("unsupported dynamo attribute"))
                }
            })?;
        }
    }

    if table_name.value().is_empty() {
        return Err(Error::new(table_name.span(), "empty table name"));
    }
    Ok(table_name)
}

fn get_containers<'a>(ds: &'a DataStruct, rename_all: Option<&LitStr>) -> Result<Vec<Container<'a>>> {
    let mut containers = vec![];

    for field in &ds.fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or(Error::new(field.span(), "field ident not found"))?;

        let serde_attr = SerdeAttr::parse_field(&field.attrs)?;
        let field_name = strip_raw_prefix(&ident.to_string()).to_string();
        let attribute_name = match (serde_attr.rename, rename_all) {
            (Some(rename), _) => rename.value(),
            (None, Some(rule)) => apply_rename_all(rule, &field_name)?,
            (None, None) => field_name,
        };

        let field_attr = FieldAttr::parse(field)?;
        if serde_attr.skip && !field_attr.roles.is_empty() {
            return Err(Error::new(
                field.span(),
                "tagged fields must not be skipped by serde",
            ));
        }

        let mut container = Container::new(ident, &field.ty, attribute_name);
        container.roles = field_attr.roles;
        container.unix_time = field_attr.unix_time;
        apply_serde_with(&mut container, serde_attr.with.as_ref())?;
        containers.push(container);
    }

    Ok(containers)
}

#[cfg(test)]
mod test {
    use super::expand_table;
    use syn::{parse_quote, DeriveInput};

    #[test]
    fn test_expand_table_name() {
        let mut input: DeriveInput = parse_quote! {
            #[dynamo(table_name = "notes")]
            struct Note {
                #[dynamo(hash_key)]
                id: String,
            }
        };
        let expanded = expand_table(&mut input).unwrap().to_string();
        assert!(expanded.contains("\"notes\""));

        let mut input: DeriveInput = parse_quote! {
            struct user_note {
                #[dynamo(hash_key)]
                id: String,
            }
        };
        let expanded = expand_table(&mut input).unwrap().to_string();
        assert!(expanded.contains("\"UserNote\""));
    }

    #[test]
    fn test_expand_attribute_names() {
        let mut input: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase")]
            struct Note {
                #[dynamo(hash_key)]
                #[serde(rename = "PK")]
                id: String,
                #[dynamo(modified_time)]
                modified_at: DateTime<Utc>,
                body_text: String,
            }
        };
        let expanded = expand_table(&mut input).unwrap().to_string();
        assert!(expanded.contains("\"PK\""));
        assert!(expanded.contains("\"modifiedAt\""));
        // untagged fields are not part of the schema
        assert!(!expanded.contains("bodyText"));
    }

    #[test]
    fn test_expand_errors() {
        let mut input: DeriveInput = parse_quote! {
            enum Note {
                A,
            }
        };
        assert_eq!(
            expand_table(&mut input).err().unwrap().to_string(),
            "only struct type available"
        );

        let mut input: DeriveInput = parse_quote! {
            struct Note {
                #[dynamo(hash_key)]
                #[serde(skip)]
                id: String,
            }
        };
        assert_eq!(
            expand_table(&mut input).err().unwrap().to_string(),
            "tagged fields must not be skipped by serde"
        );
    }
}

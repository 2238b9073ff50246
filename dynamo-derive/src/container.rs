use crate::dynamo::field_kind::FieldKind;
use crate::dynamo::role::Role;

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::Type;

#[derive(Clone, Debug)]
pub struct Container<'a> {
    /// field of struct
    pub field_ident: &'a Ident,
    /// type of field
    pub ty: &'a Type,
    /// name the field is serialized under
    pub attribute_name: String,
    /// value kind detected from the field type
    pub kind: FieldKind,
    /// roles parsed from `#[dynamo(...)]`
    pub roles: Vec<Role>,
    /// timestamp stored as epoch seconds
    pub unix_time: bool,
}

impl<'a> Container<'a> {
    pub fn new(ident: &'a Ident, ty: &'a Type, attribute_name: String) -> Self {
        Self {
            field_ident: ident,
            ty,
            attribute_name,
            kind: FieldKind::detect(ty),
            roles: vec![],
            unix_time: false,
        }
    }

    pub fn expand_field_schema(&self) -> TokenStream {
        let name = &self.attribute_name;
        let kind = self.kind.expand();
        let roles = self.roles.iter().map(Role::expand);
        let unix_time = self.unix_time;

        quote! {
            ::aws_dynamo_fns::FieldSchema {
                name: #name,
                kind: #kind,
                roles: &[ #( #roles ),* ],
                unix_time: #unix_time,
            }
        }
    }
}

pub mod field_kind;
pub mod role;

//! Entry points shared by every operation.

use crate::delete::DeleteOpts;
use crate::error::{Error, Result};
use crate::expression::ConditionBuilder;
use crate::get::GetOpts;
use crate::model::Model;
use crate::put::PutOpts;
use crate::schema::Table;
use crate::update::UpdateOpts;

use aws_sdk_dynamodb::operation::delete_item::{DeleteItemInput, DeleteItemOutput};
use aws_sdk_dynamodb::operation::get_item::{GetItemInput, GetItemOutput};
use aws_sdk_dynamodb::operation::put_item::{PutItemInput, PutItemOutput};
use aws_sdk_dynamodb::operation::update_item::{UpdateItemInput, UpdateItemOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Checks applied by [`Fns::register`] on top of the schema validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOpts {
    pub must_have_version: bool,
    pub must_have_timestamps: bool,
}

impl ParseOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must_have_version(mut self) -> Self {
        self.must_have_version = true;
        self
    }

    /// Requires a created or a modified timestamp.
    pub fn must_have_timestamps(mut self) -> Self {
        self.must_have_timestamps = true;
        self
    }
}

/// Request builder.
///
/// Holds the clock used for auto-generated timestamps; every other input
/// comes from the record and the per-call options.
#[derive(Debug, Clone, Copy)]
pub struct Fns {
    clock: fn() -> DateTime<Utc>,
}

impl Default for Fns {
    fn default() -> Self {
        Self { clock: Utc::now }
    }
}

impl Fns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Parses and caches the model of `T`, failing early on a malformed
    /// schema or on a missing version/timestamp required by `opts`.
    pub fn register<T: Table + ?Sized>(&self, opts: ParseOpts) -> Result<Arc<Model>> {
        let model = Model::load::<T>()?;
        if opts.must_have_version && model.version.is_none() {
            return Err(Error::MissingVersion(model.type_name));
        }
        if opts.must_have_timestamps
            && model.created_time.is_none()
            && model.modified_time.is_none()
        {
            return Err(Error::MissingTimestamps(model.type_name));
        }
        Ok(model)
    }
}

pub(crate) fn table_name(model: &Model, name: Option<String>) -> Result<String> {
    name.or_else(|| model.table_name.map(String::from))
        .ok_or(Error::MissingTableName(model.type_name))
}

pub(crate) fn and_condition(
    left: Option<ConditionBuilder>,
    right: ConditionBuilder,
) -> ConditionBuilder {
    match left {
        Some(left) => left.and(right),
        None => right,
    }
}

pub(crate) fn or_condition(
    left: Option<ConditionBuilder>,
    right: ConditionBuilder,
) -> ConditionBuilder {
    match left {
        Some(left) => left.or(right),
        None => right,
    }
}

/// Decodes a returned item, treating an absent or empty map as no item.
pub fn decode<T: DeserializeOwned>(item: Option<HashMap<String, AttributeValue>>) -> Result<Option<T>> {
    match item {
        Some(item) if !item.is_empty() => serde_dynamo::from_item(item)
            .map(Some)
            .map_err(Error::Decode),
        _ => Ok(None),
    }
}

pub fn get<T: Table + Serialize>(record: &T, opts: GetOpts) -> Result<GetItemInput> {
    Fns::default().get(record, opts)
}

pub fn put<T: Table + Serialize>(record: &T, opts: PutOpts) -> Result<PutItemInput> {
    Fns::default().put(record, opts)
}

pub fn update<T: Table + Serialize>(record: &T, opts: UpdateOpts) -> Result<UpdateItemInput> {
    Fns::default().update(record, opts)
}

pub fn delete<T: Table + Serialize>(record: &T, opts: DeleteOpts) -> Result<DeleteItemInput> {
    Fns::default().delete(record, opts)
}

pub async fn do_get<T: Table + Serialize>(
    client: &Client,
    record: &T,
    opts: GetOpts,
) -> Result<GetItemOutput> {
    Fns::default().do_get(client, record, opts).await
}

pub async fn do_put<T: Table + Serialize>(
    client: &Client,
    record: &T,
    opts: PutOpts,
) -> Result<PutItemOutput> {
    Fns::default().do_put(client, record, opts).await
}

pub async fn do_update<T: Table + Serialize>(
    client: &Client,
    record: &T,
    opts: UpdateOpts,
) -> Result<UpdateItemOutput> {
    Fns::default().do_update(client, record, opts).await
}

pub async fn do_delete<T: Table + Serialize>(
    client: &Client,
    record: &T,
    opts: DeleteOpts,
) -> Result<DeleteItemOutput> {
    Fns::default().do_delete(client, record, opts).await
}

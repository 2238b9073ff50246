use crate::error::{Error, Result};
use crate::expression::{name, Builder, ProjectionBuilder};
use crate::fns::{table_name, Fns};
use crate::item;
use crate::model::Model;
use crate::schema::Table;

use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::get_item::{GetItemInput, GetItemOutput};
use aws_sdk_dynamodb::types::ReturnConsumedCapacity;
use aws_sdk_dynamodb::Client;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct GetOpts {
    table_name: Option<String>,
    consistent_read: Option<bool>,
    projection: Option<ProjectionBuilder>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
}

impl GetOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = Some(consistent_read);
        self
    }

    /// Adds attribute names (document paths allowed) to the projection.
    pub fn with_projection<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names = names.into_iter().map(|n| name(n));
        self.projection = Some(self.projection.unwrap_or_default().add_names(names));
        self
    }

    pub fn with_return_consumed_capacity(mut self, value: ReturnConsumedCapacity) -> Self {
        self.return_consumed_capacity = Some(value);
        self
    }
}

impl Fns {
    /// Builds a `GetItem` request for the key of `record`.
    pub fn get<T: Table + Serialize>(&self, record: &T, opts: GetOpts) -> Result<GetItemInput> {
        let model = Model::load::<T>()?;
        let key = item::extract_key(&model, &item::encode(record)?)?;
        let table_name = table_name(&model, opts.table_name)?;

        let mut builder = GetItemInput::builder()
            .table_name(&table_name)
            .set_key(Some(key))
            .set_consistent_read(opts.consistent_read)
            .set_return_consumed_capacity(opts.return_consumed_capacity);

        if let Some(projection) = opts.projection {
            let (_, projection, _, names, _) = Builder::new()
                .with_projection(projection)
                .build()?
                .into_parts();
            builder = builder
                .set_projection_expression(projection)
                .set_expression_attribute_names(names);
        }

        trace!(table_name = %table_name, "built GetItem request");
        Ok(builder.build()?)
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    pub async fn do_get<T: Table + Serialize>(
        &self,
        client: &Client,
        record: &T,
        opts: GetOpts,
    ) -> Result<GetItemOutput> {
        let input = self.get(record, opts)?;
        get_item_request(client, input)
            .send()
            .await
            .map_err(|err| Error::from(aws_sdk_dynamodb::Error::from(err)))
    }
}

/// Moves a built input into a fluent builder of `client`.
pub fn get_item_request(client: &Client, input: GetItemInput) -> GetItemFluentBuilder {
    client
        .get_item()
        .set_table_name(input.table_name)
        .set_key(input.key)
        .set_attributes_to_get(input.attributes_to_get)
        .set_consistent_read(input.consistent_read)
        .set_return_consumed_capacity(input.return_consumed_capacity)
        .set_projection_expression(input.projection_expression)
        .set_expression_attribute_names(input.expression_attribute_names)
}

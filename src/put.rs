use crate::error::{Error, Result};
use crate::expression::{name, raw_value, Builder, ConditionBuilder, OperandBuilder};
use crate::fns::{and_condition, or_condition, table_name, Fns};
use crate::item::{self, Version};
use crate::model::Model;
use crate::schema::Table;

use aws_sdk_dynamodb::operation::put_item::builders::PutItemFluentBuilder;
use aws_sdk_dynamodb::operation::put_item::{PutItemInput, PutItemOutput};
use aws_sdk_dynamodb::types::{
    AttributeValue, ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue,
    ReturnValuesOnConditionCheckFailure,
};
use aws_sdk_dynamodb::Client;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct PutOpts {
    pub disable_optimistic_locking: bool,
    pub disable_auto_generated_timestamps: bool,
    table_name: Option<String>,
    condition: Option<ConditionBuilder>,
    return_values: Option<ReturnValue>,
    return_values_on_condition_check_failure: Option<ReturnValuesOnConditionCheckFailure>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl PutOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable_optimistic_locking(mut self) -> Self {
        self.disable_optimistic_locking = true;
        self
    }

    pub fn disable_auto_generated_timestamps(mut self) -> Self {
        self.disable_auto_generated_timestamps = true;
        self
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// ANDs `condition` with the existing condition, if any.
    pub fn and(mut self, condition: ConditionBuilder) -> Self {
        self.condition = Some(and_condition(self.condition, condition));
        self
    }

    /// ORs `condition` with the existing condition, if any.
    pub fn or(mut self, condition: ConditionBuilder) -> Self {
        self.condition = Some(or_condition(self.condition, condition));
        self
    }

    pub fn with_return_values(mut self, value: ReturnValue) -> Self {
        self.return_values = Some(value);
        self
    }

    pub fn with_return_values_on_condition_check_failure(
        mut self,
        value: ReturnValuesOnConditionCheckFailure,
    ) -> Self {
        self.return_values_on_condition_check_failure = Some(value);
        self
    }

    pub fn with_return_consumed_capacity(mut self, value: ReturnConsumedCapacity) -> Self {
        self.return_consumed_capacity = Some(value);
        self
    }

    pub fn with_return_item_collection_metrics(mut self, value: ReturnItemCollectionMetrics) -> Self {
        self.return_item_collection_metrics = Some(value);
        self
    }
}

impl Fns {
    /// Builds a `PutItem` request writing the whole of `record`.
    ///
    /// With a version attribute, a zero version asserts that the item does
    /// not exist and is written as 1; any other version asserts the stored
    /// value and is written incremented. The created timestamp is filled in
    /// when zero and the modified timestamp is always refreshed.
    pub fn put<T: Table + Serialize>(&self, record: &T, opts: PutOpts) -> Result<PutItemInput> {
        let model = Model::load::<T>()?;
        let mut item = item::encode(record)?;
        let table_name = table_name(&model, opts.table_name)?;
        let mut condition = opts.condition;

        if let Some(version) = model.version.filter(|_| !opts.disable_optimistic_locking) {
            let (expected, next) = match Version::read(&version, &item)? {
                Version::Zero => (
                    name(model.hash_key.name).attribute_not_exists(),
                    AttributeValue::N(Version::INITIAL.to_string()),
                ),
                Version::Current { value, next } => {
                    (name(version.name).equal(raw_value(value)), next)
                }
            };
            condition = Some(and_condition(condition, expected));
            item.insert(version.name.to_string(), next);
        }

        if !opts.disable_auto_generated_timestamps {
            let now = self.now();
            if let Some(created_time) = model.created_time {
                let created = item::stored_time(&created_time, &item)?.unwrap_or(now);
                item.insert(
                    created_time.name.to_string(),
                    item::encode_time(&created_time, created)?,
                );
            }
            if let Some(modified_time) = model.modified_time {
                item.insert(
                    modified_time.name.to_string(),
                    item::encode_time(&modified_time, now)?,
                );
            }
        }

        let mut builder = PutItemInput::builder()
            .table_name(&table_name)
            .set_item(Some(item))
            .set_return_values(opts.return_values)
            .set_return_values_on_condition_check_failure(
                opts.return_values_on_condition_check_failure,
            )
            .set_return_consumed_capacity(opts.return_consumed_capacity)
            .set_return_item_collection_metrics(opts.return_item_collection_metrics);

        if let Some(condition) = condition {
            let (condition, _, _, names, values) = Builder::new()
                .with_condition(condition)
                .build()?
                .into_parts();
            builder = builder
                .set_condition_expression(condition)
                .set_expression_attribute_names(names)
                .set_expression_attribute_values(values);
        }

        trace!(
            table_name = %table_name,
            condition = ?builder.get_condition_expression(),
            "built PutItem request"
        );

        Ok(builder.build()?)
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    pub async fn do_put<T: Table + Serialize>(
        &self,
        client: &Client,
        record: &T,
        opts: PutOpts,
    ) -> Result<PutItemOutput> {
        let input = self.put(record, opts)?;
        put_item_request(client, input)
            .send()
            .await
            .map_err(|err| Error::from(aws_sdk_dynamodb::Error::from(err)))
    }
}

/// Moves a built input into a fluent builder of `client`.
pub fn put_item_request(client: &Client, input: PutItemInput) -> PutItemFluentBuilder {
    client
        .put_item()
        .set_table_name(input.table_name)
        .set_item(input.item)
        .set_expected(input.expected)
        .set_return_values(input.return_values)
        .set_return_consumed_capacity(input.return_consumed_capacity)
        .set_return_item_collection_metrics(input.return_item_collection_metrics)
        .set_conditional_operator(input.conditional_operator)
        .set_condition_expression(input.condition_expression)
        .set_expression_attribute_names(input.expression_attribute_names)
        .set_expression_attribute_values(input.expression_attribute_values)
        .set_return_values_on_condition_check_failure(
            input.return_values_on_condition_check_failure,
        )
}

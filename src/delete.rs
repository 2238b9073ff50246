use crate::error::{Error, Result};
use crate::expression::{name, raw_value, Builder, ConditionBuilder, OperandBuilder};
use crate::fns::{and_condition, or_condition, table_name, Fns};
use crate::item::{self, Version};
use crate::model::Model;
use crate::schema::Table;

use aws_sdk_dynamodb::operation::delete_item::builders::DeleteItemFluentBuilder;
use aws_sdk_dynamodb::operation::delete_item::{DeleteItemInput, DeleteItemOutput};
use aws_sdk_dynamodb::types::{
    ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue,
    ReturnValuesOnConditionCheckFailure,
};
use aws_sdk_dynamodb::Client;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct DeleteOpts {
    pub disable_optimistic_locking: bool,
    /// Has no effect: a delete writes no timestamps.
    pub disable_auto_generated_timestamps: bool,
    table_name: Option<String>,
    condition: Option<ConditionBuilder>,
    return_values: Option<ReturnValue>,
    return_values_on_condition_check_failure: Option<ReturnValuesOnConditionCheckFailure>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl DeleteOpts {
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

    pub fn and(mut self, condition: ConditionBuilder) -> Self {
        self.condition = Some(and_condition(self.condition, condition));
        self
    }

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
    /// Builds a `DeleteItem` request for the key of `record`, asserting its
    /// version unless locking is disabled.
    pub fn delete<T: Table + Serialize>(
        &self,
        record: &T,
        opts: DeleteOpts,
    ) -> Result<DeleteItemInput> {
        let model = Model::load::<T>()?;
        let item = item::encode(record)?;
        let key = item::extract_key(&model, &item)?;
        let table_name = table_name(&model, opts.table_name)?;
        let mut condition = opts.condition;

        if let Some(version) = model.version.filter(|_| !opts.disable_optimistic_locking) {
            let expected = match Version::read(&version, &item)? {
                Version::Zero => name(model.hash_key.name).attribute_not_exists(),
                Version::Current { value, .. } => name(version.name).equal(raw_value(value)),
            };
            condition = Some(and_condition(condition, expected));
        }

        let mut builder = DeleteItemInput::builder()
            .table_name(&table_name)
            .set_key(Some(key))
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
            "built DeleteItem request"
        );
        Ok(builder.build()?)
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    pub async fn do_delete<T: Table + Serialize>(
        &self,
        client: &Client,
        record: &T,
        opts: DeleteOpts,
    ) -> Result<DeleteItemOutput> {
        let input = self.delete(record, opts)?;
        delete_item_request(client, input)
            .send()
            .await
            .map_err(|err| Error::from(aws_sdk_dynamodb::Error::from(err)))
    }
}

/// Moves a built input into a fluent builder of `client`.
pub fn delete_item_request(client: &Client, input: DeleteItemInput) -> DeleteItemFluentBuilder {
    client
        .delete_item()
        .set_table_name(input.table_name)
        .set_key(input.key)
        .set_expected(input.expected)
        .set_conditional_operator(input.conditional_operator)
        .set_return_values(input.return_values)
        .set_return_consumed_capacity(input.return_consumed_capacity)
        .set_return_item_collection_metrics(input.return_item_collection_metrics)
        .set_condition_expression(input.condition_expression)
        .set_expression_attribute_names(input.expression_attribute_names)
        .set_expression_attribute_values(input.expression_attribute_values)
        .set_return_values_on_condition_check_failure(
            input.return_values_on_condition_check_failure,
        )
}

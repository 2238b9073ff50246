use crate::error::{Error, Result};
use crate::expression::{
    if_not_exists, name, raw_value, value, Builder, ConditionBuilder, OperandBuilder,
    UpdateBuilder,
};
use crate::fns::{and_condition, or_condition, table_name, Fns};
use crate::item::{self, Version};
use crate::model::Model;
use crate::schema::Table;

use aws_sdk_dynamodb::operation::update_item::builders::UpdateItemFluentBuilder;
use aws_sdk_dynamodb::operation::update_item::{UpdateItemInput, UpdateItemOutput};
use aws_sdk_dynamodb::types::{
    AttributeValue, ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue,
    ReturnValuesOnConditionCheckFailure,
};
use aws_sdk_dynamodb::Client;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct UpdateOpts {
    pub disable_optimistic_locking: bool,
    pub disable_auto_generated_timestamps: bool,
    table_name: Option<String>,
    condition: Option<ConditionBuilder>,
    update: UpdateBuilder,
    return_values: Option<ReturnValue>,
    return_values_on_condition_check_failure: Option<ReturnValuesOnConditionCheckFailure>,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
}

impl UpdateOpts {
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

    /// `SET name = value`
    pub fn set(mut self, path: impl Into<String>, v: impl Serialize) -> Self {
        self.update = self.update.set(name(path), value(v));
        self
    }

    /// `ADD name value`
    pub fn add(mut self, path: impl Into<String>, v: impl Serialize) -> Self {
        self.update = self.update.add(name(path), value(v));
        self
    }

    /// `DELETE name value`
    pub fn delete(mut self, path: impl Into<String>, v: impl Serialize) -> Self {
        self.update = self.update.delete(name(path), value(v));
        self
    }

    /// `REMOVE name`
    pub fn remove(mut self, path: impl Into<String>) -> Self {
        self.update = self.update.remove(name(path));
        self
    }

    /// See [`UpdateBuilder::set_or_remove`].
    pub fn set_or_remove(
        mut self,
        set: bool,
        remove: bool,
        path: impl Into<String>,
        v: impl Serialize,
    ) -> Self {
        self.update = self.update.set_or_remove(set, remove, name(path), value(v));
        self
    }

    /// `SET` for `Some`, `REMOVE` for `None`.
    pub fn set_or_remove_option<V: Serialize>(self, path: impl Into<String>, v: Option<V>) -> Self {
        match v {
            Some(v) => self.set(path, v),
            None => self.remove(path),
        }
    }

    /// Appends arbitrary update actions.
    pub fn with_update(mut self, update: UpdateBuilder) -> Self {
        self.update = self.update.merge(update);
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
    /// Builds an `UpdateItem` request for the key of `record`.
    ///
    /// Only the key is read from `record` besides the version and the created
    /// timestamp; every other change comes from the update actions of `opts`.
    /// A zero created timestamp is written with `if_not_exists`, so a value
    /// already stored is kept.
    /// A zero version asserts that the item does not exist and sets it to 1,
    /// any other version asserts the stored value and adds 1.
    pub fn update<T: Table + Serialize>(
        &self,
        record: &T,
        opts: UpdateOpts,
    ) -> Result<UpdateItemInput> {
        let model = Model::load::<T>()?;
        let item = item::encode(record)?;
        let key = item::extract_key(&model, &item)?;
        let table_name = table_name(&model, opts.table_name)?;
        let mut condition = opts.condition;
        let mut update = opts.update;

        if let Some(version) = model.version.filter(|_| !opts.disable_optimistic_locking) {
            let one = || raw_value(AttributeValue::N(Version::INITIAL.to_string()));
            match Version::read(&version, &item)? {
                Version::Zero => {
                    condition = Some(and_condition(
                        condition,
                        name(model.hash_key.name).attribute_not_exists(),
                    ));
                    update = update.set(name(version.name), one());
                }
                Version::Current { value, .. } => {
                    condition = Some(and_condition(
                        condition,
                        name(version.name).equal(raw_value(value)),
                    ));
                    update = update.add(name(version.name), one());
                }
            }
        }

        if !opts.disable_auto_generated_timestamps {
            let now = self.now();
            if let Some(created_time) = model.created_time {
                if item::stored_time(&created_time, &item)?.is_none() {
                    update = update.set(
                        name(created_time.name),
                        if_not_exists(
                            name(created_time.name),
                            raw_value(item::encode_time(&created_time, now)?),
                        ),
                    );
                }
            }
            if let Some(modified_time) = model.modified_time {
                update = update.set(
                    name(modified_time.name),
                    raw_value(item::encode_time(&modified_time, now)?),
                );
            }
        }

        let mut expression = Builder::new().with_update(update);
        if let Some(condition) = condition {
            expression = expression.with_condition(condition);
        }
        let (condition, _, update, names, values) = expression.build()?.into_parts();

        trace!(
            table_name = %table_name,
            condition = ?condition,
            update = ?update,
            "built UpdateItem request"
        );

        Ok(UpdateItemInput::builder()
            .table_name(table_name)
            .set_key(Some(key))
            .set_condition_expression(condition)
            .set_update_expression(update)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .set_return_values(opts.return_values)
            .set_return_values_on_condition_check_failure(
                opts.return_values_on_condition_check_failure,
            )
            .set_return_consumed_capacity(opts.return_consumed_capacity)
            .set_return_item_collection_metrics(opts.return_item_collection_metrics)
            .build()?)
    }

    #[tracing::instrument(level = "debug", skip_all, err)]
    pub async fn do_update<T: Table + Serialize>(
        &self,
        client: &Client,
        record: &T,
        opts: UpdateOpts,
    ) -> Result<UpdateItemOutput> {
        let input = self.update(record, opts)?;
        update_item_request(client, input)
            .send()
            .await
            .map_err(|err| Error::from(aws_sdk_dynamodb::Error::from(err)))
    }
}

/// Moves a built input into a fluent builder of `client`.
pub fn update_item_request(client: &Client, input: UpdateItemInput) -> UpdateItemFluentBuilder {
    client
        .update_item()
        .set_table_name(input.table_name)
        .set_key(input.key)
        .set_attribute_updates(input.attribute_updates)
        .set_expected(input.expected)
        .set_conditional_operator(input.conditional_operator)
        .set_return_values(input.return_values)
        .set_return_consumed_capacity(input.return_consumed_capacity)
        .set_return_item_collection_metrics(input.return_item_collection_metrics)
        .set_update_expression(input.update_expression)
        .set_condition_expression(input.condition_expression)
        .set_expression_attribute_names(input.expression_attribute_names)
        .set_expression_attribute_values(input.expression_attribute_values)
        .set_return_values_on_condition_check_failure(
            input.return_values_on_condition_check_failure,
        )
}

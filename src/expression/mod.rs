//! DynamoDB expression builders with `#n`/`:n` placeholder substitution.
//!
//! Names are deduplicated across the whole expression, values are not. The
//! condition is rendered first, then the projection, then the update, so the
//! placeholders are numbered in that order.
//!
//! ```
//! use aws_dynamo_fns::expression::{name, value, Builder, OperandBuilder, UpdateBuilder};
//!
//! let expr = Builder::new()
//!     .with_condition(name("version").equal(value(3)))
//!     .with_update(UpdateBuilder::new().set(name("notes"), value("hello")))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(expr.condition(), Some("#0 = :0"));
//! assert_eq!(expr.update(), Some("SET #1 = :1\n"));
//! ```

mod condition;
mod operand;
mod projection;
mod update;

pub use condition::{AttributeType, ConditionBuilder};
pub use operand::{name, raw_value, size, value, NameBuilder, Operand, OperandBuilder, SizeBuilder, ValueBuilder};
pub use projection::{names_list, ProjectionBuilder};
pub use update::{if_not_exists, list_append, minus, plus, SetValue, UpdateBuilder};

use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("unset parameter: {0}")]
    Unset(&'static str),

    #[error("invalid parameter: name {0:?}")]
    InvalidName(String),

    #[error("invalid parameter: value: {0}")]
    InvalidValue(String),

    #[error("IN condition needs between 1 and 100 candidates, got {0}")]
    InCandidates(usize),
}

/// Placeholder allocation shared by every part of one expression.
#[derive(Debug, Default)]
pub(crate) struct Aliases {
    names: Vec<String>,
    values: Vec<AttributeValue>,
}

impl Aliases {
    pub(crate) fn name(&mut self, name: &str) -> String {
        let index = match self.names.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                self.names.push(name.to_string());
                self.names.len() - 1
            }
        };
        format!("#{index}")
    }

    pub(crate) fn value(&mut self, value: AttributeValue) -> String {
        self.values.push(value);
        format!(":{}", self.values.len() - 1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Builder {
    condition: Option<ConditionBuilder>,
    projection: Option<ProjectionBuilder>,
    update: Option<UpdateBuilder>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: ConditionBuilder) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_projection(mut self, projection: ProjectionBuilder) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn with_update(mut self, update: UpdateBuilder) -> Self {
        self.update = Some(update);
        self
    }

    pub fn build(self) -> Result<Expression, ExpressionError> {
        if self.condition.is_none() && self.projection.is_none() && self.update.is_none() {
            return Err(ExpressionError::Unset("Builder"));
        }

        let mut aliases = Aliases::default();
        let condition = self
            .condition
            .map(|condition| condition.render(&mut aliases))
            .transpose()?;
        let projection = self
            .projection
            .map(|projection| projection.render(&mut aliases))
            .transpose()?;
        let update = self
            .update
            .map(|update| update.render(&mut aliases))
            .transpose()?;

        let Aliases { names, values } = aliases;
        Ok(Expression {
            condition,
            projection,
            update,
            names: names
                .into_iter()
                .enumerate()
                .map(|(i, name)| (format!("#{i}"), name))
                .collect(),
            values: values
                .into_iter()
                .enumerate()
                .map(|(i, value)| (format!(":{i}"), value))
                .collect(),
        })
    }
}

/// A rendered expression and its placeholder maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    condition: Option<String>,
    projection: Option<String>,
    update: Option<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Expression {
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    pub fn update(&self) -> Option<&str> {
        self.update.as_deref()
    }

    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    pub fn values(&self) -> &HashMap<String, AttributeValue> {
        &self.values
    }

    /// Splits into `(condition, projection, update, names, values)`; empty
    /// maps become `None` to match the request fields.
    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<String>,
        Option<String>,
        Option<String>,
        Option<HashMap<String, String>>,
        Option<HashMap<String, AttributeValue>>,
    ) {
        let names = (!self.names.is_empty()).then_some(self.names);
        let values = (!self.values.is_empty()).then_some(self.values);
        (self.condition, self.projection, self.update, names, values)
    }
}

#[cfg(test)]
mod test {
    use super::{name, value, Builder, ExpressionError, OperandBuilder, UpdateBuilder};
    use crate::expression::names_list;

    use aws_sdk_dynamodb::types::AttributeValue;
    use std::collections::HashMap;

    #[test]
    fn test_unset_builder() {
        assert_eq!(
            Builder::new().build().unwrap_err(),
            ExpressionError::Unset("Builder")
        );
    }

    #[test]
    fn test_names_shared_across_parts() {
        let expr = Builder::new()
            .with_condition(name("version").equal(value(3)))
            .with_projection(names_list(["id", "version"]))
            .with_update(UpdateBuilder::new().add(name("version"), value(1)))
            .build()
            .unwrap();

        assert_eq!(expr.condition(), Some("#0 = :0"));
        assert_eq!(expr.projection(), Some("#1, #0"));
        assert_eq!(expr.update(), Some("ADD #0 :1\n"));
        assert_eq!(
            expr.names(),
            &HashMap::from([
                ("#0".to_string(), "version".to_string()),
                ("#1".to_string(), "id".to_string()),
            ])
        );
        assert_eq!(
            expr.values(),
            &HashMap::from([
                (":0".to_string(), AttributeValue::N("3".to_string())),
                (":1".to_string(), AttributeValue::N("1".to_string())),
            ])
        );
    }

    #[test]
    fn test_into_parts_drops_empty_maps() {
        let (condition, projection, update, names, values) = Builder::new()
            .with_projection(names_list(["id"]))
            .build()
            .unwrap()
            .into_parts();

        assert!(condition.is_none());
        assert_eq!(projection.as_deref(), Some("#0"));
        assert!(update.is_none());
        assert_eq!(names.unwrap().len(), 1);
        assert!(values.is_none());
    }
}

use super::operand::{raw_value, NameBuilder, Operand, ValueBuilder};
use super::{Aliases, ExpressionError};

use aws_sdk_dynamodb::types::AttributeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparator {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
}

impl Comparator {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
        }
    }
}

/// DynamoDB data type names accepted by `attribute_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    StringSet,
    Number,
    NumberSet,
    Binary,
    BinarySet,
    Boolean,
    Null,
    List,
    Map,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::StringSet => "SS",
            Self::Number => "N",
            Self::NumberSet => "NS",
            Self::Binary => "B",
            Self::BinarySet => "BS",
            Self::Boolean => "BOOL",
            Self::Null => "NULL",
            Self::List => "L",
            Self::Map => "M",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Compare(Operand, Comparator, Operand),
    Between(Operand, Operand, Operand),
    In(Operand, Vec<Operand>),
    AttributeExists(NameBuilder),
    AttributeNotExists(NameBuilder),
    AttributeType(NameBuilder, AttributeType),
    BeginsWith(NameBuilder, ValueBuilder),
    Contains(NameBuilder, Operand),
    And(Vec<ConditionBuilder>),
    Or(Vec<ConditionBuilder>),
    Not(Box<ConditionBuilder>),
}

/// A condition expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionBuilder {
    condition: Condition,
}

impl ConditionBuilder {
    fn new(condition: Condition) -> Self {
        Self { condition }
    }

    pub(crate) fn compare(left: Operand, comparator: Comparator, right: Operand) -> Self {
        Self::new(Condition::Compare(left, comparator, right))
    }

    pub(crate) fn between(operand: Operand, lower: Operand, upper: Operand) -> Self {
        Self::new(Condition::Between(operand, lower, upper))
    }

    pub(crate) fn is_in(operand: Operand, candidates: Vec<Operand>) -> Self {
        Self::new(Condition::In(operand, candidates))
    }

    /// `(self) AND (right)`.
    pub fn and(self, right: ConditionBuilder) -> Self {
        Self::new(Condition::And(vec![self, right]))
    }

    /// `(self) OR (right)`.
    pub fn or(self, right: ConditionBuilder) -> Self {
        Self::new(Condition::Or(vec![self, right]))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(Condition::Not(Box::new(self)))
    }

    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        Ok(match &self.condition {
            Condition::Compare(left, comparator, right) => format!(
                "{} {} {}",
                left.render(aliases)?,
                comparator.as_str(),
                right.render(aliases)?
            ),
            Condition::Between(operand, lower, upper) => format!(
                "{} BETWEEN {} AND {}",
                operand.render(aliases)?,
                lower.render(aliases)?,
                upper.render(aliases)?
            ),
            Condition::In(operand, candidates) => {
                if candidates.is_empty() || candidates.len() > 100 {
                    return Err(ExpressionError::InCandidates(candidates.len()));
                }
                let operand = operand.render(aliases)?;
                let candidates = candidates
                    .iter()
                    .map(|candidate| candidate.render(aliases))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{operand} IN ({})", candidates.join(", "))
            }
            Condition::AttributeExists(name) => {
                format!("attribute_exists ({})", name.render(aliases)?)
            }
            Condition::AttributeNotExists(name) => {
                format!("attribute_not_exists ({})", name.render(aliases)?)
            }
            Condition::AttributeType(name, attribute_type) => format!(
                "attribute_type ({}, {})",
                name.render(aliases)?,
                raw_value(AttributeValue::S(attribute_type.as_str().to_string()))
                    .render(aliases)?
            ),
            Condition::BeginsWith(name, prefix) => format!(
                "begins_with ({}, {})",
                name.render(aliases)?,
                prefix.render(aliases)?
            ),
            Condition::Contains(name, operand) => format!(
                "contains ({}, {})",
                name.render(aliases)?,
                operand.render(aliases)?
            ),
            Condition::And(conditions) => render_joined(conditions, " AND ", aliases)?,
            Condition::Or(conditions) => render_joined(conditions, " OR ", aliases)?,
            Condition::Not(condition) => format!("NOT ({})", condition.render(aliases)?),
        })
    }
}

fn render_joined(
    conditions: &[ConditionBuilder],
    separator: &str,
    aliases: &mut Aliases,
) -> Result<String, ExpressionError> {
    Ok(conditions
        .iter()
        .map(|condition| -> Result<String, ExpressionError> {
            Ok(format!("({})", condition.render(aliases)?))
        })
        .collect::<Result<Vec<_>, _>>()?
        .join(separator))
}

/// Functions only available on attribute paths.
impl NameBuilder {
    pub fn attribute_exists(self) -> ConditionBuilder {
        ConditionBuilder::new(Condition::AttributeExists(self))
    }

    pub fn attribute_not_exists(self) -> ConditionBuilder {
        ConditionBuilder::new(Condition::AttributeNotExists(self))
    }

    pub fn attribute_type(self, attribute_type: AttributeType) -> ConditionBuilder {
        ConditionBuilder::new(Condition::AttributeType(self, attribute_type))
    }

    pub fn begins_with(self, prefix: impl Into<String>) -> ConditionBuilder {
        let prefix = raw_value(AttributeValue::S(prefix.into()));
        ConditionBuilder::new(Condition::BeginsWith(self, prefix))
    }

    pub fn contains(self, operand: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::new(Condition::Contains(self, operand.into()))
    }
}

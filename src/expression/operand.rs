use super::condition::{Comparator, ConditionBuilder};
use super::{Aliases, ExpressionError};

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;

/// An attribute name or document path such as `a.b[1].c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameBuilder {
    path: String,
}

pub fn name(path: impl Into<String>) -> NameBuilder {
    NameBuilder { path: path.into() }
}

impl NameBuilder {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Substitutes each path segment with a name placeholder, keeping list
    /// indexes in place.
    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        let invalid = || ExpressionError::InvalidName(self.path.clone());

        let mut rendered = Vec::new();
        for part in self.path.split('.') {
            let (base, indexes) = part.split_at(part.find('[').unwrap_or(part.len()));
            if base.is_empty() || !valid_indexes(indexes) {
                return Err(invalid());
            }
            rendered.push(format!("{}{indexes}", aliases.name(base)));
        }
        Ok(rendered.join("."))
    }
}

/// Accepts zero or more `[digits]` groups.
fn valid_indexes(mut indexes: &str) -> bool {
    while !indexes.is_empty() {
        let Some(rest) = indexes.strip_prefix('[') else {
            return false;
        };
        let Some((digits, rest)) = rest.split_once(']') else {
            return false;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        indexes = rest;
    }
    true
}

/// A value encoded with `serde_dynamo`; encoding errors surface when the
/// expression is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBuilder {
    value: Result<AttributeValue, String>,
}

pub fn value<T: Serialize>(value: T) -> ValueBuilder {
    ValueBuilder {
        value: serde_dynamo::to_attribute_value(value).map_err(|err| err.to_string()),
    }
}

/// A value that is already an [`AttributeValue`].
pub fn raw_value(value: AttributeValue) -> ValueBuilder {
    ValueBuilder { value: Ok(value) }
}

impl From<AttributeValue> for ValueBuilder {
    fn from(value: AttributeValue) -> Self {
        raw_value(value)
    }
}

impl ValueBuilder {
    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        match &self.value {
            Ok(value) => Ok(aliases.value(value.clone())),
            Err(err) => Err(ExpressionError::InvalidValue(err.clone())),
        }
    }
}

/// The `size` function applied to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBuilder {
    name: NameBuilder,
}

pub fn size(name: NameBuilder) -> SizeBuilder {
    SizeBuilder { name }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Name(NameBuilder),
    Value(ValueBuilder),
    Size(SizeBuilder),
}

impl Operand {
    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        match self {
            Self::Name(name) => name.render(aliases),
            Self::Value(value) => value.render(aliases),
            Self::Size(size) => Ok(format!("size ({})", size.name.render(aliases)?)),
        }
    }
}

impl From<NameBuilder> for Operand {
    fn from(name: NameBuilder) -> Self {
        Self::Name(name)
    }
}

impl From<ValueBuilder> for Operand {
    fn from(value: ValueBuilder) -> Self {
        Self::Value(value)
    }
}

impl From<SizeBuilder> for Operand {
    fn from(size: SizeBuilder) -> Self {
        Self::Size(size)
    }
}

/// Comparison conditions available on every operand.
pub trait OperandBuilder: Into<Operand> {
    fn equal(self, right: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::compare(self.into(), Comparator::Equal, right.into())
    }

    fn not_equal(self, right: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::compare(self.into(), Comparator::NotEqual, right.into())
    }

    fn less_than(self, right: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::compare(self.into(), Comparator::LessThan, right.into())
    }

    fn less_than_equal(self, right: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::compare(self.into(), Comparator::LessThanEqual, right.into())
    }

    fn greater_than(self, right: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::compare(self.into(), Comparator::GreaterThan, right.into())
    }

    fn greater_than_equal(self, right: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::compare(self.into(), Comparator::GreaterThanEqual, right.into())
    }

    fn between(self, lower: impl Into<Operand>, upper: impl Into<Operand>) -> ConditionBuilder {
        ConditionBuilder::between(self.into(), lower.into(), upper.into())
    }

    fn is_in<I>(self, candidates: I) -> ConditionBuilder
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ConditionBuilder::is_in(self.into(), candidates.into_iter().map(Into::into).collect())
    }
}

impl OperandBuilder for NameBuilder {}
impl OperandBuilder for ValueBuilder {}
impl OperandBuilder for SizeBuilder {}
impl OperandBuilder for Operand {}

#[cfg(test)]
mod test {
    use super::{name, value, Aliases, ExpressionError};

    #[test]
    fn test_render_paths() {
        let mut aliases = Aliases::default();
        assert_eq!(name("a.b[1].c").render(&mut aliases).unwrap(), "#0.#1[1].#2");
        assert_eq!(name("b[0][2]").render(&mut aliases).unwrap(), "#1[0][2]");
        assert_eq!(aliases.names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["", "a..b", "[1]", "a[x]", "a[1", "a[]", "a[1]b"] {
            assert_eq!(
                name(path).render(&mut Aliases::default()),
                Err(ExpressionError::InvalidName(path.to_string())),
                "{path}"
            );
        }
    }

    #[test]
    fn test_values_are_not_deduplicated() {
        let mut aliases = Aliases::default();
        assert_eq!(value(1).render(&mut aliases).unwrap(), ":0");
        assert_eq!(value(1).render(&mut aliases).unwrap(), ":1");
        assert_eq!(aliases.values.len(), 2);
    }
}

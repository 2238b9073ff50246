use super::operand::{NameBuilder, Operand, SizeBuilder, ValueBuilder};
use super::{Aliases, ExpressionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mode {
    Add,
    Delete,
    Remove,
    Set,
}

impl Mode {
    const ALL: [Self; 4] = [Self::Add, Self::Delete, Self::Remove, Self::Set];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Delete => "DELETE",
            Self::Remove => "REMOVE",
            Self::Set => "SET",
        }
    }
}

/// Right-hand side of a `SET` action.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    Operand(Operand),
    Plus(Operand, Operand),
    Minus(Operand, Operand),
    ListAppend(Operand, Operand),
    IfNotExists(NameBuilder, Operand),
}

impl From<Operand> for SetValue {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

impl From<NameBuilder> for SetValue {
    fn from(name: NameBuilder) -> Self {
        Self::Operand(name.into())
    }
}

impl From<ValueBuilder> for SetValue {
    fn from(value: ValueBuilder) -> Self {
        Self::Operand(value.into())
    }
}

impl From<SizeBuilder> for SetValue {
    fn from(size: SizeBuilder) -> Self {
        Self::Operand(size.into())
    }
}

pub fn plus(left: impl Into<Operand>, right: impl Into<Operand>) -> SetValue {
    SetValue::Plus(left.into(), right.into())
}

pub fn minus(left: impl Into<Operand>, right: impl Into<Operand>) -> SetValue {
    SetValue::Minus(left.into(), right.into())
}

pub fn list_append(left: impl Into<Operand>, right: impl Into<Operand>) -> SetValue {
    SetValue::ListAppend(left.into(), right.into())
}

pub fn if_not_exists(name: NameBuilder, value: impl Into<Operand>) -> SetValue {
    SetValue::IfNotExists(name, value.into())
}

impl SetValue {
    fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        Ok(match self {
            Self::Operand(operand) => operand.render(aliases)?,
            Self::Plus(left, right) => {
                format!("{} + {}", left.render(aliases)?, right.render(aliases)?)
            }
            Self::Minus(left, right) => {
                format!("{} - {}", left.render(aliases)?, right.render(aliases)?)
            }
            Self::ListAppend(left, right) => format!(
                "list_append({}, {})",
                left.render(aliases)?,
                right.render(aliases)?
            ),
            Self::IfNotExists(name, value) => format!(
                "if_not_exists({}, {})",
                name.render(aliases)?,
                value.render(aliases)?
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Set(NameBuilder, SetValue),
    Add(NameBuilder, ValueBuilder),
    Delete(NameBuilder, ValueBuilder),
    Remove(NameBuilder),
}

impl Action {
    fn mode(&self) -> Mode {
        match self {
            Self::Set(..) => Mode::Set,
            Self::Add(..) => Mode::Add,
            Self::Delete(..) => Mode::Delete,
            Self::Remove(..) => Mode::Remove,
        }
    }

    fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        Ok(match self {
            Self::Set(name, value) => {
                format!("{} = {}", name.render(aliases)?, value.render(aliases)?)
            }
            Self::Add(name, value) | Self::Delete(name, value) => {
                format!("{} {}", name.render(aliases)?, value.render(aliases)?)
            }
            Self::Remove(name) => name.render(aliases)?,
        })
    }
}

/// Update actions, rendered grouped by mode in the order ADD, DELETE,
/// REMOVE, SET.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateBuilder {
    actions: Vec<Action>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn set(mut self, name: NameBuilder, value: impl Into<SetValue>) -> Self {
        self.actions.push(Action::Set(name, value.into()));
        self
    }

    pub fn add(mut self, name: NameBuilder, value: ValueBuilder) -> Self {
        self.actions.push(Action::Add(name, value));
        self
    }

    pub fn delete(mut self, name: NameBuilder, value: ValueBuilder) -> Self {
        self.actions.push(Action::Delete(name, value));
        self
    }

    pub fn remove(mut self, name: NameBuilder) -> Self {
        self.actions.push(Action::Remove(name));
        self
    }

    /// Adds `SET` when `set` is true, otherwise `REMOVE` when `remove` is
    /// true, otherwise nothing.
    ///
    /// | set   | remove | action |
    /// |-------|--------|--------|
    /// | true  | *      | SET    |
    /// | false | true   | REMOVE |
    /// | false | false  | no-op  |
    ///
    /// A PUT-style handler passes `remove = true` so that an empty field is
    /// removed from the item; a PATCH-style handler passes `remove = false` so
    /// that fields the caller did not send are left alone.
    pub fn set_or_remove(
        self,
        set: bool,
        remove: bool,
        name: NameBuilder,
        value: impl Into<SetValue>,
    ) -> Self {
        match (set, remove) {
            (true, _) => self.set(name, value),
            (false, true) => self.remove(name),
            (false, false) => self,
        }
    }

    /// Appends the actions of `other`.
    pub fn merge(mut self, other: UpdateBuilder) -> Self {
        self.actions.extend(other.actions);
        self
    }

    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        if self.actions.is_empty() {
            return Err(ExpressionError::Unset("UpdateBuilder"));
        }

        let mut rendered = String::new();
        for mode in Mode::ALL {
            let actions = self
                .actions
                .iter()
                .filter(|action| action.mode() == mode)
                .map(|action| action.render(aliases))
                .collect::<Result<Vec<_>, _>>()?;
            if !actions.is_empty() {
                rendered.push_str(&format!("{} {}\n", mode.as_str(), actions.join(", ")));
            }
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod test {
    use super::{if_not_exists, list_append, plus, UpdateBuilder};
    use crate::expression::{name, value, Builder, ExpressionError};

    use aws_sdk_dynamodb::types::AttributeValue;
    use std::collections::HashMap;

    #[test]
    fn test_set_or_remove() {
        let expr = Builder::new()
            .with_update(UpdateBuilder::new().set_or_remove(
                true,
                true,
                name("notes"),
                value("hello, world!"),
            ))
            .build()
            .unwrap();

        assert_eq!(expr.update(), Some("SET #0 = :0\n"));
        assert_eq!(
            expr.names(),
            &HashMap::from([("#0".to_string(), "notes".to_string())])
        );
        assert_eq!(
            expr.values(),
            &HashMap::from([(
                ":0".to_string(),
                AttributeValue::S("hello, world!".to_string())
            )])
        );
    }

    #[test]
    fn test_set_or_remove_with_existing_update_expression() {
        let expr = Builder::new()
            .with_update(
                UpdateBuilder::new()
                    .set(name("version"), value(3))
                    .set_or_remove(false, true, name("notes"), value("hello, world!")),
            )
            .build()
            .unwrap();

        assert_eq!(expr.update(), Some("REMOVE #0\nSET #1 = :0\n"));
        assert_eq!(
            expr.names(),
            &HashMap::from([
                ("#0".to_string(), "notes".to_string()),
                ("#1".to_string(), "version".to_string()),
            ])
        );
        assert_eq!(
            expr.values(),
            &HashMap::from([(":0".to_string(), AttributeValue::N("3".to_string()))])
        );
    }

    #[test]
    fn test_set_or_remove_noop() {
        let update = UpdateBuilder::new().set_or_remove(false, false, name("notes"), value("x"));
        assert!(update.is_empty());
        assert_eq!(
            Builder::new().with_update(update).build().unwrap_err(),
            ExpressionError::Unset("UpdateBuilder")
        );
    }

    #[test]
    fn test_set_functions() {
        let expr = Builder::new()
            .with_update(
                UpdateBuilder::new()
                    .set(name("count"), plus(name("count"), value(1)))
                    .set(name("tags"), list_append(name("tags"), value(vec!["a"])))
                    .set(name("created"), if_not_exists(name("created"), value(7)))
                    .delete(name("set"), value(vec!["b"]))
                    .add(name("total"), value(2)),
            )
            .build()
            .unwrap();

        assert_eq!(
            expr.update(),
            Some(
                "ADD #0 :0\nDELETE #1 :1\nSET #2 = #2 + :2, #3 = list_append(#3, :3), #4 = if_not_exists(#4, :4)\n"
            )
        );
    }
}

use super::operand::{name, NameBuilder};
use super::{Aliases, ExpressionError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionBuilder {
    names: Vec<NameBuilder>,
}

/// Projection of the given attribute paths.
pub fn names_list<I>(names: I) -> ProjectionBuilder
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    ProjectionBuilder {
        names: names.into_iter().map(|n| name(n)).collect(),
    }
}

impl ProjectionBuilder {
    pub fn add_names(mut self, names: impl IntoIterator<Item = NameBuilder>) -> Self {
        self.names.extend(names);
        self
    }

    pub(crate) fn render(&self, aliases: &mut Aliases) -> Result<String, ExpressionError> {
        if self.names.is_empty() {
            return Err(ExpressionError::Unset("ProjectionBuilder"));
        }

        Ok(self
            .names
            .iter()
            .map(|name| name.render(aliases))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "))
    }
}

use super::{visit, visit_mut, CriteriaCondition, DeleteQuery, Param, Params, SelectQuery, UpdateQuery, Value};
use crate::{Error, Result};

/// A parsed statement, possibly holding unbound parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectQuery),
    Delete(DeleteQuery),
    Update(UpdateQuery),
}

impl Statement {
    pub fn name(&self) -> &str {
        match self {
            Self::Select(select) => &select.name,
            Self::Delete(delete) => &delete.name,
            Self::Update(update) => &update.name,
        }
    }

    pub fn condition(&self) -> Option<&CriteriaCondition> {
        match self {
            Self::Select(select) => select.condition.as_ref(),
            Self::Delete(delete) => delete.condition.as_ref(),
            Self::Update(update) => update.condition.as_ref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Select(select) if select.count => "COUNT",
            Self::Select(_) => "SELECT",
            Self::Delete(_) => "DELETE",
            Self::Update(_) => "UPDATE",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    /// Placeholders in the statement, in tree order, without duplicates.
    pub fn params(&self) -> Vec<Param> {
        let mut params = vec![];

        visit::for_each_value(self, |value| {
            if let Value::Param(param) = value {
                if !params.contains(param) {
                    params.push(param.clone());
                }
            }
        });

        params
    }

    /// Replaces every placeholder with its bound value.
    ///
    /// When the statement uses any positional placeholder, only positional
    /// values are consulted. Otherwise placeholders bind by name. A
    /// placeholder left without a value is an error.
    pub fn bind(&mut self, params: &Params) -> Result<()> {
        let positional = self.params().iter().any(Param::is_positional);
        let mut unbound = None;

        visit_mut::for_each_value_mut(self, |value| {
            let Value::Param(param) = value else {
                return;
            };

            let bound = if positional && !param.is_positional() {
                None
            } else {
                params.get(param)
            };

            match bound {
                Some(bound) => *value = bound.clone(),
                None => {
                    unbound.get_or_insert_with(|| param.clone());
                }
            }
        });

        match unbound {
            Some(param) => Err(Error::illegal_argument(format!(
                "no value bound for parameter `{param}`"
            ))),
            None => Ok(()),
        }
    }
}

impl From<SelectQuery> for Statement {
    fn from(value: SelectQuery) -> Self {
        Self::Select(value)
    }
}

impl From<DeleteQuery> for Statement {
    fn from(value: DeleteQuery) -> Self {
        Self::Delete(value)
    }
}

impl From<UpdateQuery> for Statement {
    fn from(value: UpdateQuery) -> Self {
        Self::Update(value)
    }
}

use super::{Direction, FunctionExpr};

/// One sort key. A query's sorts apply in insertion order, and that order is
/// the tie-break precedence for cursor pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort {
    /// Column name or rendered function expression
    pub name: String,

    pub direction: Direction,
}

impl Sort {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Asc)
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Desc)
    }

    pub fn by_function(function: &FunctionExpr, direction: Direction) -> Self {
        Self::new(function.to_string(), direction)
    }

    pub fn is_asc(&self) -> bool {
        self.direction.is_asc()
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.name.clone(), self.direction.reverse())
    }
}

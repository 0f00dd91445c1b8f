use crate::{Error, Result};

use std::fmt;

/// A computed expression applied to a field in a condition or sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Upper,
    Lower,
    /// The first `n` characters
    Left(usize),
    /// The last `n` characters
    Right(usize),
    Length,
    Abs,
}

impl Function {
    /// `LEFT(field, length)`. Negative lengths are rejected.
    pub fn left(length: i64) -> Result<Self> {
        Ok(Self::Left(Self::length_arg("LEFT", length)?))
    }

    /// `RIGHT(field, length)`. Negative lengths are rejected.
    pub fn right(length: i64) -> Result<Self> {
        Ok(Self::Right(Self::length_arg("RIGHT", length)?))
    }

    fn length_arg(name: &str, length: i64) -> Result<usize> {
        usize::try_from(length).map_err(|_| {
            Error::illegal_argument(format!(
                "`{name}` length must not be negative, got {length}"
            ))
        })
    }

    /// Canonical upper-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Left(_) => "LEFT",
            Self::Right(_) => "RIGHT",
            Self::Length => "LENGTH",
            Self::Abs => "ABS",
        }
    }

    fn arg(&self) -> Option<usize> {
        match *self {
            Self::Left(n) | Self::Right(n) => Some(n),
            _ => None,
        }
    }
}

/// A function applied to a field: `NAME(field[, arg])`.
///
/// The rendered text is used verbatim as the condition's element name or the
/// sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionExpr {
    pub function: Function,
    pub field: String,
}

impl FunctionExpr {
    pub fn new(function: Function, field: impl Into<String>) -> Self {
        Self {
            function,
            field: field.into(),
        }
    }

    pub fn upper(field: impl Into<String>) -> Self {
        Self::new(Function::Upper, field)
    }

    pub fn lower(field: impl Into<String>) -> Self {
        Self::new(Function::Lower, field)
    }

    pub fn left(field: impl Into<String>, length: i64) -> Result<Self> {
        Ok(Self::new(Function::left(length)?, field))
    }

    pub fn right(field: impl Into<String>, length: i64) -> Result<Self> {
        Ok(Self::new(Function::right(length)?, field))
    }

    pub fn length(field: impl Into<String>) -> Self {
        Self::new(Function::Length, field)
    }

    pub fn abs(field: impl Into<String>) -> Self {
        Self::new(Function::Abs, field)
    }

    /// Parses rendered text such as `LEFT(name, 3)` back into an expression.
    /// Returns `None` when the text is a plain column name.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let open = text.find('(')?;
        let inner = text.strip_suffix(')')?.get(open + 1..)?;

        let mut args = inner.split(',').map(str::trim);
        let field = args.next().filter(|f| !f.is_empty())?;
        let arg = args.next();

        if args.next().is_some() {
            return None;
        }

        let function = match (text[..open].trim().to_ascii_uppercase().as_str(), arg) {
            ("UPPER", None) => Function::Upper,
            ("LOWER", None) => Function::Lower,
            ("LENGTH", None) => Function::Length,
            ("ABS", None) => Function::Abs,
            ("LEFT", Some(n)) => Function::Left(n.parse().ok()?),
            ("RIGHT", Some(n)) => Function::Right(n.parse().ok()?),
            _ => return None,
        };

        Some(Self::new(function, field))
    }
}

impl fmt::Display for FunctionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function.arg() {
            Some(n) => write!(f, "{}({}, {})", self.function.name(), self.field, n),
            None => write!(f, "{}({})", self.function.name(), self.field),
        }
    }
}

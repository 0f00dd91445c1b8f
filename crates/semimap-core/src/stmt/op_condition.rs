use std::fmt;

/// Comparison applied by a leaf condition.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    GreaterThan,
    GreaterEquals,
    LesserThan,
    LesserEquals,
    Like,
    In,
    Between,
    Contains,
    StartsWith,
    EndsWith,
}

impl Operator {
    /// Operators whose value is compared against the field's declared type
    /// and therefore goes through value coercion.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::GreaterThan
                | Self::GreaterEquals
                | Self::LesserThan
                | Self::LesserEquals
                | Self::In
                | Self::Between
        )
    }

    /// Operators that match text patterns.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Like | Self::Contains | Self::StartsWith | Self::EndsWith
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Operator::*;

        match self {
            Equals => "=".fmt(f),
            GreaterThan => ">".fmt(f),
            GreaterEquals => ">=".fmt(f),
            LesserThan => "<".fmt(f),
            LesserEquals => "<=".fmt(f),
            Like => "LIKE".fmt(f),
            In => "IN".fmt(f),
            Between => "BETWEEN".fmt(f),
            Contains => "CONTAINS".fmt(f),
            StartsWith => "STARTS WITH".fmt(f),
            EndsWith => "ENDS WITH".fmt(f),
        }
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

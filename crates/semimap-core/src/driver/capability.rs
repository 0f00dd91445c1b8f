use crate::{
    stmt::{CriteriaCondition, FunctionExpr, Sort, Statement},
    Error, Result,
};

/// What a store can evaluate.
#[derive(Debug)]
pub struct Capability {
    /// Name of the store, used in error messages
    pub database: &'static str,

    /// Names of the functions the store evaluates in conditions and sort
    /// keys, e.g. `UPPER`
    pub functions: &'static [&'static str],

    /// The store can expire entities after a time-to-live
    pub ttl: bool,
}

impl Capability {
    /// Every function that can be expressed in a query.
    pub const ALL_FUNCTIONS: &'static [&'static str] =
        &["UPPER", "LOWER", "LEFT", "RIGHT", "LENGTH", "ABS"];

    /// A store that evaluates no functions and has no time-to-live.
    pub const MINIMAL: Self = Self {
        database: "unknown",
        functions: &[],
        ttl: false,
    };

    pub fn supports_function(&self, function: &FunctionExpr) -> bool {
        self.functions.contains(&function.function.name())
    }

    /// Rejects a statement that uses a function the store cannot evaluate.
    pub fn verify(&self, stmt: &Statement) -> Result<()> {
        if let Some(condition) = stmt.condition() {
            self.verify_condition(condition)?;
        }

        if let Statement::Select(select) = stmt {
            self.verify_sorts(&select.sorts)?;
        }

        Ok(())
    }

    pub fn verify_sorts(&self, sorts: &[Sort]) -> Result<()> {
        sorts.iter().try_for_each(|sort| self.verify_name(&sort.name))
    }

    pub fn verify_condition(&self, condition: &CriteriaCondition) -> Result<()> {
        let mut ret = Ok(());

        condition.for_each_compare(&mut |compare| {
            if ret.is_ok() {
                ret = self.verify_name(&compare.element.name);
            }
        });

        ret
    }

    fn verify_name(&self, name: &str) -> Result<()> {
        match FunctionExpr::parse(name) {
            Some(function) if !self.supports_function(&function) => Err(
                Error::unsupported_function(&function.function, self.database),
            ),
            _ => Ok(()),
        }
    }
}

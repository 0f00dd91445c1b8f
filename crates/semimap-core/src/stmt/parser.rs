use super::Statement;
use crate::Result;

use std::fmt::Debug;

/// Turns query text into a statement skeleton.
///
/// The parser is provided by the caller. It recognizes
/// `FROM <entity> [WHERE ..] [ORDER BY ..]`, `SELECT count(this) FROM ..`,
/// `DELETE FROM <entity> WHERE ..` and `UPDATE <entity> SET .. WHERE ..`,
/// leaving `:name` and `?N` placeholders as [`Value::Param`](super::Value::Param).
pub trait QueryParser: Debug + Send + Sync + 'static {
    fn parse(&self, query: &str) -> Result<Statement>;
}

mod communication_entity;
pub use communication_entity::CommunicationEntity;

mod condition;
pub use condition::CriteriaCondition;

mod condition_and;
pub use condition_and::ConditionAnd;

mod condition_compare;
pub use condition_compare::ConditionCompare;

mod condition_not;
pub use condition_not::ConditionNot;

mod condition_or;
pub use condition_or::ConditionOr;

mod delete;
pub use delete::DeleteQuery;

mod direction;
pub use direction::Direction;

mod element;
pub use element::Element;

mod entity_stream;
pub use entity_stream::EntityStream;

mod function;
pub use function::{Function, FunctionExpr};

mod op_condition;
pub use op_condition::Operator;

mod page;
pub use page::{Cursor, CursoredPage, PageMode, PageRequest};

mod param;
pub use param::{Param, Params};

mod parser;
pub use parser::QueryParser;

mod select;
pub use select::SelectQuery;

mod sort;
pub use sort::Sort;

mod statement;
pub use statement::Statement;

mod ty;
pub use ty::Type;

mod update;
pub use update::UpdateQuery;

mod value;
pub use value::Value;

mod value_cmp;

mod value_coerce;

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;

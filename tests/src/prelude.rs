//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

pub use crate::fixtures::*;
pub use crate::{assert_err, assert_eq_unordered, setup, setup_with, ExecLog, MemoryDriver, Op};

pub use semimap::{
    stmt::{
        CommunicationEntity, CriteriaCondition, Direction, Element, PageRequest, SelectQuery,
        Sort, Value,
    },
    Config, Template,
};

//! Evaluates criteria conditions and sorts against stored entities the way a
//! document store would.

use semimap::stmt::{
    CommunicationEntity, CriteriaCondition, Function, FunctionExpr, Operator, Sort, Value,
};

use std::cmp::Ordering;

/// Reads a column, or a function applied to one, from `entity`.
pub fn column(entity: &CommunicationEntity, name: &str) -> Value {
    match FunctionExpr::parse(name) {
        Some(function) => {
            let value = entity.find_path(&function.field).cloned().unwrap_or_default();
            apply(&function.function, value)
        }
        None => entity.find_path(name).cloned().unwrap_or_default(),
    }
}

fn apply(function: &Function, value: Value) -> Value {
    match (function, value) {
        (Function::Upper, Value::String(s)) => Value::String(s.to_uppercase()),
        (Function::Lower, Value::String(s)) => Value::String(s.to_lowercase()),
        (Function::Left(n), Value::String(s)) => Value::String(s.chars().take(*n).collect()),
        (Function::Right(n), Value::String(s)) => {
            let skip = s.chars().count().saturating_sub(*n);
            Value::String(s.chars().skip(skip).collect())
        }
        (Function::Length, Value::String(s)) => Value::I64(s.chars().count() as i64),
        (Function::Abs, value) => match (value.as_i64(), value.as_f64()) {
            (Some(v), _) => Value::I64(v.abs()),
            (None, Some(v)) => Value::F64(v.abs()),
            _ => value,
        },
        _ => Value::Null,
    }
}

pub fn matches(entity: &CommunicationEntity, condition: &CriteriaCondition) -> bool {
    match condition {
        CriteriaCondition::Compare(compare) => {
            let actual = column(entity, &compare.element.name);
            compare_op(compare.op, &actual, &compare.element.value)
        }
        CriteriaCondition::And(and) => and.operands.iter().all(|c| matches(entity, c)),
        CriteriaCondition::Or(or) => or.operands.iter().any(|c| matches(entity, c)),
        CriteriaCondition::Not(not) => !matches(entity, &not.condition),
    }
}

fn compare_op(op: Operator, actual: &Value, expected: &Value) -> bool {
    let ordering = || actual.compare(expected);

    match op {
        Operator::Equals => actual.loose_eq(expected),
        Operator::GreaterThan => !actual.is_null() && ordering() == Some(Ordering::Greater),
        Operator::GreaterEquals => {
            !actual.is_null() && matches!(ordering(), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LesserThan => !actual.is_null() && ordering() == Some(Ordering::Less),
        Operator::LesserEquals => {
            !actual.is_null() && matches!(ordering(), Some(Ordering::Less | Ordering::Equal))
        }
        Operator::In => expected
            .as_list()
            .is_some_and(|items| items.iter().any(|item| actual.loose_eq(item))),
        Operator::Between => match expected.as_list() {
            Some([low, high]) => {
                !actual.is_null()
                    && matches!(actual.compare(low), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(actual.compare(high), Some(Ordering::Less | Ordering::Equal))
            }
            _ => false,
        },
        Operator::Like => match (actual.as_str(), expected.as_str()) {
            (Some(actual), Some(pattern)) => like(actual, pattern),
            _ => false,
        },
        Operator::Contains => match (actual, expected.as_str()) {
            (Value::String(actual), Some(needle)) => actual.contains(needle),
            (Value::List(items), _) => items.iter().any(|item| item.loose_eq(expected)),
            _ => false,
        },
        Operator::StartsWith => match (actual.as_str(), expected.as_str()) {
            (Some(actual), Some(prefix)) => actual.starts_with(prefix),
            _ => false,
        },
        Operator::EndsWith => match (actual.as_str(), expected.as_str()) {
            (Some(actual), Some(suffix)) => actual.ends_with(suffix),
            _ => false,
        },
    }
}

/// SQL `LIKE` with `%` and `_` wildcards.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    fn go(text: &[char], pattern: &[char]) -> bool {
        match pattern.split_first() {
            None => text.is_empty(),
            Some(('%', rest)) => (0..=text.len()).any(|i| go(&text[i..], rest)),
            Some(('_', rest)) => !text.is_empty() && go(&text[1..], rest),
            Some((c, rest)) => text.first() == Some(c) && go(&text[1..], rest),
        }
    }

    go(&text, &pattern)
}

/// Orders entities by the sort keys, first key first.
pub fn order(a: &CommunicationEntity, b: &CommunicationEntity, sorts: &[Sort]) -> Ordering {
    for sort in sorts {
        let ordering = column(a, &sort.name)
            .compare(&column(b, &sort.name))
            .unwrap_or(Ordering::Equal);

        let ordering = if sort.is_asc() {
            ordering
        } else {
            ordering.reverse()
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards() {
        assert!(like("Ada Lovelace", "Ada%"));
        assert!(like("Ada", "A_a"));
        assert!(!like("Ada", "B%"));
        assert!(like("", "%"));
    }

    #[test]
    fn functions_apply_to_columns() {
        let mut entity = CommunicationEntity::new("Person");
        entity.add_value("name", "Ada");

        assert_eq!(column(&entity, "UPPER(name)"), Value::from("ADA"));
        assert_eq!(column(&entity, "LEFT(name, 2)"), Value::from("Ad"));
        assert_eq!(column(&entity, "LENGTH(name)"), Value::I64(3));
        assert_eq!(column(&entity, "missing"), Value::Null);
    }
}

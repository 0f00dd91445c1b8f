#![allow(unused_variables)]

use super::*;

pub trait Visit {
    fn visit_condition(&mut self, i: &CriteriaCondition) {
        visit_condition(self, i);
    }

    fn visit_condition_compare(&mut self, i: &ConditionCompare) {
        visit_condition_compare(self, i);
    }

    fn visit_delete(&mut self, i: &DeleteQuery) {
        visit_delete(self, i);
    }

    fn visit_element(&mut self, i: &Element) {
        visit_element(self, i);
    }

    fn visit_select(&mut self, i: &SelectQuery) {
        visit_select(self, i);
    }

    fn visit_sort(&mut self, i: &Sort) {}

    fn visit_statement(&mut self, i: &Statement) {
        visit_statement(self, i);
    }

    fn visit_update(&mut self, i: &UpdateQuery) {
        visit_update(self, i);
    }

    fn visit_value(&mut self, i: &Value) {
        visit_value(self, i);
    }
}

pub fn visit_condition<V>(v: &mut V, node: &CriteriaCondition)
where
    V: Visit + ?Sized,
{
    match node {
        CriteriaCondition::Compare(compare) => v.visit_condition_compare(compare),
        CriteriaCondition::And(and) => {
            for operand in and {
                v.visit_condition(operand);
            }
        }
        CriteriaCondition::Or(or) => {
            for operand in or {
                v.visit_condition(operand);
            }
        }
        CriteriaCondition::Not(not) => v.visit_condition(&not.condition),
    }
}

pub fn visit_condition_compare<V>(v: &mut V, node: &ConditionCompare)
where
    V: Visit + ?Sized,
{
    v.visit_element(&node.element);
}

pub fn visit_delete<V>(v: &mut V, node: &DeleteQuery)
where
    V: Visit + ?Sized,
{
    if let Some(condition) = &node.condition {
        v.visit_condition(condition);
    }
}

pub fn visit_element<V>(v: &mut V, node: &Element)
where
    V: Visit + ?Sized,
{
    v.visit_value(&node.value);
}

pub fn visit_select<V>(v: &mut V, node: &SelectQuery)
where
    V: Visit + ?Sized,
{
    if let Some(condition) = &node.condition {
        v.visit_condition(condition);
    }

    for sort in &node.sorts {
        v.visit_sort(sort);
    }
}

pub fn visit_statement<V>(v: &mut V, node: &Statement)
where
    V: Visit + ?Sized,
{
    match node {
        Statement::Select(select) => v.visit_select(select),
        Statement::Delete(delete) => v.visit_delete(delete),
        Statement::Update(update) => v.visit_update(update),
    }
}

pub fn visit_update<V>(v: &mut V, node: &UpdateQuery)
where
    V: Visit + ?Sized,
{
    for element in &node.set {
        v.visit_element(element);
    }

    if let Some(condition) = &node.condition {
        v.visit_condition(condition);
    }
}

pub fn visit_value<V>(v: &mut V, node: &Value)
where
    V: Visit + ?Sized,
{
    match node {
        Value::List(items) => {
            for item in items {
                v.visit_value(item);
            }
        }
        Value::Map(map) => {
            for value in map.values() {
                v.visit_value(value);
            }
        }
        Value::Entity(elements) => {
            for element in elements {
                v.visit_element(element);
            }
        }
        _ => {}
    }
}

/// Calls `f` on every value reachable from the statement.
pub fn for_each_value<F>(node: &Statement, f: F)
where
    F: FnMut(&Value),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> Visit for ForEach<F>
    where
        F: FnMut(&Value),
    {
        fn visit_value(&mut self, node: &Value) {
            visit_value(self, node);
            (self.f)(node);
        }
    }

    ForEach { f }.visit_statement(node);
}

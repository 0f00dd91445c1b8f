#![allow(unused_variables)]

use super::*;

pub trait VisitMut {
    fn visit_condition_mut(&mut self, i: &mut CriteriaCondition) {
        visit_condition_mut(self, i);
    }

    fn visit_condition_compare_mut(&mut self, i: &mut ConditionCompare) {
        visit_condition_compare_mut(self, i);
    }

    fn visit_delete_mut(&mut self, i: &mut DeleteQuery) {
        visit_delete_mut(self, i);
    }

    fn visit_element_mut(&mut self, i: &mut Element) {
        visit_element_mut(self, i);
    }

    fn visit_select_mut(&mut self, i: &mut SelectQuery) {
        visit_select_mut(self, i);
    }

    fn visit_statement_mut(&mut self, i: &mut Statement) {
        visit_statement_mut(self, i);
    }

    fn visit_update_mut(&mut self, i: &mut UpdateQuery) {
        visit_update_mut(self, i);
    }

    fn visit_value_mut(&mut self, i: &mut Value) {
        visit_value_mut(self, i);
    }
}

pub fn visit_condition_mut<V>(v: &mut V, node: &mut CriteriaCondition)
where
    V: VisitMut + ?Sized,
{
    match node {
        CriteriaCondition::Compare(compare) => v.visit_condition_compare_mut(compare),
        CriteriaCondition::And(and) => {
            for operand in &mut and.operands {
                v.visit_condition_mut(operand);
            }
        }
        CriteriaCondition::Or(or) => {
            for operand in &mut or.operands {
                v.visit_condition_mut(operand);
            }
        }
        CriteriaCondition::Not(not) => v.visit_condition_mut(&mut not.condition),
    }
}

pub fn visit_condition_compare_mut<V>(v: &mut V, node: &mut ConditionCompare)
where
    V: VisitMut + ?Sized,
{
    v.visit_element_mut(&mut node.element);
}

pub fn visit_delete_mut<V>(v: &mut V, node: &mut DeleteQuery)
where
    V: VisitMut + ?Sized,
{
    if let Some(condition) = &mut node.condition {
        v.visit_condition_mut(condition);
    }
}

pub fn visit_element_mut<V>(v: &mut V, node: &mut Element)
where
    V: VisitMut + ?Sized,
{
    v.visit_value_mut(&mut node.value);
}

pub fn visit_select_mut<V>(v: &mut V, node: &mut SelectQuery)
where
    V: VisitMut + ?Sized,
{
    if let Some(condition) = &mut node.condition {
        v.visit_condition_mut(condition);
    }
}

pub fn visit_statement_mut<V>(v: &mut V, node: &mut Statement)
where
    V: VisitMut + ?Sized,
{
    match node {
        Statement::Select(select) => v.visit_select_mut(select),
        Statement::Delete(delete) => v.visit_delete_mut(delete),
        Statement::Update(update) => v.visit_update_mut(update),
    }
}

pub fn visit_update_mut<V>(v: &mut V, node: &mut UpdateQuery)
where
    V: VisitMut + ?Sized,
{
    for element in &mut node.set {
        v.visit_element_mut(element);
    }

    if let Some(condition) = &mut node.condition {
        v.visit_condition_mut(condition);
    }
}

pub fn visit_value_mut<V>(v: &mut V, node: &mut Value)
where
    V: VisitMut + ?Sized,
{
    match node {
        Value::List(items) => {
            for item in items {
                v.visit_value_mut(item);
            }
        }
        Value::Map(map) => {
            for value in map.values_mut() {
                v.visit_value_mut(value);
            }
        }
        Value::Entity(elements) => {
            for element in elements {
                v.visit_element_mut(element);
            }
        }
        _ => {}
    }
}

/// Calls `f` on every value reachable from the statement, children first.
pub fn for_each_value_mut<F>(node: &mut Statement, f: F)
where
    F: FnMut(&mut Value),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> VisitMut for ForEach<F>
    where
        F: FnMut(&mut Value),
    {
        fn visit_value_mut(&mut self, node: &mut Value) {
            visit_value_mut(self, node);
            (self.f)(node);
        }
    }

    ForEach { f }.visit_statement_mut(node);
}

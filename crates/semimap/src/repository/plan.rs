use super::{
    method_name::{self, Action, MethodName},
    RepositoryMethod, ResultKind,
};
use crate::{
    mapper::{Field, Resolver, Where},
    Template,
};

use semimap_core::{
    schema::{Attribute, EntityMetadata, FieldMetadata},
    stmt::{
        CriteriaCondition, DeleteQuery, Direction, Operator, PageRequest, SelectQuery, Statement,
        UpdateQuery,
    },
    Error, Result,
};

use tracing::debug;

/// The single storage operation a method call turns into.
#[derive(Debug)]
pub(crate) enum Plan {
    Select {
        query: SelectQuery,
        shape: Shape,
        projection: Vec<Projected>,
    },
    Count(SelectQuery),
    Exists(SelectQuery),
    Delete(DeleteQuery),
    Update(UpdateQuery),
    Write(Write),
}

#[derive(Debug)]
pub(crate) enum Shape {
    Many,
    Single,
    Page(PageRequest),
    Cursor(PageRequest),
}

/// A field returned by a projection.
#[derive(Debug)]
pub(crate) struct Projected {
    pub(crate) column: String,
    pub(crate) field: FieldMetadata,
}

/// Writes of whole entities passed as arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Write {
    Save,
    SaveAll,
    Insert,
    InsertAll,
    Update,
    UpdateAll,
    Delete,
    DeleteAll,
}

/// Picks how the method runs: a declared query first, then a query named
/// by convention, then restriction arguments, then the built-in methods.
pub(crate) fn plan(
    template: &Template,
    metadata: &EntityMetadata,
    method: &RepositoryMethod,
) -> Result<Plan> {
    let resolver = template.resolver(metadata);

    if let Some(text) = &method.query {
        debug!(method = %method.name, "declared query");
        return declared(template, &resolver, method, text);
    }

    if let Some(name) = MethodName::parse(&method.name)? {
        debug!(method = %method.name, action = ?name.action, "query method");
        return convention(&resolver, method, name);
    }

    if method.restrictions().next().is_some() {
        let action = method_name::action(&method.name).unwrap_or(Action::Find);
        debug!(method = %method.name, action = ?action, "restriction");
        return restricted(&resolver, method, action);
    }

    debug!(method = %method.name, "built-in method");
    builtin(&resolver, method)
}

fn declared(
    template: &Template,
    resolver: &Resolver<'_>,
    method: &RepositoryMethod,
    text: &str,
) -> Result<Plan> {
    let mut query = template.query(text)?;

    for (i, (name, value)) in method.values().enumerate() {
        let value = value.clone().into_value()?;

        if let Some(name) = name {
            query = query.bind_named(name, value.clone());
        }

        query = query.bind(i + 1, value);
    }

    match query.into_statement()? {
        Statement::Select(mut query) => {
            for condition in restrictions(resolver, method)? {
                query.and(condition);
            }

            if query.count {
                Ok(Plan::Count(query))
            } else {
                finish_select(resolver, method, query, None)
            }
        }
        Statement::Delete(mut query) => {
            for condition in restrictions(resolver, method)? {
                query.and(condition);
            }

            Ok(Plan::Delete(query))
        }
        Statement::Update(query) => Ok(Plan::Update(query)),
    }
}

fn convention(resolver: &Resolver<'_>, method: &RepositoryMethod, name: MethodName) -> Result<Plan> {
    let expected: usize = name
        .parts
        .iter()
        .map(|part| match part.op {
            Operator::Between => 2,
            _ => 1,
        })
        .sum();

    let values: Vec<&Attribute> = method.values().map(|(_, value)| value).collect();

    if values.len() != expected {
        return Err(Error::illegal_argument(format!(
            "`{}` takes {expected} argument(s), got {}",
            method.name,
            values.len()
        )));
    }

    let mut filter = Where::default();
    let mut values = values.into_iter().cloned();

    for part in &name.parts {
        if part.and {
            filter.and(part.field.as_str());
        } else {
            filter.or(part.field.as_str());
        }

        if part.negate {
            filter.not();
        }

        // Arity was checked above.
        let mut next = || values.next().unwrap_or_default();

        match part.op {
            Operator::Between => {
                let low = next();
                let high = next();
                filter.between(low, high);
            }
            op => filter.compare(op, next()),
        }
    }

    for restriction in method.restrictions() {
        filter.and_restriction(restriction.clone());
    }

    let condition = filter.build(resolver)?;
    query_for(resolver, method, name.action, condition, name.first, name.sorts)
}

fn restricted(
    resolver: &Resolver<'_>,
    method: &RepositoryMethod,
    action: Action,
) -> Result<Plan> {
    let mut filter = Where::default();

    for restriction in method.restrictions() {
        filter.and_restriction(restriction.clone());
    }

    let condition = filter.build(resolver)?;
    query_for(resolver, method, action, condition, None, vec![])
}

fn builtin(resolver: &Resolver<'_>, method: &RepositoryMethod) -> Result<Plan> {
    let has_values = method.values().next().is_some();

    let write = match method.name.as_str() {
        "save" => Write::Save,
        "saveAll" => Write::SaveAll,
        "insert" => Write::Insert,
        "insertAll" => Write::InsertAll,
        "update" => Write::Update,
        "updateAll" => Write::UpdateAll,
        "delete" => Write::Delete,
        "deleteAll" if has_values => Write::DeleteAll,
        "deleteAll" => return restricted(resolver, method, Action::Delete),
        "findAll" => return restricted(resolver, method, Action::Find),
        "count" | "countAll" => return restricted(resolver, method, Action::Count),
        _ => {
            return Err(Error::unsupported_operation(format!(
                "`{}` is not a repository operation",
                method.name
            )))
        }
    };

    Ok(Plan::Write(write))
}

fn query_for(
    resolver: &Resolver<'_>,
    method: &RepositoryMethod,
    action: Action,
    condition: Option<CriteriaCondition>,
    first: Option<u64>,
    sorts: Vec<(String, Direction)>,
) -> Result<Plan> {
    let name = resolver.metadata().name();

    match action {
        Action::Find => {
            let mut query = SelectQuery::new(name);
            query.condition = condition;

            for (field, direction) in sorts {
                query.sorts.push(resolver.sort(&Field::Name(field), direction)?);
            }

            finish_select(resolver, method, query, first)
        }
        Action::Count => {
            let mut query = SelectQuery::new(name);
            query.condition = condition;
            Ok(Plan::Count(query))
        }
        Action::Exists => {
            let mut query = SelectQuery::new(name);
            query.condition = condition;
            Ok(Plan::Exists(query))
        }
        Action::Delete => {
            let mut query = DeleteQuery::new(name);
            query.condition = condition;
            Ok(Plan::Delete(query))
        }
    }
}

/// Applies argument sorts, the smallest declared limit, the projection and
/// the result shape.
fn finish_select(
    resolver: &Resolver<'_>,
    method: &RepositoryMethod,
    mut query: SelectQuery,
    first: Option<u64>,
) -> Result<Plan> {
    for (field, direction) in method.sorts() {
        query.sorts.push(resolver.sort(&Field::from(field), direction)?);
    }

    query.limit = [
        Some(query.limit).filter(|limit| *limit > 0),
        first,
        method.first,
        method.limit_argument(),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(0);

    let projection = method
        .projection
        .iter()
        .map(|path| {
            Ok(Projected {
                column: resolver.column(path)?,
                field: resolver.field(path)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    query.columns = projection.iter().map(|p| p.column.clone()).collect();

    let shape = match (method.result, method.page_request()) {
        (ResultKind::Single, _) => Shape::Single,
        (ResultKind::Many, Some(request)) if request.is_cursor() => Shape::Cursor(request.clone()),
        (ResultKind::Many, Some(request)) => Shape::Page(request.clone()),
        (ResultKind::Many, None) => Shape::Many,
    };

    if !projection.is_empty() && matches!(shape, Shape::Page(_) | Shape::Cursor(_)) {
        return Err(Error::illegal_argument(format!(
            "`{}` cannot combine a projection with pagination",
            method.name
        )));
    }

    Ok(Plan::Select {
        query,
        shape,
        projection,
    })
}

fn restrictions(resolver: &Resolver<'_>, method: &RepositoryMethod) -> Result<Vec<CriteriaCondition>> {
    let mut ret = vec![];

    for restriction in method.restrictions() {
        ret.extend(resolver.restriction(restriction)?);
    }

    Ok(ret)
}

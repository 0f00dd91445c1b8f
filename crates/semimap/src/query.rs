use crate::{mapper::Resolver, ModelStream, Template};

use semimap_core::{
    schema::Mapped,
    stmt::{visit_mut, Element, Params, Statement, Value, VisitMut},
    Error, Result,
};

/// A statement parsed from query text, waiting for its parameters.
///
/// ```ignore
/// let people: Vec<Person> = template
///     .query("FROM Person WHERE age > :age ORDER BY name")?
///     .bind_named("age", 30)
///     .result()
///     .await?;
/// ```
#[derive(Debug)]
pub struct TextQuery<'a> {
    template: &'a Template,
    statement: Statement,
    params: Params,
}

impl<'a> TextQuery<'a> {
    pub(crate) fn new(template: &'a Template, text: &str) -> Result<Self> {
        let parser = template
            .parser()
            .ok_or_else(|| Error::unsupported_operation("no query parser is configured"))?;

        let mut statement = parser.parse(text)?;
        map_to_columns(template, &mut statement)?;

        Ok(Self {
            template,
            statement,
            params: Params::new(),
        })
    }

    /// Binds the 1-based positional parameter `?position`.
    pub fn bind(mut self, position: usize, value: impl Into<Value>) -> Self {
        self.params.bind(position, value);
        self
    }

    /// Binds the named parameter `:name`.
    pub fn bind_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.bind_named(name, value);
        self
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// The statement with every parameter replaced by its value.
    pub fn into_statement(self) -> Result<Statement> {
        let mut statement = self.statement;
        statement.bind(&self.params)?;
        Ok(statement)
    }

    pub async fn result<M: Mapped>(self) -> Result<Vec<M>> {
        self.stream::<M>().await?.collect().await
    }

    pub async fn stream<M: Mapped>(self) -> Result<ModelStream<M>> {
        let template = self.template;

        match self.into_statement()? {
            Statement::Select(query) if !query.count => template.stream(query).await,
            statement => Err(mismatch("result", &statement)),
        }
    }

    pub async fn single_result<M: Mapped>(self) -> Result<Option<M>> {
        let template = self.template;

        match self.into_statement()? {
            Statement::Select(query) if !query.count => template.single(query).await,
            statement => Err(mismatch("single_result", &statement)),
        }
    }

    pub async fn count(self) -> Result<u64> {
        let template = self.template;

        match self.into_statement()? {
            Statement::Select(query) => template.count(query).await,
            statement => Err(mismatch("count", &statement)),
        }
    }

    /// Runs a `DELETE` or `UPDATE`. Returns the number of updated entities,
    /// `0` for deletes.
    pub async fn execute_update(self) -> Result<u64> {
        let template = self.template;

        match self.into_statement()? {
            Statement::Delete(query) => template.delete_where(query).await.map(|_| 0),
            Statement::Update(query) => template.update_where(query).await,
            statement => Err(mismatch("execute_update", &statement)),
        }
    }
}

fn mismatch(operation: &str, statement: &Statement) -> Error {
    Error::unsupported_operation(format!(
        "`{operation}` is not supported on a {} query",
        statement.kind()
    ))
}

/// Rewrites entity and field names used in the text into their stored
/// names, and seeds subtype queries with their discriminator.
fn map_to_columns(template: &Template, statement: &mut Statement) -> Result<()> {
    let metadata = template
        .registry()
        .find_by_name(statement.name())
        .ok_or_else(|| Error::class_information_not_found(statement.name()))?;

    let resolver = template.resolver(&metadata);
    ColumnNames(&resolver).visit_statement_mut(statement);

    let (name, condition) = match statement {
        Statement::Select(query) => {
            for sort in &mut query.sorts {
                if let Ok(column) = resolver.column(&sort.name) {
                    sort.name = column;
                }
            }

            (&mut query.name, &mut query.condition)
        }
        Statement::Delete(query) => (&mut query.name, &mut query.condition),
        Statement::Update(query) => (&mut query.name, &mut query.condition),
    };

    *name = metadata.name().to_string();

    if let Some(discriminator) = resolver.discriminator() {
        *condition = Some(match condition.take() {
            Some(existing) => discriminator.and(existing),
            None => discriminator,
        });
    }

    Ok(())
}

/// Field paths that resolve are renamed to their column. Anything else,
/// such as a function call, is left as written.
struct ColumnNames<'a, 'b>(&'a Resolver<'b>);

impl VisitMut for ColumnNames<'_, '_> {
    fn visit_element_mut(&mut self, i: &mut Element) {
        if let Ok(column) = self.0.column(&i.name) {
            i.name = column;
        }

        visit_mut::visit_element_mut(self, i);
    }
}

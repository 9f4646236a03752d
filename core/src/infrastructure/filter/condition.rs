//! Translation of search filters into sea-orm conditions.
//!
//! The search bar only describes what to filter on; this adapter turns that
//! description into a `Condition` the relational layer can execute.

use sea_orm::{
    Condition, EntityTrait, QueryFilter, Select,
    prelude::Expr,
    sea_query::{
        Alias, Asterisk, PostgresQueryBuilder, Query, QueryStatementWriter, SimpleExpr,
        extension::postgres::PgExpr,
    },
};
use tracing::debug;

use crate::domain::{
    field_spec::errors::ConfigurationError,
    filter::value_objects::{FilterExpression, Lookup, Predicate},
    search_bar::ports::{ParamSource, SearchBarView},
};

/// Builds an AND condition with one clause per predicate. An empty
/// expression gives an empty `Condition::all()`.
pub fn to_condition(expression: &FilterExpression) -> Condition {
    expression
        .predicates
        .iter()
        .fold(Condition::all(), |condition, predicate| {
            condition.add(predicate_expr(predicate))
        })
}

fn predicate_expr(predicate: &Predicate) -> SimpleExpr {
    let (column, lookup) = predicate.column_and_lookup();
    let column = Expr::col(Alias::new(column));
    let value = predicate.value.clone();

    match lookup {
        Lookup::Exact => column.eq(value),
        Lookup::IExact => column.ilike(escape_like(&value)),
        Lookup::Contains => column.like(format!("%{}%", escape_like(&value))),
        Lookup::IContains => column.ilike(format!("%{}%", escape_like(&value))),
        Lookup::StartsWith => column.like(format!("{}%", escape_like(&value))),
        Lookup::IStartsWith => column.ilike(format!("{}%", escape_like(&value))),
        Lookup::EndsWith => column.like(format!("%{}", escape_like(&value))),
        Lookup::IEndsWith => column.ilike(format!("%{}", escape_like(&value))),
        Lookup::Gt => column.gt(value),
        Lookup::Gte => column.gte(value),
        Lookup::Lt => column.lt(value),
        Lookup::Lte => column.lte(value),
    }
}

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Narrows a select with the expression. Empty expressions leave it as is.
pub fn apply_to<E: EntityTrait>(select: Select<E>, expression: &FilterExpression) -> Select<E> {
    if expression.is_empty() {
        return select;
    }
    select.filter(to_condition(expression))
}

/// Narrows a select with the view's search bar when the search is valid.
pub fn filter_select<V, P, E>(
    view: &V,
    select: Select<E>,
    params: &P,
) -> Result<Select<E>, ConfigurationError>
where
    V: SearchBarView,
    P: ParamSource + ?Sized,
    E: EntityTrait,
{
    match view.search_filters(params)? {
        Some(expression) => {
            debug!(filter = %expression, "applying search filters");
            Ok(apply_to(select, &expression))
        }
        None => Ok(select),
    }
}

/// Postgres `SELECT *` over `table` restricted by the expression, with the
/// values inlined. Meant for previews and logs, not for execution.
pub fn preview_sql(table: &str, expression: &FilterExpression) -> String {
    let mut query = Query::select();
    query.column(Asterisk).from(Alias::new(table));
    if !expression.is_empty() {
        query.cond_where(to_condition(expression));
    }
    query.to_string(PostgresQueryBuilder)
}

use super::prelude::*;

/// Renders `value` as an SQL literal. Strings and characters are single
/// quoted with embedded quotes doubled.
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Str(s) => quote(s),
        Value::Char(c) => quote(&c.to_string()),
        other => other.to_string(),
    }
}

/// Renders an `insert into` statement for one tuple.
///
/// ```
/// use tabula::{tools::sql::insert_statement, Value};
///
/// let columns = ["name".to_owned(), "presNo".to_owned()];
/// let stmt = insert_statement("studio", &columns, &[Value::from("Fox"), Value::Int(7777)]);
/// assert_eq!(stmt, "insert into studio (name, presNo) VALUES ('Fox', 7777);");
/// ```
pub fn insert_statement(table: &str, columns: &[String], tuple: &[Value]) -> String {
    let values: Vec<_> = tuple.iter().map(sql_literal).collect();
    format!(
        "insert into {} ({}) VALUES ({});",
        table,
        columns.join(", "),
        values.join(", ")
    )
}

/// Renders one statement per tuple.
pub fn insert_statements<'a>(
    table: &'a str,
    columns: &'a [String],
    tuples: &'a [Tuple],
) -> impl Iterator<Item = String> + 'a {
    tuples
        .iter()
        .map(move |tuple| insert_statement(table, columns, tuple))
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

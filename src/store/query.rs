use sqlx::{MySql, QueryBuilder};

use crate::model::{ResultFilter, StoredResult};

/// Escapes `%`, `_` and `\` for use inside a MySQL `LIKE` pattern.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Builds the results query. The name condition is a coarse `LIKE` pre-filter.
pub(super) fn select_results(filter: &ResultFilter) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(
        r#"
        SELECT id, employee_name, city_name, year, avg_salary, contribution_base, company_fee, created_at
        FROM results
        WHERE 1 = 1
        "#,
    );

    if let Some(city) = filter.city() {
        builder.push(" AND city_name = ").push_bind(city.to_string());
    }
    if let Some(year) = filter.year() {
        builder.push(" AND year = ").push_bind(year.to_string());
    }
    if let Some(name) = filter.employee_name() {
        builder
            .push(" AND LOWER(employee_name) LIKE ")
            .push_bind(format!("%{}%", escape_like(&name.to_lowercase())));
    }

    builder.push(" ORDER BY created_at DESC, id DESC");
    builder
}

/// Keeps only the fetched rows that match `filter` exactly.
pub(super) fn refine(rows: Vec<StoredResult>, filter: &ResultFilter) -> Vec<StoredResult> {
    rows.into_iter().filter(|row| filter.matches(row.as_ref())).collect()
}

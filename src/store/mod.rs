//! MySQL persistence for policies, salaries and calculation results.
//!
//! [`Store`] owns the connection pool; it is built once at start-up and
//! handed to the HTTP layer as application data.

mod query;

use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};
use strum::Display;
use tracing::{debug, info};

use crate::model::{ContributionResult, PolicyRecord, ResultFilter, SalaryRecord, StoredResult};

/// Rows per multi-row INSERT, well under MySQL's placeholder limit.
const INSERT_CHUNK: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Table {
    Cities,
    Salaries,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Clear,
    Insert,
    Read,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to {op} table `{table}`: {source}")]
pub struct StoreError {
    pub table: Table,
    pub op: Operation,
    #[source]
    pub source: sqlx::Error,
}

impl StoreError {
    /// User-facing description without the driver's cause.
    pub fn operation_message(&self) -> String {
        format!("failed to {} table `{}`", self.op, self.table)
    }

    fn wrap(table: Table, op: Operation) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self { table, op, source }
    }
}

#[derive(Clone)]
pub struct Store {
    pool: MySqlPool,
}

impl Store {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Removes every row of `table`.
    pub async fn clear_table(&self, table: Table) -> Result<u64, StoreError> {
        let done = sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&self.pool)
            .await
            .map_err(StoreError::wrap(table, Operation::Clear))?;

        info!(%table, rows = done.rows_affected(), "Cleared table");
        Ok(done.rows_affected())
    }

    /// Clears results, then salaries, then cities.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        for table in [Table::Results, Table::Salaries, Table::Cities] {
            self.clear_table(table).await?;
        }
        Ok(())
    }

    /// Replaces the whole policy table with `policies`.
    pub async fn replace_policies(&self, policies: &[PolicyRecord]) -> Result<u64, StoreError> {
        let table = Table::Cities;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::wrap(table, Operation::Clear))?;

        sqlx::query("DELETE FROM cities")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::wrap(table, Operation::Clear))?;

        let mut inserted = 0;
        for chunk in policies.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<MySql> =
                QueryBuilder::new("INSERT INTO cities (city_name, year, base_min, base_max, rate) ");
            builder.push_values(chunk, |mut b, p| {
                b.push_bind(&p.city_name)
                    .push_bind(&p.year)
                    .push_bind(p.base_min)
                    .push_bind(p.base_max)
                    .push_bind(p.rate);
            });
            inserted += builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(StoreError::wrap(table, Operation::Insert))?
                .rows_affected();
        }

        tx.commit()
            .await
            .map_err(StoreError::wrap(table, Operation::Insert))?;

        info!(rows = inserted, "Replaced policy table");
        Ok(inserted)
    }

    /// Replaces the whole salary table with `salaries`.
    pub async fn replace_salaries(&self, salaries: &[SalaryRecord]) -> Result<u64, StoreError> {
        let table = Table::Salaries;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::wrap(table, Operation::Clear))?;

        sqlx::query("DELETE FROM salaries")
            .execute(&mut *tx)
            .await
            .map_err(StoreError::wrap(table, Operation::Clear))?;

        let mut inserted = 0;
        for chunk in salaries.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO salaries (employee_id, employee_name, month, salary_amount) ",
            );
            builder.push_values(chunk, |mut b, s| {
                b.push_bind(&s.employee_id)
                    .push_bind(&s.employee_name)
                    .push_bind(&s.month)
                    .push_bind(s.salary_amount);
            });
            inserted += builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(StoreError::wrap(table, Operation::Insert))?
                .rows_affected();
        }

        tx.commit()
            .await
            .map_err(StoreError::wrap(table, Operation::Insert))?;

        info!(rows = inserted, "Replaced salary table");
        Ok(inserted)
    }

    /// All policies, newest year first.
    pub async fn list_policies(&self) -> Result<Vec<PolicyRecord>, StoreError> {
        sqlx::query_as::<_, PolicyRecord>(
            r#"
            SELECT city_name, year, base_min, base_max, rate
            FROM cities
            ORDER BY year DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::wrap(Table::Cities, Operation::Read))
    }

    /// All salaries, oldest month first.
    pub async fn list_salaries(&self) -> Result<Vec<SalaryRecord>, StoreError> {
        sqlx::query_as::<_, SalaryRecord>(
            r#"
            SELECT employee_id, employee_name, month, salary_amount
            FROM salaries
            ORDER BY month ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::wrap(Table::Salaries, Operation::Read))
    }

    /// Appends calculation results stamped with the current time.
    ///
    /// All chunks commit together or not at all.
    pub async fn insert_results(
        &self,
        results: &[ContributionResult],
    ) -> Result<DateTime<Utc>, StoreError> {
        let table = Table::Results;
        let created_at = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::wrap(table, Operation::Insert))?;

        for chunk in results.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO results \
                 (employee_name, city_name, year, avg_salary, contribution_base, company_fee, created_at) ",
            );
            builder.push_values(chunk, |mut b, r| {
                b.push_bind(&r.employee_name)
                    .push_bind(&r.city_name)
                    .push_bind(&r.year)
                    .push_bind(r.avg_salary)
                    .push_bind(r.contribution_base)
                    .push_bind(r.company_fee)
                    .push_bind(created_at);
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(StoreError::wrap(table, Operation::Insert))?;
        }

        tx.commit()
            .await
            .map_err(StoreError::wrap(table, Operation::Insert))?;

        debug!(rows = results.len(), "Inserted calculation results");
        Ok(created_at)
    }

    /// Results matching `filter`, newest first.
    ///
    /// The SQL conditions only narrow the fetch; the exact match is always
    /// re-applied in memory so results never depend on column collation.
    pub async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<StoredResult>, StoreError> {
        let mut builder = query::select_results(filter);
        let rows = builder
            .build_query_as::<StoredResult>()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::wrap(Table::Results, Operation::Read))?;

        Ok(query::refine(rows, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_match_schema() {
        assert_eq!(Table::Cities.to_string(), "cities");
        assert_eq!(Table::Salaries.to_string(), "salaries");
        assert_eq!(Table::Results.to_string(), "results");
    }

    #[test]
    fn error_names_table_and_operation() {
        let err = StoreError {
            table: Table::Salaries,
            op: Operation::Insert,
            source: sqlx::Error::RowNotFound,
        };

        assert!(err.to_string().starts_with("failed to insert table `salaries`:"));
        assert_eq!(err.operation_message(), "failed to insert table `salaries`");
    }
}

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};
use tracing::info;

use super::{Store, StoreError, StoreOp, Table};
use crate::model::{City, ContributionResult, Salary};

/// Rows per INSERT statement; keeps bind parameters well under MySQL's limit.
const INSERT_CHUNK: usize = 1_000;

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn begin_replace(&self, table: Table) -> Result<Transaction<'static, MySql>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(replace_err(table))?;

        sqlx::query(&format!("DELETE FROM {}", table.as_ref()))
            .execute(&mut *tx)
            .await
            .map_err(replace_err(table))?;

        Ok(tx)
    }

    async fn commit_replace(
        tx: Transaction<'static, MySql>,
        table: Table,
        count: usize,
    ) -> Result<(), StoreError> {
        tx.commit().await.map_err(replace_err(table))?;

        info!(table = %table, count, "Table replaced");
        Ok(())
    }
}

fn select_err(table: Table) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| StoreError::new(StoreOp::Select, table, e)
}

fn replace_err(table: Table) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| StoreError::new(StoreOp::Replace, table, e)
}

#[async_trait]
impl Store for MySqlStore {
    async fn replace_cities(&self, cities: &[City]) -> Result<(), StoreError> {
        let table = Table::Cities;
        let mut tx = self.begin_replace(table).await?;

        for chunk in cities.chunks(INSERT_CHUNK) {
            let mut query = QueryBuilder::<MySql>::new(
                "INSERT INTO cities (city_name, year, base_min, base_max, rate) ",
            );
            query.push_values(chunk, |mut row, city| {
                row.push_bind(city.city_name.as_str())
                    .push_bind(city.year.as_str())
                    .push_bind(city.base_min)
                    .push_bind(city.base_max)
                    .push_bind(city.rate);
            });
            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(replace_err(table))?;
        }

        Self::commit_replace(tx, table, cities.len()).await
    }

    async fn list_cities(&self) -> Result<Vec<City>, StoreError> {
        sqlx::query_as::<_, City>(
            "SELECT city_name, year, base_min, base_max, rate FROM cities ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(select_err(Table::Cities))
    }

    async fn find_city(&self, city_name: &str) -> Result<Option<City>, StoreError> {
        sqlx::query_as::<_, City>(
            r#"
            SELECT city_name, year, base_min, base_max, rate
            FROM cities
            WHERE city_name = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(city_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(select_err(Table::Cities))
    }

    async fn replace_salaries(&self, salaries: &[Salary]) -> Result<(), StoreError> {
        let table = Table::Salaries;
        let mut tx = self.begin_replace(table).await?;

        for chunk in salaries.chunks(INSERT_CHUNK) {
            let mut query = QueryBuilder::<MySql>::new(
                "INSERT INTO salaries (employee_id, employee_name, month, salary_amount) ",
            );
            query.push_values(chunk, |mut row, salary| {
                row.push_bind(salary.employee_id.as_str())
                    .push_bind(salary.employee_name.as_str())
                    .push_bind(salary.month.as_str())
                    .push_bind(salary.salary_amount);
            });
            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(replace_err(table))?;
        }

        Self::commit_replace(tx, table, salaries.len()).await
    }

    async fn list_salaries(&self) -> Result<Vec<Salary>, StoreError> {
        sqlx::query_as::<_, Salary>(
            "SELECT employee_id, employee_name, month, salary_amount FROM salaries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(select_err(Table::Salaries))
    }

    async fn replace_results(&self, results: &[ContributionResult]) -> Result<(), StoreError> {
        let table = Table::Results;
        let mut tx = self.begin_replace(table).await?;

        for chunk in results.chunks(INSERT_CHUNK) {
            let mut query = QueryBuilder::<MySql>::new(
                "INSERT INTO results (employee_name, city_name, avg_salary, contribution_base, company_fee) ",
            );
            query.push_values(chunk, |mut row, result| {
                row.push_bind(result.employee_name.as_str())
                    .push_bind(result.city_name.as_str())
                    .push_bind(result.avg_salary)
                    .push_bind(result.contribution_base)
                    .push_bind(result.company_fee);
            });
            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(replace_err(table))?;
        }

        Self::commit_replace(tx, table, results.len()).await
    }

    async fn list_results(&self) -> Result<Vec<ContributionResult>, StoreError> {
        sqlx::query_as::<_, ContributionResult>(
            r#"
            SELECT employee_name, city_name, avg_salary, contribution_base, company_fee
            FROM results
            ORDER BY employee_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(select_err(Table::Results))
    }
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../migrations/20240101000000_create_tables.sql");

    fn text_columns() -> Vec<&'static str> {
        SCHEMA
            .lines()
            .map(str::trim)
            .filter(|line| line.contains("VARCHAR"))
            .collect()
    }

    #[test]
    fn text_columns_compare_without_padding() {
        let columns = text_columns();

        assert_eq!(columns.len(), 7);
        for column in columns {
            // utf8mb4_bin is PAD SPACE: 'x ' = 'x'
            assert!(column.contains("COLLATE utf8mb4_0900_bin"), "{column}");
        }
    }

    #[test]
    fn text_columns_share_one_width() {
        for column in text_columns() {
            assert!(column.contains("VARCHAR(255)"), "{column}");
        }
    }
}

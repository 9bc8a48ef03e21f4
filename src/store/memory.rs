use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{Store, StoreError, StoreOp, Table};
use crate::model::{City, ContributionResult, Salary};

#[derive(Default)]
struct Tables {
    cities: Vec<City>,
    salaries: Vec<Salary>,
    results: Vec<ContributionResult>,
}

/// In-process store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, table: Table) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::new(StoreOp::Select, table, "store lock poisoned"))
    }

    fn write(&self, table: Table) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::new(StoreOp::Replace, table, "store lock poisoned"))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn replace_cities(&self, cities: &[City]) -> Result<(), StoreError> {
        self.write(Table::Cities)?.cities = cities.to_vec();
        Ok(())
    }

    async fn list_cities(&self) -> Result<Vec<City>, StoreError> {
        Ok(self.read(Table::Cities)?.cities.clone())
    }

    async fn find_city(&self, city_name: &str) -> Result<Option<City>, StoreError> {
        Ok(self
            .read(Table::Cities)?
            .cities
            .iter()
            .find(|c| c.city_name == city_name)
            .cloned())
    }

    async fn replace_salaries(&self, salaries: &[Salary]) -> Result<(), StoreError> {
        self.write(Table::Salaries)?.salaries = salaries.to_vec();
        Ok(())
    }

    async fn list_salaries(&self) -> Result<Vec<Salary>, StoreError> {
        Ok(self.read(Table::Salaries)?.salaries.clone())
    }

    async fn replace_results(&self, results: &[ContributionResult]) -> Result<(), StoreError> {
        self.write(Table::Results)?.results = results.to_vec();
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<ContributionResult>, StoreError> {
        let mut results = self.read(Table::Results)?.results.clone();
        results.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, base_min: f64) -> City {
        City {
            city_name: name.into(),
            year: "2024".into(),
            base_min,
            base_max: 30000.0,
            rate: 0.16,
        }
    }

    fn result(name: &str) -> ContributionResult {
        ContributionResult {
            employee_name: name.into(),
            city_name: "佛山".into(),
            avg_salary: 1.0,
            contribution_base: 1.0,
            company_fee: 1.0,
        }
    }

    #[actix_web::test]
    async fn replace_swaps_whole_table() {
        let store = MemoryStore::new();
        store.replace_cities(&[city("a", 1.0), city("b", 2.0)]).await.unwrap();
        store.replace_cities(&[city("c", 3.0)]).await.unwrap();

        assert_eq!(store.list_cities().await.unwrap(), vec![city("c", 3.0)]);
    }

    #[actix_web::test]
    async fn find_city_is_exact_and_takes_first() {
        let store = MemoryStore::new();
        store
            .replace_cities(&[city("佛山", 1.0), city("佛山", 2.0)])
            .await
            .unwrap();

        assert_eq!(store.find_city("佛山").await.unwrap(), Some(city("佛山", 1.0)));
        assert_eq!(store.find_city("佛山 ").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn results_come_back_sorted_by_name() {
        let store = MemoryStore::new();
        store
            .replace_results(&[result("wang"), result("li"), result("zhang")])
            .await
            .unwrap();

        let names: Vec<_> = store
            .list_results()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.employee_name)
            .collect();
        assert_eq!(names, ["li", "wang", "zhang"]);
    }
}

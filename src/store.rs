use async_trait::async_trait;
use derive_more::Display;
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumString};

use crate::model::{City, ContributionResult, Salary};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    Cities,
    Salaries,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum StoreOp {
    Replace,
    Select,
}

/// Which backend holds the three tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Debug, Display)]
#[display(fmt = "{} {} failed: {}", op, table, reason)]
pub struct StoreError {
    pub op: StoreOp,
    pub table: Table,
    pub reason: String,
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn new(op: StoreOp, table: Table, reason: impl ToString) -> Self {
        Self {
            op,
            table,
            reason: reason.to_string(),
        }
    }

    /// Message safe to hand back to a client.
    pub fn public_message(&self) -> String {
        format!("failed to {} {}", self.op, self.table)
    }
}

/// Persistence for the three wholesale-replaced tables.
///
/// A `replace_*` call swaps the table's full contents: readers see either the
/// old rows or the new rows, never a mix, and a failed replace keeps the old
/// rows.
#[async_trait]
pub trait Store: Send + Sync {
    async fn replace_cities(&self, cities: &[City]) -> Result<(), StoreError>;

    async fn list_cities(&self) -> Result<Vec<City>, StoreError>;

    /// First stored city whose name matches exactly.
    async fn find_city(&self, city_name: &str) -> Result<Option<City>, StoreError>;

    async fn replace_salaries(&self, salaries: &[Salary]) -> Result<(), StoreError>;

    async fn list_salaries(&self) -> Result<Vec<Salary>, StoreError>;

    async fn replace_results(&self, results: &[ContributionResult]) -> Result<(), StoreError>;

    /// All results ordered by `employee_name` ascending.
    async fn list_results(&self) -> Result<Vec<ContributionResult>, StoreError>;
}

pub mod calculate;
pub mod cities;
pub mod common;
pub mod results;
pub mod salaries;

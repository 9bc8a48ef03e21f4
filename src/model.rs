pub mod city;
pub mod contribution;
pub mod salary;

pub use city::City;
pub use contribution::ContributionResult;
pub use salary::Salary;

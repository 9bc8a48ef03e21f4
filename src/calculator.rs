use std::collections::HashMap;

use crate::model::{City, ContributionResult, Salary};

/// Clamp an average salary into the city's contribution band.
///
/// The lower bound is checked first, so an inverted band (`base_min > base_max`)
/// resolves to `base_min` for anything below it.
pub fn determine_contribution_base(avg_salary: f64, base_min: f64, base_max: f64) -> f64 {
    if avg_salary < base_min {
        return base_min;
    }
    if avg_salary > base_max {
        return base_max;
    }
    avg_salary
}

/// Group salary amounts by exact `employee_name`, keeping first-seen order.
pub fn group_by_employee(salaries: &[Salary]) -> Vec<(&str, Vec<f64>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();

    for salary in salaries {
        let name = salary.employee_name.as_str();
        match index.get(name) {
            Some(&pos) => groups[pos].1.push(salary.salary_amount),
            None => {
                index.insert(name, groups.len());
                groups.push((name, vec![salary.salary_amount]));
            }
        }
    }

    groups
}

/// Compute one result per distinct employee against `city`.
///
/// Empty input yields an empty result set.
pub fn calculate(city: &City, salaries: &[Salary]) -> Vec<ContributionResult> {
    group_by_employee(salaries)
        .into_iter()
        .map(|(employee_name, amounts)| {
            let avg_salary = amounts.iter().sum::<f64>() / amounts.len() as f64;
            let contribution_base =
                determine_contribution_base(avg_salary, city.base_min, city.base_max);

            ContributionResult {
                employee_name: employee_name.to_string(),
                city_name: city.city_name.clone(),
                avg_salary,
                contribution_base,
                company_fee: contribution_base * city.rate,
            }
        })
        .collect()
}

//! In-memory roster plus the pure operations the display is derived from.

use std::{borrow::Borrow, cmp::Ordering, fmt, str::FromStr};

use shared::domain::{Employee, EmployeeId};
use thiserror::Error;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Ordered mirror of the server's employee list. Only ever replaced whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn replace(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
    }

    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    SalaryAsc,
    SalaryDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::SalaryAsc,
        SortKey::SalaryDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::SalaryAsc => "salary-asc",
            SortKey::SalaryDesc => "salary-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected name-asc, name-desc, salary-asc or salary-desc)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownSortKey(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterStats {
    pub count: usize,
    pub total_payroll: f64,
    pub average_salary: f64,
}

pub fn compute_stats(employees: &[Employee]) -> RosterStats {
    let count = employees.len();
    let total_payroll: f64 = employees
        .iter()
        .map(|employee| employee.salary)
        .filter(|salary| salary.is_finite())
        .sum();
    let average_salary = if count == 0 {
        0.0
    } else {
        total_payroll / count as f64
    };
    RosterStats {
        count,
        total_payroll,
        average_salary,
    }
}

/// Records matching `query`: case-insensitive on name, email and department,
/// literal on phone. An empty query keeps everything.
pub fn filter<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    if query.is_empty() {
        return employees.iter().collect();
    }
    let folded = query.to_lowercase();
    employees
        .iter()
        .filter(|employee| {
            employee.name.to_lowercase().contains(&folded)
                || employee.email.to_lowercase().contains(&folded)
                || employee.department.to_lowercase().contains(&folded)
                || employee.phone.contains(query)
        })
        .collect()
}

/// Stable sort into a new sequence; the input is left as is.
pub fn sort<E>(employees: &[E], key: SortKey) -> Vec<E>
where
    E: Borrow<Employee> + Clone,
{
    let mut sorted = employees.to_vec();
    sorted.sort_by(|a, b| {
        compare(
            <E as Borrow<Employee>>::borrow(a),
            <E as Borrow<Employee>>::borrow(b),
            key,
        )
    });
    sorted
}

fn compare(a: &Employee, b: &Employee, key: SortKey) -> Ordering {
    match key {
        SortKey::NameAsc => collate(&a.name, &b.name),
        SortKey::NameDesc => collate(&b.name, &a.name),
        SortKey::SalaryAsc => a.salary.total_cmp(&b.salary),
        SortKey::SalaryDesc => b.salary.total_cmp(&a.salary),
    }
}

/// Dictionary-style ordering: accents and case are ignored first (NFD with
/// combining marks dropped), and only names that are identical when folded
/// fall back to comparing the raw characters, lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(fold(b))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
}

fn fold(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> (bool, char) {
    (c.is_uppercase(), c)
}

/// The displayed sequence: the roster narrowed by `query`, then ordered by
/// `key` when one is selected.
pub fn visible<'a>(
    employees: &'a [Employee],
    query: &str,
    key: Option<SortKey>,
) -> Vec<&'a Employee> {
    let filtered = filter(employees, query);
    match key {
        Some(key) => sort(&filtered, key),
        None => filtered,
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;

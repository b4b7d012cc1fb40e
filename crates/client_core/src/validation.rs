//! Form validation as an ordered rule table.
//!
//! Rules run in declaration order and the first failure wins, so a bad name
//! hides every later problem until it is fixed.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use shared::domain::{parse_salary_text, Employee, EmployeeId};
use thiserror::Error;

use crate::form::FormDraft;

pub const MIN_SALARY: f64 = 15000.0;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]{3,30}$").expect("name pattern is valid"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9]{10,15}$").expect("phone pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Salary,
    Department,
    StartDate,
    Notes,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Salary,
        Field::Department,
        Field::StartDate,
        Field::Notes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Salary => "salary",
            Field::Department => "department",
            Field::StartDate => "startDate",
            Field::Notes => "notes",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', '-'], "");
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

/// What a rule checks. Pattern rules look at one text field of the draft;
/// duplicate rules compare against the current roster.
#[derive(Clone, Copy)]
pub enum Check {
    Pattern(&'static LazyLock<Regex>),
    MinSalary(f64),
    UniqueEmail,
    UniquePhone,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub field: Field,
    pub check: Check,
    pub message: &'static str,
}

pub static RULES: [Rule; 6] = [
    Rule {
        field: Field::Name,
        check: Check::Pattern(&NAME_PATTERN),
        message: "Invalid name",
    },
    Rule {
        field: Field::Email,
        check: Check::Pattern(&EMAIL_PATTERN),
        message: "Invalid email",
    },
    Rule {
        field: Field::Phone,
        check: Check::Pattern(&PHONE_PATTERN),
        message: "Invalid phone",
    },
    Rule {
        field: Field::Salary,
        check: Check::MinSalary(MIN_SALARY),
        message: "Min salary 15000",
    },
    Rule {
        field: Field::Email,
        check: Check::UniqueEmail,
        message: "Email exists",
    },
    Rule {
        field: Field::Phone,
        check: Check::UniquePhone,
        message: "Phone exists",
    },
];

impl Rule {
    pub fn passes(&self, draft: &FormDraft, roster: &[Employee], exclude: Option<EmployeeId>) -> bool {
        let others = || roster.iter().filter(move |e| Some(e.id) != exclude);
        match self.check {
            Check::Pattern(pattern) => pattern.is_match(draft.get(self.field)),
            // Unparseable salary text fails here, like a NaN would.
            Check::MinSalary(min) => {
                parse_salary_text(draft.get(Field::Salary)).is_some_and(|salary| salary >= min)
            }
            Check::UniqueEmail => !others().any(|e| e.email == draft.get(Field::Email)),
            Check::UniquePhone => !others().any(|e| e.phone == draft.get(Field::Phone)),
        }
    }

    fn evaluate(
        &self,
        draft: &FormDraft,
        roster: &[Employee],
        exclude: Option<EmployeeId>,
    ) -> Result<(), ValidationError> {
        if self.passes(draft, roster, exclude) {
            Ok(())
        } else {
            Err(ValidationError {
                field: self.field,
                message: self.message,
            })
        }
    }
}

/// Runs [`RULES`] in order against `draft`, skipping `exclude` in the duplicate
/// checks (the record being edited).
pub fn validate(
    draft: &FormDraft,
    roster: &[Employee],
    exclude: Option<EmployeeId>,
) -> Result<(), ValidationError> {
    RULES
        .iter()
        .try_for_each(|rule| rule.evaluate(draft, roster, exclude))
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;

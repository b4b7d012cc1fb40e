//! Form draft and the edit surface state machine.

use shared::{
    domain::{parse_salary_text, Employee, EmployeeId},
    protocol::EmployeeBody,
};

use crate::validation::{Field, ValidationError};

/// Field values as typed into the form. `id` is the hidden field that decides
/// between create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub salary: String,
    pub department: String,
    pub start_date: String,
    pub notes: String,
}

impl FormDraft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: Some(employee.id),
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            salary: format_salary_input(employee.salary),
            department: employee.department.clone(),
            start_date: employee.start_date.clone(),
            notes: employee.notes.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Salary => &self.salary,
            Field::Department => &self.department,
            Field::StartDate => &self.start_date,
            Field::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Salary => self.salary = value,
            Field::Department => self.department = value,
            Field::StartDate => self.start_date = value,
            Field::Notes => self.notes = value,
        }
    }

    /// Request body for this draft. Salary text that does not parse is sent
    /// as 0; validation rejects such drafts before they get here.
    pub fn to_body(&self) -> EmployeeBody {
        EmployeeBody {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            salary: parse_salary_text(&self.salary).unwrap_or(0.0),
            department: self.department.clone(),
            start_date: self.start_date.clone(),
            notes: self.notes.clone(),
        }
    }
}

fn format_salary_input(salary: f64) -> String {
    if salary.fract() == 0.0 && salary.abs() < 1e15 {
        format!("{salary:.0}")
    } else {
        salary.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSurface {
    #[default]
    Closed,
    Open(OpenForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub draft: FormDraft,
    /// Set between submit and resync; further submits are refused.
    pub submitting: bool,
    pub field_error: Option<ValidationError>,
    pub notice: Option<String>,
}

impl OpenForm {
    fn new(mode: FormMode, draft: FormDraft) -> Self {
        Self {
            mode,
            draft,
            submitting: false,
            field_error: None,
            notice: None,
        }
    }
}

impl EditSurface {
    pub fn is_open(&self) -> bool {
        matches!(self, EditSurface::Open(_))
    }

    pub fn form(&self) -> Option<&OpenForm> {
        match self {
            EditSurface::Open(form) => Some(form),
            EditSurface::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut OpenForm> {
        match self {
            EditSurface::Open(form) => Some(form),
            EditSurface::Closed => None,
        }
    }

    pub fn open_create(&mut self) {
        *self = EditSurface::Open(OpenForm::new(FormMode::Create, FormDraft::empty()));
    }

    pub fn open_edit(&mut self, employee: &Employee) {
        *self = EditSurface::Open(OpenForm::new(
            FormMode::Edit(employee.id),
            FormDraft::from_employee(employee),
        ));
    }

    pub fn close(&mut self) {
        *self = EditSurface::Closed;
    }

    /// Updates one field and clears the error shown next to it. Ignored while
    /// closed or while a submission is in flight.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let Some(form) = self.form_mut() else {
            return false;
        };
        if form.submitting {
            return false;
        }
        form.draft.set(field, value);
        if form
            .field_error
            .as_ref()
            .is_some_and(|error| error.field == field)
        {
            form.field_error = None;
        }
        true
    }
}

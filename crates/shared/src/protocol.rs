use serde::{Deserialize, Serialize};

use crate::domain::{coerce_salary, Employee, EmployeeId};

/// Request body for `POST /employees` and `PUT /employees/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "coerce_salary")]
    pub salary: f64,
    pub department: String,
    pub start_date: String,
    pub notes: String,
}

impl EmployeeBody {
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            salary: self.salary,
            department: self.department,
            start_date: self.start_date,
            notes: self.notes,
        }
    }
}

impl Employee {
    pub fn body(&self) -> EmployeeBody {
        EmployeeBody {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            salary: self.salary,
            department: self.department.clone(),
            start_date: self.start_date.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_never_carries_an_id() {
        let body = EmployeeBody {
            name: "Ann Lee".into(),
            email: "ann@x.com".into(),
            phone: "+919876543210".into(),
            salary: 20000.0,
            department: "Ops".into(),
            start_date: "2024-01-02".into(),
            notes: String::new(),
        };
        let value = serde_json::to_value(&body).expect("json");
        assert!(value.get("id").is_none());
        assert_eq!(value["startDate"], "2024-01-02");

        let employee = body.clone().with_id(EmployeeId(12));
        assert_eq!(employee.id, EmployeeId(12));
        assert_eq!(employee.body(), body);
    }
}

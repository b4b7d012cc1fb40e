//! Card view of the roster and the control bindings that go with it.

use std::collections::BTreeMap;

use shared::domain::{Employee, EmployeeId};

use crate::{events::UiEvent, roster::RosterStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub group_thousands: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            group_thousands: false,
        }
    }
}

impl CurrencyFormat {
    /// `symbol` followed by the amount. Whole amounts print without decimals,
    /// others with at most two.
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let rounded = (amount * 100.0).round() / 100.0;
        let sign = if rounded < 0.0 { "-" } else { "" };
        let magnitude = rounded.abs();

        let text = if magnitude.fract() == 0.0 {
            format!("{magnitude:.0}")
        } else {
            let text = format!("{magnitude:.2}");
            text.trim_end_matches('0').to_string()
        };
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
            None => (text, None),
        };
        let whole = if self.group_thousands {
            group_digits(&whole)
        } else {
            whole
        };

        match fraction {
            Some(fraction) => format!("{sign}{}{whole}.{fraction}", self.symbol),
            None => format!("{sign}{}{whole}", self.symbol),
        }
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Edit(EmployeeId),
    Delete(EmployeeId),
}

impl ControlAction {
    pub fn key(self) -> String {
        match self {
            ControlAction::Edit(id) => format!("edit-{id}"),
            ControlAction::Delete(id) => format!("delete-{id}"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlAction::Edit(_) => "Edit",
            ControlAction::Delete(_) => "Delete",
        }
    }

    pub fn event(self) -> UiEvent {
        match self {
            ControlAction::Edit(id) => UiEvent::Edit(id),
            ControlAction::Delete(id) => UiEvent::Delete(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub key: String,
    pub label: &'static str,
    pub action: ControlAction,
}

impl From<ControlAction> for Control {
    fn from(action: ControlAction) -> Self {
        Self {
            key: action.key(),
            label: action.label(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub salary: String,
    pub phone: String,
    pub controls: Vec<Control>,
}

/// Control key -> event. Built fresh by every render; never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    handlers: BTreeMap<String, UiEvent>,
}

impl BindingTable {
    fn bind(&mut self, control: &Control) {
        self.handlers
            .insert(control.key.clone(), control.action.event());
    }

    pub fn resolve(&self, key: &str) -> Option<&UiEvent> {
        self.handlers.get(key.trim())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub count: usize,
    pub total_payroll: String,
    pub average_salary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterView {
    pub cards: Vec<Card>,
    pub bindings: BindingTable,
    pub stats: Option<StatsView>,
}

pub fn render(employees: &[&Employee], stats: &RosterStats, currency: &CurrencyFormat) -> RosterView {
    let mut bindings = BindingTable::default();
    let cards = employees
        .iter()
        .map(|employee| {
            let controls: Vec<Control> = [
                ControlAction::Edit(employee.id),
                ControlAction::Delete(employee.id),
            ]
            .into_iter()
            .map(Control::from)
            .collect();
            for control in &controls {
                bindings.bind(control);
            }
            Card {
                id: employee.id,
                name: employee.name.clone(),
                email: employee.email.clone(),
                department: employee.department.clone(),
                salary: currency.format(employee.salary),
                phone: employee.phone.clone(),
                controls,
            }
        })
        .collect();

    RosterView {
        cards,
        bindings,
        stats: Some(StatsView {
            count: stats.count,
            total_payroll: currency.format(stats.total_payroll),
            average_salary: currency.format(stats.average_salary),
        }),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;

//! Plain-text display surface: cards, stats, the edit form and errors.

use std::fmt::Write as _;

use client_core::{
    view::StatsView, EditSurface, Field, FormMode, RosterView, UiError,
};

pub fn render_cards(view: &RosterView) -> String {
    if view.cards.is_empty() {
        return "(no employees)\n".to_string();
    }
    let mut out = String::new();
    for card in &view.cards {
        let _ = writeln!(out, "{}", card.name);
        for line in [&card.email, &card.department, &card.salary, &card.phone] {
            if !line.is_empty() {
                let _ = writeln!(out, "  {line}");
            }
        }
        let controls: Vec<String> = card
            .controls
            .iter()
            .map(|control| format!("[{}] {}", control.key, control.label))
            .collect();
        let _ = writeln!(out, "  {}", controls.join("  "));
        out.push('\n');
    }
    out
}

pub fn render_stats(stats: &StatsView) -> String {
    format!(
        "Employees: {} | Total payroll: {} | Average salary: {}\n",
        stats.count, stats.total_payroll, stats.average_salary
    )
}

pub fn render_view(view: &RosterView) -> String {
    let mut out = render_cards(view);
    if let Some(stats) = &view.stats {
        out.push_str(&render_stats(stats));
    }
    out
}

/// Form fields with the failing field's message beside it.
pub fn render_surface(surface: &EditSurface) -> String {
    let Some(form) = surface.form() else {
        return String::new();
    };
    let mut out = String::new();
    let title = match form.mode {
        FormMode::Create => "Add employee".to_string(),
        FormMode::Edit(id) => format!("Edit employee #{id}"),
    };
    let _ = write!(out, "== {title}");
    if form.submitting {
        out.push_str(" (saving...)");
    }
    out.push('\n');

    for field in Field::ALL {
        let _ = write!(out, "  {:<10} {}", field.as_str(), form.draft.get(field));
        if let Some(error) = form.field_error.as_ref().filter(|error| error.field == field) {
            let _ = write!(out, "   <- {}", error.message);
        }
        out.push('\n');
    }
    if let Some(notice) = &form.notice {
        let _ = writeln!(out, "  ! {notice}");
    }
    out
}

pub fn render_error(error: &UiError) -> String {
    format!("error: {}\n", error.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{render, roster::compute_stats, CurrencyFormat, ValidationError};
    use shared::domain::{Employee, EmployeeId};

    fn ann() -> Employee {
        Employee {
            id: EmployeeId(1),
            name: "Ann Lee".into(),
            email: "a@x.com".into(),
            phone: "9876543210".into(),
            salary: 20000.0,
            department: "Ops".into(),
            start_date: "2024-01-02".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn cards_show_fields_and_control_keys() {
        let roster = vec![ann()];
        let refs: Vec<&Employee> = roster.iter().collect();
        let view = render(&refs, &compute_stats(&roster), &CurrencyFormat::default());

        let text = render_view(&view);
        assert!(text.contains("Ann Lee\n"));
        assert!(text.contains("  ₹20000\n"));
        assert!(text.contains("[edit-1] Edit  [delete-1] Delete"));
        assert!(text.contains("Employees: 1 | Total payroll: ₹20000 | Average salary: ₹20000"));
    }

    #[test]
    fn empty_roster_says_so() {
        let view = render(&[], &compute_stats(&[]), &CurrencyFormat::default());
        assert!(render_view(&view).starts_with("(no employees)"));
    }

    #[test]
    fn field_error_is_shown_next_to_its_field() {
        let mut surface = EditSurface::default();
        surface.open_edit(&ann());
        surface.set_field(Field::Salary, "10000");
        if let Some(form) = surface.form_mut() {
            form.field_error = Some(ValidationError {
                field: Field::Salary,
                message: "Min salary 15000",
            });
        }

        let text = render_surface(&surface);
        assert!(text.starts_with("== Edit employee #1\n"));
        assert!(text.contains("salary     10000   <- Min salary 15000\n"));
        assert!(!text.contains("name       Ann Lee   <-"));
        assert_eq!(render_surface(&EditSurface::Closed), "");
    }
}

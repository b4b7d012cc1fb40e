use super::*;

fn employee(id: i64, name: &str, salary: f64) -> Employee {
    Employee {
        id: EmployeeId(id),
        name: name.to_string(),
        email: format!("{}@corp.example", name.to_lowercase().replace(' ', ".")),
        phone: format!("98765432{id:02}"),
        salary,
        department: "Engineering".to_string(),
        start_date: "2024-01-02".to_string(),
        notes: String::new(),
    }
}

fn names(employees: &[&Employee]) -> Vec<String> {
    employees.iter().map(|employee| employee.name.clone()).collect()
}

#[test]
fn stats_of_empty_roster_are_zero_not_nan() {
    let stats = compute_stats(&[]);
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_payroll, 0.0);
    assert_eq!(stats.average_salary, 0.0);
    assert!(!stats.average_salary.is_nan());
}

#[test]
fn stats_sum_and_average_salaries() {
    let roster = vec![
        employee(1, "Ann Lee", 20000.0),
        employee(2, "Bob Ray", 30000.0),
        employee(3, "Cy Young", 25000.0),
    ];
    let stats = compute_stats(&roster);
    assert_eq!(stats.count, 3);
    assert_eq!(stats.total_payroll, 75000.0);
    assert_eq!(stats.average_salary, 25000.0);
}

#[test]
fn empty_query_returns_everything_in_order() {
    let roster = vec![
        employee(2, "Bob Ray", 30000.0),
        employee(1, "Ann Lee", 20000.0),
    ];
    let all = filter(&roster, "");
    assert_eq!(all.len(), 2);
    assert!(all.iter().zip(&roster).all(|(a, b)| *a == b));
}

#[test]
fn filter_matches_text_fields_case_insensitively() {
    let mut roster = vec![
        employee(1, "Ann Lee", 20000.0),
        employee(2, "Bob Ray", 30000.0),
    ];
    roster[1].department = "Finance".to_string();

    assert_eq!(names(&filter(&roster, "ANN")), vec!["Ann Lee"]);
    assert_eq!(names(&filter(&roster, "bob.ray@")), vec!["Bob Ray"]);
    assert_eq!(names(&filter(&roster, "fin")), vec!["Bob Ray"]);
    assert!(filter(&roster, "nobody").is_empty());
}

#[test]
fn filter_matches_phone_literally() {
    let mut roster = vec![
        employee(1, "Ann Lee", 20000.0),
        employee(2, "Bob Ray", 30000.0),
    ];
    roster[0].phone = "+919876543210".to_string();

    assert_eq!(names(&filter(&roster, "+91")), vec!["Ann Lee"]);
    assert_eq!(names(&filter(&roster, "9876543202")), vec!["Bob Ray"]);
}

#[test]
fn filter_does_not_touch_the_roster() {
    let roster = vec![employee(1, "Ann Lee", 20000.0)];
    let before = roster.clone();
    let _ = filter(&roster, "zzz");
    assert_eq!(roster, before);
}

#[test]
fn sorts_by_name_both_ways() {
    let roster = vec![
        employee(1, "Bob", 30000.0),
        employee(2, "Amy", 30000.0),
        employee(3, "carl", 10000.0),
    ];
    let asc = sort(&roster, SortKey::NameAsc);
    assert_eq!(
        asc.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["Amy", "Bob", "carl"]
    );
    let desc = sort(&roster, SortKey::NameDesc);
    assert_eq!(
        desc.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["carl", "Bob", "Amy"]
    );
}

#[test]
fn accented_names_sort_with_their_base_letter() {
    let roster = vec![
        employee(1, "Zoe", 30000.0),
        employee(2, "Émile", 30000.0),
        employee(3, "Eve", 30000.0),
    ];
    let asc = sort(&roster, SortKey::NameAsc);
    assert_eq!(
        asc.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["Émile", "Eve", "Zoe"]
    );
    let desc = sort(&roster, SortKey::NameDesc);
    assert_eq!(
        desc.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["Zoe", "Eve", "Émile"]
    );
}

#[test]
fn salary_sort_is_numeric_and_stable() {
    let roster = vec![
        employee(1, "Bob", 30000.0),
        employee(2, "Amy", 30000.0),
        employee(3, "Cy", 9000.0),
        employee(4, "Di", 100000.0),
    ];
    let asc = sort(&roster, SortKey::SalaryAsc);
    assert_eq!(
        asc.iter().map(|e| e.id.0).collect::<Vec<_>>(),
        vec![3, 1, 2, 4]
    );
    let desc = sort(&roster, SortKey::SalaryDesc);
    assert_eq!(
        desc.iter().map(|e| e.id.0).collect::<Vec<_>>(),
        vec![4, 1, 2, 3]
    );
    // input untouched
    assert_eq!(roster[0].name, "Bob");
}

#[test]
fn equal_salaries_keep_input_order() {
    let roster = vec![employee(1, "Bob", 30000.0), employee(2, "Amy", 30000.0)];
    let by_name = sort(&roster, SortKey::NameAsc);
    assert_eq!(by_name[0].name, "Amy");
    let by_salary = sort(&roster, SortKey::SalaryAsc);
    assert_eq!(by_salary[0].name, "Bob");
    assert_eq!(by_salary[1].name, "Amy");
}

#[test]
fn collation_folds_case_before_breaking_ties() {
    assert_eq!(collate("amy", "Bob"), Ordering::Less);
    assert_eq!(collate("Bob", "amy"), Ordering::Greater);
    assert_eq!(collate("amy", "Amy"), Ordering::Less);
    assert_eq!(collate("Ann", "Ann"), Ordering::Equal);
    assert_eq!(collate("Eve", "Éve"), Ordering::Less);
}

#[test]
fn sort_keys_parse_from_wire_tokens() {
    assert_eq!("name-asc".parse::<SortKey>(), Ok(SortKey::NameAsc));
    assert_eq!(" SALARY-DESC ".parse::<SortKey>(), Ok(SortKey::SalaryDesc));
    assert_eq!(
        "age-asc".parse::<SortKey>(),
        Err(UnknownSortKey("age-asc".to_string()))
    );
    for key in SortKey::ALL {
        assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
    }
}

#[test]
fn visible_filters_then_sorts() {
    let mut roster = vec![
        employee(1, "Zed Low", 50000.0),
        employee(2, "Amy Ng", 40000.0),
        employee(3, "Bea Ko", 60000.0),
    ];
    roster[2].department = "Sales".to_string();

    let shown = visible(&roster, "engineering", Some(SortKey::NameAsc));
    assert_eq!(names(&shown), vec!["Amy Ng", "Zed Low"]);

    let shown = visible(&roster, "", None);
    assert_eq!(names(&shown), vec!["Zed Low", "Amy Ng", "Bea Ko"]);
}

#[test]
fn roster_lookup_and_replacement() {
    let mut roster = Roster::new(vec![employee(1, "Ann Lee", 20000.0)]);
    assert!(roster.find(EmployeeId(1)).is_some());
    assert!(roster.find(EmployeeId(9)).is_none());

    roster.replace(vec![employee(5, "Bob Ray", 30000.0), employee(6, "Cy Young", 1.0)]);
    assert_eq!(roster.len(), 2);
    assert!(roster.find(EmployeeId(1)).is_none());
    assert_eq!(roster.as_slice()[0].id, EmployeeId(5));
}

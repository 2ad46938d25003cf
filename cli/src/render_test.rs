use todo_client::net::types::Priority;

use super::*;

fn todo(id: i64, title: &str, completed: bool) -> Todo {
    Todo {
        id: Some(id),
        title: title.to_owned(),
        description: None,
        completed,
        priority: Priority::Medium,
        created_at: None,
        updated_at: None,
        due_date: None,
    }
}

#[test]
fn line_marks_completion_and_priority() {
    let mut milk = todo(3, "Buy milk", true);
    milk.priority = Priority::High;
    milk.due_date = Some("2025-06-01T09:00:00".to_owned());

    assert_eq!(todo_line(&milk), "[x] #3 Buy milk (HIGH, due 2025-06-01T09:00:00)");
    assert_eq!(todo_line(&todo(4, "Walk dog", false)), "[ ] #4 Walk dog (MEDIUM)");
}

#[test]
fn detail_skips_blank_description() {
    let mut t = todo(1, "Call mom", false);
    t.description = Some("  ".to_owned());
    assert_eq!(todo_detail(&t), "[ ] #1 Call mom (MEDIUM)");

    t.description = Some("before sunday".to_owned());
    assert_eq!(todo_detail(&t), "[ ] #1 Call mom (MEDIUM)\n    before sunday");
}

#[test]
fn empty_list_distinguishes_no_todos_from_no_matches() {
    assert_eq!(todo_list(&[], 0), NO_TODOS);
    assert_eq!(todo_list(&[], 5), NO_MATCHES);
}

#[test]
fn list_has_count_header() {
    let a = todo(1, "a", false);
    let b = todo(2, "b", true);
    assert_eq!(todo_list(&[&a, &b], 2), "Todos (2)\n[ ] #1 a (MEDIUM)\n[x] #2 b (MEDIUM)");
}

#[test]
fn user_summary_shows_username_only_when_it_differs() {
    let mut user = User {
        id: 1,
        username: "alice".to_owned(),
        email: "a@x.io".to_owned(),
        first_name: None,
        last_name: None,
        role: "USER".to_owned(),
        created_at: None,
        updated_at: None,
    };
    assert_eq!(user_summary(&user), "alice <a@x.io> (USER)");

    user.first_name = Some("Alice".to_owned());
    user.last_name = Some("Liddell".to_owned());
    assert_eq!(user_summary(&user), "Alice Liddell <a@x.io> (USER)\nusername: alice");
}

#[test]
fn stats_include_completion_rate() {
    let stats = TodoStats {
        total: 3,
        completed: 1,
        pending: 2,
        high_priority: 1,
        medium_priority: 2,
        low_priority: 0,
    };
    assert_eq!(
        stats_summary(&stats),
        "total 3  completed 1  pending 2  (33% done)\npriority: high 1  medium 2  low 0"
    );
}

#[test]
fn results_use_the_callers_empty_message() {
    assert_eq!(results(&[], "No overdue todos."), "No overdue todos.");
    assert_eq!(results(&[todo(9, "late", false)], "unused"), "Todos (1)\n[ ] #9 late (MEDIUM)");
}

//! Plain-text rendering for terminal output.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use todo_client::completion_rate;
use todo_client::net::types::{Todo, TodoStats, User};

pub const NO_TODOS: &str = "No todos yet! Create your first todo to get started.";
pub const NO_MATCHES: &str = "No todos match your filters. Try adjusting your search or filters.";

/// `[x] #3 Buy milk (HIGH, due 2025-06-01T09:00:00)`
pub fn todo_line(todo: &Todo) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    let id = todo.id.map_or_else(|| "-".to_owned(), |id| id.to_string());
    let mut line = format!("[{mark}] #{id} {} ({}", todo.title, todo.priority);
    if let Some(due) = &todo.due_date {
        let _ = write!(line, ", due {due}");
    }
    line.push(')');
    line
}

pub fn todo_detail(todo: &Todo) -> String {
    let mut out = todo_line(todo);
    if let Some(description) = todo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = write!(out, "\n    {description}");
    }
    if let Some(created) = &todo.created_at {
        let _ = write!(out, "\n    created {created}");
    }
    if let Some(updated) = &todo.updated_at {
        let _ = write!(out, "\n    updated {updated}");
    }
    out
}

/// Filtered view of the list. `total` is the unfiltered count and picks the
/// empty-state message.
pub fn todo_list(todos: &[&Todo], total: usize) -> String {
    if todos.is_empty() {
        return (if total == 0 { NO_TODOS } else { NO_MATCHES }).to_owned();
    }
    let mut out = format!("Todos ({})", todos.len());
    for todo in todos {
        let _ = write!(out, "\n{}", todo_line(todo));
    }
    out
}

/// Server-side result set (search, overdue) with its own empty message.
pub fn results(todos: &[Todo], empty: &str) -> String {
    if todos.is_empty() {
        return empty.to_owned();
    }
    let refs: Vec<&Todo> = todos.iter().collect();
    todo_list(&refs, todos.len())
}

pub fn user_summary(user: &User) -> String {
    let mut out = format!("{} <{}> ({})", user.display_name(), user.email, user.role);
    if user.display_name() != user.username {
        let _ = write!(out, "\nusername: {}", user.username);
    }
    if let Some(created) = &user.created_at {
        let _ = write!(out, "\nmember since {created}");
    }
    out
}

pub fn stats_summary(stats: &TodoStats) -> String {
    format!(
        "total {}  completed {}  pending {}  ({}% done)\npriority: high {}  medium {}  low {}",
        stats.total,
        stats.completed,
        stats.pending,
        completion_rate(stats),
        stats.high_priority,
        stats.medium_priority,
        stats.low_priority,
    )
}

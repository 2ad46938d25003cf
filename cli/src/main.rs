//! `todo` command-line client.
//!
//! DESIGN
//! ======
//! Each invocation builds an [`AppContext`], restores the session from the
//! persisted token, and runs one command. The token lives in a file under
//! `TODO_HOME` (default `~/.config/todo`), so a login survives between runs.
//!
//! ERROR HANDLING
//! ==============
//! Backend messages are printed verbatim; anything else becomes
//! "failed to <action>". A 401 from any request expires the session through
//! the library's interceptor, and [`TerminalNavigator`] tells the user.

mod prompt;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use todo_client::net::types::{
    CreateTodoRequest, LoginRequest, Priority, RegisterRequest, SearchParams, SortDirection, UpdateTodoRequest,
    UpdateUserRequest, User,
};
use todo_client::{
    ApiConfig, ApiError, AppContext, ConfigError, FileTokenStore, LOGIN_ROUTE, Navigator, StatusFilter, TodoFilter,
    TokenStoreError, should_redirect_unauth,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
    #[error(transparent)]
    Client(ApiError),
    #[error("{}", api_message(.action, .source))]
    Api {
        action: &'static str,
        #[source]
        source: ApiError,
    },
    #[error("not logged in; run `todo login`")]
    NotLoggedIn,
    #[error("{0}")]
    Invalid(String),
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

fn api_message(action: &str, source: &ApiError) -> String {
    source.user_message(action)
}

/// Map an [`ApiError`] to a CLI error labelled with the attempted action.
fn api(action: &'static str) -> impl FnOnce(ApiError) -> CliError {
    move |source| CliError::Api { action, source }
}

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Todo list client")]
struct Cli {
    /// API base URL, e.g. http://localhost:8080/api. Overrides TODO_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in.
    Register(RegisterArgs),
    Login(LoginArgs),
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Update email or name.
    Profile(ProfileArgs),
    /// Change the password.
    Password(PasswordArgs),
    /// Permanently delete the account and log out.
    DeleteAccount {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
    List(ListArgs),
    Show {
        id: i64,
    },
    Add(AddArgs),
    Edit(EditArgs),
    Toggle {
        id: i64,
    },
    Done {
        id: i64,
    },
    Undo {
        id: i64,
    },
    Rm {
        id: i64,
    },
    /// Delete every completed todo.
    ClearCompleted,
    /// Server-side search.
    Search(SearchArgs),
    /// Incomplete todos past their due date.
    Overdue,
    Stats,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// Prompted for when omitted.
    #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct LoginArgs {
    username: String,
    /// Prompted for when omitted.
    #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
}

#[derive(Args, Debug)]
struct PasswordArgs {
    #[arg(long)]
    current: Option<String>,
    #[arg(long)]
    new: Option<String>,
    #[arg(long)]
    confirm: Option<String>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive match on title or description.
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    priority: Option<Priority>,
    /// all, completed, or pending.
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    /// Ask the server to order by priority.
    #[arg(long)]
    by_priority: bool,
}

#[derive(Args, Debug)]
struct AddArgs {
    title: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, default_value = "medium")]
    priority: Priority,
    /// Local date-time, e.g. 2025-06-01T09:00:00.
    #[arg(long)]
    due: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: i64,
    #[arg(long)]
    title: Option<String>,
    /// Empty string clears it.
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    priority: Option<Priority>,
    /// Empty string clears it.
    #[arg(long)]
    due: Option<String>,
    #[arg(long)]
    completed: Option<bool>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    completed: Option<bool>,
    #[arg(long)]
    priority: Option<Priority>,
    /// Field to sort by, e.g. dueDate.
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long)]
    desc: bool,
}

/// Reports session expiry on stderr; a terminal has nowhere to navigate to.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        if route == LOGIN_ROUTE {
            eprintln!("session expired; run `todo login`");
        } else {
            tracing::debug!(%route, "navigation ignored");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::from_env_with_override(cli.api_url.as_deref())?;
    let tokens = Arc::new(FileTokenStore::from_env()?);
    tracing::debug!(path = %tokens.path().display(), "token store");
    let app = AppContext::new(&config, tokens, Arc::new(TerminalNavigator)).map_err(CliError::Client)?;
    app.session.bootstrap().await;

    let out = Output { json: cli.json };
    match cli.command {
        Command::Register(args) => register(&app, out, args).await,
        Command::Login(args) => login(&app, out, args).await,
        Command::Logout => {
            app.session.logout().await;
            out.text("logged out");
            Ok(())
        }
        Command::Whoami => {
            let user = require_user(&app)?;
            out.value(&user, || render::user_summary(&user))
        }
        Command::Profile(args) => update_profile(&app, out, args).await,
        Command::Password(args) => change_password(&app, out, args).await,
        Command::DeleteAccount { yes } => delete_account(&app, out, yes).await,
        Command::List(args) => list(&app, out, args).await,
        Command::Show { id } => {
            require_user(&app)?;
            let todo = app.todos.get(id).await.map_err(api("load todo"))?;
            out.value(&todo, || render::todo_detail(&todo))
        }
        Command::Add(args) => {
            require_user(&app)?;
            let request = CreateTodoRequest {
                title: args.title,
                description: args.description,
                priority: args.priority,
                due_date: args.due,
            };
            let todo = app.todos.create(&request).await.map_err(api("create todo"))?;
            out.value(&todo, || render::todo_line(&todo))
        }
        Command::Edit(args) => edit(&app, out, args).await,
        Command::Toggle { id } => {
            require_user(&app)?;
            let todo = app.todos.toggle(id).await.map_err(api("update todo"))?;
            out.value(&todo, || render::todo_line(&todo))
        }
        Command::Done { id } => {
            require_user(&app)?;
            let todo = app.todos.mark_completed(id).await.map_err(api("update todo"))?;
            out.value(&todo, || render::todo_line(&todo))
        }
        Command::Undo { id } => {
            require_user(&app)?;
            let todo = app.todos.mark_incomplete(id).await.map_err(api("update todo"))?;
            out.value(&todo, || render::todo_line(&todo))
        }
        Command::Rm { id } => {
            require_user(&app)?;
            app.todos.delete(id).await.map_err(api("delete todo"))?;
            out.text(&format!("deleted #{id}"));
            Ok(())
        }
        Command::ClearCompleted => {
            require_user(&app)?;
            app.todos.delete_completed().await.map_err(api("delete completed todos"))?;
            out.text("completed todos deleted");
            Ok(())
        }
        Command::Search(args) => search(&app, out, args).await,
        Command::Overdue => {
            require_user(&app)?;
            let todos = app.todos.overdue().await.map_err(api("load overdue todos"))?;
            out.value(&todos, || render::results(&todos, "No overdue todos."))
        }
        Command::Stats => {
            require_user(&app)?;
            let stats = app.todos.stats().await.map_err(api("load stats"))?;
            out.value(&stats, || render::stats_summary(&stats))
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn value<T: Serialize>(self, value: &T, text: impl FnOnce() -> String) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    /// Status line; suppressed in JSON mode.
    fn text(self, line: &str) {
        if !self.json {
            println!("{line}");
        }
    }
}

fn require_user(app: &AppContext) -> Result<User, CliError> {
    let state = app.session.snapshot();
    if should_redirect_unauth(&state) {
        return Err(CliError::NotLoggedIn);
    }
    state.user.ok_or(CliError::NotLoggedIn)
}

// =============================================================================
// ACCOUNT
// =============================================================================

async fn register(app: &AppContext, out: Output, args: RegisterArgs) -> Result<(), CliError> {
    let request = RegisterRequest {
        username: args.username,
        email: args.email,
        password: prompt::secret(args.password, "Password: ")?,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let user = app.session.register(&request).await.map_err(api("register"))?;
    out.value(&user, || format!("registered and logged in as {}", user.display_name()))
}

async fn login(app: &AppContext, out: Output, args: LoginArgs) -> Result<(), CliError> {
    let request = LoginRequest { username: args.username, password: prompt::secret(args.password, "Password: ")? };
    let user = app.session.login(&request).await.map_err(api("log in"))?;
    out.value(&user, || format!("logged in as {}", user.display_name()))
}

async fn update_profile(app: &AppContext, out: Output, args: ProfileArgs) -> Result<(), CliError> {
    require_user(app)?;
    let request = UpdateUserRequest {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        ..UpdateUserRequest::default()
    };
    if request == UpdateUserRequest::default() {
        return Err(CliError::Invalid("nothing to update; pass --email, --first-name or --last-name".to_owned()));
    }
    let user = app.session.auth().update_user(&request).await.map_err(api("update profile"))?;
    app.session.update_user_profile(user.clone());
    out.value(&user, || "Profile updated successfully!".to_owned())
}

async fn change_password(app: &AppContext, out: Output, args: PasswordArgs) -> Result<(), CliError> {
    require_user(app)?;
    let current = prompt::secret(args.current, "Current password: ")?;
    let new = prompt::secret(args.new, "New password: ")?;
    let confirm = prompt::secret(args.confirm, "Confirm new password: ")?;
    prompt::validate_new_password(&new, &confirm).map_err(CliError::Invalid)?;

    let request = UpdateUserRequest {
        current_password: Some(current),
        new_password: Some(new),
        ..UpdateUserRequest::default()
    };
    let user = app.session.auth().update_user(&request).await.map_err(api("change password"))?;
    app.session.update_user_profile(user);
    out.text("Password changed successfully!");
    Ok(())
}

async fn delete_account(app: &AppContext, out: Output, yes: bool) -> Result<(), CliError> {
    require_user(app)?;
    if !yes {
        return Err(CliError::Invalid("this deletes the account and all its todos; pass --yes to confirm".to_owned()));
    }
    app.session.delete_account().await.map_err(api("delete account"))?;
    out.text("account deleted");
    Ok(())
}

// =============================================================================
// TODOS
// =============================================================================

async fn list(app: &AppContext, out: Output, args: ListArgs) -> Result<(), CliError> {
    require_user(app)?;
    let (todos, stats) =
        tokio::try_join!(app.todos.list(args.by_priority), app.todos.stats()).map_err(api("load todos"))?;
    let filter = TodoFilter { search: args.search, priority: args.priority, status: args.status };
    let shown = filter.apply(&todos);

    if out.json {
        return out.value(&shown, String::new);
    }
    println!("{}", render::stats_summary(&stats));
    println!();
    println!("{}", render::todo_list(&shown, todos.len()));
    Ok(())
}

async fn edit(app: &AppContext, out: Output, args: EditArgs) -> Result<(), CliError> {
    require_user(app)?;
    let current = app.todos.get(args.id).await.map_err(api("load todo"))?;
    let mut request = UpdateTodoRequest::from(&current);
    if let Some(title) = args.title {
        request.title = title;
    }
    if let Some(description) = args.description {
        request.description = Some(description).filter(|d| !d.is_empty());
    }
    if let Some(priority) = args.priority {
        request.priority = priority;
    }
    if let Some(due) = args.due {
        request.due_date = Some(due).filter(|d| !d.is_empty());
    }
    if let Some(completed) = args.completed {
        request.completed = completed;
    }
    if request.title.trim().is_empty() {
        return Err(CliError::Invalid("title must not be empty".to_owned()));
    }

    let todo = app.todos.update(args.id, &request).await.map_err(api("update todo"))?;
    out.value(&todo, || render::todo_detail(&todo))
}

async fn search(app: &AppContext, out: Output, args: SearchArgs) -> Result<(), CliError> {
    require_user(app)?;
    let params = SearchParams {
        title: args.title,
        completed: args.completed,
        priority: args.priority,
        sort_by: args.sort_by,
        sort_direction: args.desc.then_some(SortDirection::Desc),
    };
    let todos = app.todos.search(&params).await.map_err(api("search todos"))?;
    out.value(&todos, || render::results(&todos, "No todos found."))
}

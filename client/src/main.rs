//! `todo-sync` command-line client.
//!
//! The session is kept in a state file between invocations, so `login` once
//! and then run any other command.

use anyhow::{bail, Context};
use std::sync::Arc;
use todo_sync_client::{ClientConfig, TodoSync};
use todo_sync_core::environment::Navigator;
use todo_sync_core::types::{Todo, TodoId, TodoStatus};
use tracing_subscriber::EnvFilter;

/// State file used when `TODO_SYNC_STATE_FILE` is unset.
const DEFAULT_STATE_FILE: &str = ".todo-sync-session.json";

const USAGE: &str = "\
usage: todo-sync <command>

commands:
  register <username> <email> <password>
  login <email> <password>
  whoami
  list [page]
  show <id>
  add <title> [description]
  edit <id> <title> [description]
  done <id>
  undo <id>
  rm <id>
  logout";

/// Tells the user to log in again when the service rejects the token.
struct LoginHint;

impl Navigator for LoginHint {
    fn navigate(&self, route: &str) {
        eprintln!("Session expired. Log in again ({route}).");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::from_env().context("invalid configuration")?;
    if config.state_file.is_none() {
        config.state_file = Some(DEFAULT_STATE_FILE.into());
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let sync = TodoSync::from_config(&config, Arc::new(LoginHint));
    run(&sync, &args).await
}

async fn run(sync: &TodoSync, args: &[String]) -> anyhow::Result<()> {
    let arg = |index: usize| args.get(index).map(String::as_str);
    let id = |index: usize| -> anyhow::Result<TodoId> {
        let raw = arg(index).context("missing todo id")?;
        let id = raw.parse().with_context(|| format!("invalid todo id {raw:?}"))?;
        Ok(TodoId(id))
    };

    match (arg(0), args.len()) {
        (Some("register"), 4) => {
            let user = sync.sign_up(&args[1], &args[2], &args[3]).await?;
            println!("Registered and logged in as {} <{}>", user.username, user.email);
        }
        (Some("login"), 3) => {
            let user = sync.sign_in(&args[1], &args[2]).await?;
            println!("Logged in as {} <{}>", user.username, user.email);
        }
        (Some("whoami"), 1) => {
            if !sync.session().is_authenticated() {
                bail!("not logged in");
            }
            let user = sync.refresh_profile().await?;
            println!("{} <{}> (id {})", user.username, user.email, user.id);
        }
        (Some("list"), 1 | 2) => {
            let page = match arg(1) {
                Some(raw) => raw.parse().with_context(|| format!("invalid page {raw:?}"))?,
                None => 1,
            };
            let page = sync.load_page(page).await?;
            for todo in sync.todos().todos() {
                print_todo(&todo);
            }
            if let Some(total) = page.total {
                println!("{} of {total} todos", page.items.len());
            }
        }
        (Some("show"), 2) => {
            let todo = sync.api().todo(id(1)?).await?;
            print_todo(&todo);
            if !todo.description.is_empty() {
                println!("    {}", todo.description);
            }
        }
        (Some("add"), 2 | 3) => {
            let todo = sync.create(&args[1], arg(2).unwrap_or_default()).await?;
            print_todo(&todo);
        }
        (Some("edit"), 3 | 4) => {
            let todo = sync.edit(id(1)?, &args[2], arg(3).unwrap_or_default()).await?;
            print_todo(&todo);
        }
        (Some("done"), 2) => {
            let todo = sync.set_status(id(1)?, TodoStatus::Completed).await?;
            print_todo(&todo);
        }
        (Some("undo"), 2) => {
            let todo = sync.set_status(id(1)?, TodoStatus::Pending).await?;
            print_todo(&todo);
        }
        (Some("rm"), 2) => {
            let id = id(1)?;
            sync.delete(id).await?;
            println!("Deleted {id}");
        }
        (Some("logout"), 1) => {
            sync.sign_out();
            println!("Logged out");
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}

fn print_todo(todo: &Todo) {
    let mark = if todo.is_completed() { 'x' } else { ' ' };
    println!("[{mark}] {:>4}  {}", todo.id.0, todo.title);
}

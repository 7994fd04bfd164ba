//! Handler functions for user CLI commands.
//!
//! Each handler works against any [`UserStore`], so the same code runs
//! against MongoDB in production and [`MemoryStore`](stocktake_store::MemoryStore)
//! in tests.

use std::io::{BufRead, Write};

use stocktake_auth::password;
use stocktake_core::{NewUser, Role, User};
use stocktake_store::UserStore;

use crate::cli::UserAction;
use crate::{Error, Result};

/// Handle a user subcommand, reading confirmations from stdin.
pub async fn handle_user_command(store: &dyn UserStore, action: UserAction) -> Result<()> {
    match action {
        UserAction::Add {
            username,
            name,
            role,
            password,
        } => {
            let password = require_password(password)?;
            let user = add_user(store, &username, &name, role, password, password::DEFAULT_COST)
                .await?;
            println!("Created {} ({})", user.username, user.role);
        }
        UserAction::List => {
            let users = store.list().await?;
            print!("{}", format_user_table(&users));
        }
        UserAction::Delete { username, yes } => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            if delete_user(store, &username, yes, &mut stdin.lock(), &mut stdout).await? {
                println!("Deleted {username}");
            } else {
                println!("Aborted");
            }
        }
        UserAction::Passwd { username, password } => {
            let password = require_password(password)?;
            change_password(store, &username, password, password::DEFAULT_COST).await?;
            println!("Password updated for {username}");
        }
    }
    Ok(())
}

fn require_password(password: Option<String>) -> Result<String> {
    password.filter(|p| !p.is_empty()).ok_or_else(|| {
        Error::command("A password is required: pass --password or set STOCKTAKE_USER_PASSWORD")
    })
}

/// Hash the password and insert a new user.
pub async fn add_user(
    store: &dyn UserStore,
    username: &str,
    name: &str,
    role: Role,
    password: String,
    cost: u32,
) -> Result<User> {
    let hash = password::hash_password_async(password, cost).await?;
    let new_user = NewUser::new(username, name, role, hash)?;
    let user = store.insert(new_user).await?;
    log::info!("Created user {} with role {}", user.username, user.role);
    Ok(user)
}

/// Delete a user, asking for confirmation unless `confirmed`.
///
/// Returns `Ok(false)` when the operator declines. An unknown user is an error.
pub async fn delete_user<R: BufRead, W: Write>(
    store: &dyn UserStore,
    username: &str,
    confirmed: bool,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    if store.find_by_username(username).await?.is_none() {
        return Err(Error::command(format!("No such user: {username}")));
    }

    if !confirmed {
        write!(output, "Delete user '{username}'? Type 'yes' to confirm: ")?;
        output.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if answer.trim() != "yes" {
            return Ok(false);
        }
    }

    if !store.delete_by_username(username).await? {
        return Err(Error::command(format!("No such user: {username}")));
    }
    log::info!("Deleted user {username}");
    Ok(true)
}

/// Replace a user's password.
pub async fn change_password(
    store: &dyn UserStore,
    username: &str,
    password: String,
    cost: u32,
) -> Result<()> {
    let hash = password::hash_password_async(password, cost).await?;
    if !store.set_password_hash(username, &hash).await? {
        return Err(Error::command(format!("No such user: {username}")));
    }
    log::info!("Changed password for {username}");
    Ok(())
}

/// Render users as a fixed-width table. Password hashes are never included.
pub fn format_user_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let headers = ["USERNAME", "NAME", "ROLE", "CREATED"];
    let rows: Vec<[String; 4]> = users
        .iter()
        .map(|u| {
            [
                u.username.clone(),
                u.name.clone(),
                u.role.to_string(),
                u.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 4]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    push_row(headers);
    for row in &rows {
        push_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]);
    }
    out
}

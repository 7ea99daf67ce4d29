//! Command-line probe for the user store.
//!
//! # Responsibility
//! - Open a database file through the pooled provider and run one CRUD
//!   command against it.
//! - Write rolling logs when `USERSTORE_LOG_DIR` is set.
//! - Keep output line-oriented and deterministic for quick sanity checks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use userstore_core::{
    open_pool, DbConfig, LogConfig, SqliteUserRepository, User, UserId, UserService,
};

/// Absolute directory for rolling log files; logging stays off when unset.
const LOG_DIR_ENV: &str = "USERSTORE_LOG_DIR";

/// `userstore` command arguments.
#[derive(Debug, Parser)]
#[command(name = "userstore", about = "Inspect and edit a user store database", version)]
struct Cli {
    /// SQLite database file; created when missing.
    #[arg(value_name = "db-path")]
    db_path: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every stored user.
    List,
    /// Print one user.
    Get { id: UserId },
    /// Insert a new user.
    Add { name: String, email: String },
    /// Replace name and email of an existing user.
    Rename {
        id: UserId,
        name: String,
        email: String,
    },
    /// Remove a user.
    Delete { id: UserId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(message) = LogConfig::new(log_dir).init() {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let pool = open_pool(&DbConfig::file(cli.db_path).with_max_connections(1))
        .map_err(|err| err.to_string())?;
    let service = UserService::new(SqliteUserRepository::new(pool));

    match cli.command {
        Command::List => {
            for user in service.try_find_all().map_err(|err| err.to_string())? {
                print_user(&user);
            }
        }
        Command::Get { id } => match service
            .try_find_user_by_id(id)
            .map_err(|err| err.to_string())?
        {
            Some(user) => print_user(&user),
            None => return Err(format!("user {id} not found")),
        },
        Command::Add { name, email } => {
            let saved = service
                .try_save(&User::new(name, email))
                .map_err(|err| err.to_string())?;
            print_user(&saved);
        }
        Command::Rename { id, name, email } => {
            let mut user = service
                .try_find_user_by_id(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("user {id} not found"))?;
            user.set_name(name);
            user.set_email(email);
            service.try_update(&user).map_err(|err| err.to_string())?;
            print_user(&user);
        }
        Command::Delete { id } => {
            let user = User::with_id(id, "", "");
            if !service.try_delete(&user).map_err(|err| err.to_string())? {
                return Err(format!("user {id} not found"));
            }
            println!("deleted id={id}");
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    println!(
        "id={} name={} email={} created_at={}",
        user.id(),
        user.name(),
        user.email(),
        user.created_at()
    );
}

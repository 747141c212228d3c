//! CLI administration tool for the admissions portal.
//!
//! Provides commands for managing accounts and their tokens, viewing
//! statistics, and performing database operations without HTTP API access.
//! The first admin account is created here.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (prompts for missing fields)
//! cargo run --bin admin -- account create --email admin@portal.ls --role admin
//!
//! # List all accounts
//! cargo run --bin admin -- account list
//!
//! # Revoke an account by id or email
//! cargo run --bin admin -- account revoke registrar@nul.ls
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `account create`): must match the server

use admissions_portal::application::services::AuthService;
use admissions_portal::domain::entities::{Account, Role};
use admissions_portal::domain::repositories::AccountRepository;
use admissions_portal::infrastructure::persistence::PgAccountRepository;
use admissions_portal::infrastructure::throttle::NullAttemptStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the admissions portal.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage accounts and their tokens
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create an account and print its token
    Create {
        #[arg(short, long)]
        email: Option<String>,

        /// Display name shown in the portal
        #[arg(short, long)]
        name: Option<String>,

        /// admin, institute, student or company
        #[arg(short, long)]
        role: Option<Role>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,

    /// Revoke an account's token
    Revoke {
        /// Account id or email
        id_or_email: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAccountRepository::new(Arc::new(pool.clone())));

    match action {
        AccountAction::Create {
            email,
            name,
            role,
            yes,
        } => {
            create_account(repo, email, name, role, yes).await?;
        }
        AccountAction::List => {
            list_accounts(repo).await?;
        }
        AccountAction::Revoke { id_or_email } => {
            revoke_account(repo, id_or_email).await?;
        }
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// The token is hashed with `TOKEN_SIGNING_SECRET` exactly as the server
/// does, and printed once.
async fn create_account(
    repo: Arc<PgAccountRepository>,
    email: Option<String>,
    name: Option<String>,
    role: Option<Role>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Account".bright_blue().bold());
    println!();

    let secret = std::env::var("TOKEN_SIGNING_SECRET")
        .context("TOKEN_SIGNING_SECRET must be set to issue tokens")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let display_name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Display name").interact_text()?,
    };

    let role = match role {
        Some(r) => r,
        None => {
            let roles = [Role::Admin, Role::Institute, Role::Student, Role::Company];
            let labels: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            let idx = Select::new()
                .with_prompt("Role")
                .items(&labels)
                .default(0)
                .interact()?;
            roles[idx]
        }
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    println!("  Name:  {}", display_name.cyan());
    println!("  Role:  {}", role.as_str().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = AuthService::new(repo, Arc::new(NullAttemptStore::new()), secret, 0);
    let (account, token) = service
        .create_account(&email, &display_name, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID:    {}", account.id.to_string().bright_black());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/me",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all accounts with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID  Email                          Role       Created            Status
///   ─────────────────────────────────────────────────────────────────────────
///   1   admin@portal.ls                admin      2026-01-15 10:30   ACTIVE
///   2   registrar@nul.ls               institute  2026-01-16 14:20   REVOKED
/// ```
async fn list_accounts(repo: Arc<PgAccountRepository>) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<10} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for account in &accounts {
        let status = if account.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<4} {:<30} {:<10} {:<18} {}",
            account.id.to_string().bright_black(),
            account.email.cyan(),
            account.role.as_str(),
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes an account by id or email with confirmation prompt.
async fn revoke_account(repo: Arc<PgAccountRepository>, id_or_email: String) -> Result<()> {
    println!("{}", "🔒 Revoke Account".bright_blue().bold());
    println!();

    let account: Option<Account> = match id_or_email.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_email(&id_or_email.trim().to_lowercase())
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let account = account.context("Account not found")?;

    if account.is_revoked() {
        println!("{}", "⚠️  This account is already revoked".yellow());
        return Ok(());
    }

    println!("  Account: {}", account.email.cyan());
    println!("  Role:    {}", account.role.as_str());
    println!("  ID:      {}", account.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this account?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke(account.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke account: {}", e))?;

    println!();
    println!("{}", "✅ Account revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays portal statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let roles: Vec<(String, i64)> = sqlx::query_as(
        "SELECT role, COUNT(*) FROM accounts WHERE revoked_at IS NULL GROUP BY role ORDER BY role",
    )
    .fetch_all(pool)
    .await?;

    for (role, count) in &roles {
        println!(
            "  {:<14} {}",
            format!("{role}s:"),
            count.to_string().bright_green().bold()
        );
    }

    let open_courses: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE admission_status = 'open'")
            .fetch_one(pool)
            .await?;

    let applications: Vec<(String, i64)> = sqlx::query_as(
        "SELECT status, COUNT(*) FROM applications GROUP BY status ORDER BY status",
    )
    .fetch_all(pool)
    .await?;

    let confirmed: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE confirmed_admission")
            .fetch_one(pool)
            .await?;

    let open_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE is_open")
        .fetch_one(pool)
        .await?;

    let job_applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_applications")
        .fetch_one(pool)
        .await?;

    println!();
    println!(
        "  Open courses:     {}",
        open_courses.to_string().bright_green().bold()
    );
    for (status, count) in &applications {
        println!(
            "  Applications ({status}): {}",
            count.to_string().bright_green().bold()
        );
    }
    println!(
        "  Confirmed:        {}",
        confirmed.to_string().bright_green().bold()
    );
    println!(
        "  Open jobs:        {}",
        open_jobs.to_string().bright_green().bold()
    );
    println!(
        "  Job applications: {}",
        job_applications.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

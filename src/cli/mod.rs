//! CLI module — Clap argument parser, output helpers, and the
//! interactive menu loop.
//!
//! The CLI is a thin shell over `SessionController`: it prompts for
//! input with `dialoguer`, calls one controller method per action, and
//! renders the `Result`.  No business logic lives here.

pub mod commands;
pub mod output;

use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{DataVaultError, Result};
use crate::session::SessionController;

/// DataVault CLI: encrypted data vault with per-user accounts.
#[derive(Parser)]
#[command(
    name = "datavault",
    about = "Encrypted data vault with per-user accounts and per-record secrets",
    version
)]
pub struct Cli {
    /// Vault data directory (overrides the config file)
    #[arg(long)]
    pub vault_dir: Option<String>,

    /// Directory containing .datavault.toml (default: current directory)
    #[arg(long, default_value = ".")]
    pub config_dir: String,
}

/// Menu entries shown before a user is logged in.
const GUEST_MENU: &[&str] = &["Register", "Login", "Quit"];

/// Menu entries shown during a session.
const SESSION_MENU: &[&str] = &[
    "Store", "Retrieve", "List", "Delete", "History", "Logout", "Quit",
];

/// Run the interactive menu loop until the user quits.
pub fn run(cli: &Cli) -> Result<()> {
    let config_dir = std::path::PathBuf::from(&cli.config_dir);
    let mut settings = Settings::load(&config_dir)?;
    if let Some(ref dir) = cli.vault_dir {
        settings.vault_dir = dir.clone();
    }

    let vault_dir = settings.vault_path(&config_dir);
    let mut controller = SessionController::open(&vault_dir, settings)?;

    loop {
        let (menu, header) = match controller.current_user() {
            Some(user) => (SESSION_MENU, format!("datavault [{user}]")),
            None => (GUEST_MENU, "datavault".to_string()),
        };

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(header)
            .items(menu)
            .default(0)
            .interact()
            .map_err(|e| DataVaultError::CommandFailed(format!("menu prompt: {e}")))?;

        let result = match menu[choice] {
            "Register" => commands::register::execute(&mut controller),
            "Login" => commands::login::execute(&mut controller),
            "Store" => commands::store::execute(&mut controller),
            "Retrieve" => commands::retrieve::execute(&mut controller),
            "List" => commands::list::execute(&mut controller),
            "Delete" => commands::delete::execute(&mut controller),
            "History" => commands::history::execute(&mut controller),
            "Logout" => commands::logout::execute(&mut controller),
            "Quit" => break,
            _ => unreachable!(),
        };

        if let Err(e) = result {
            output::error(&e.to_string());
            // Lockout ends the session; every other error just returns
            // to the menu.
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Shared prompt helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Prompt for a single line of input.
pub fn prompt_input(prompt: &str) -> Result<String> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| DataVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Prompt for a password without echo.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| DataVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during register).
///
/// Returns both entries so the controller can enforce the match itself.
pub fn prompt_new_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    let password = prompt_password("Choose password (8-12 chars, lowercase + digit + symbol)")?;
    let confirm = prompt_password("Confirm password")?;
    Ok((password, confirm))
}

//! Register — create a new user account.

use crate::cli::{output, prompt_input, prompt_new_password};
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let username = prompt_input("Username")?;
    let (password, confirm) = prompt_new_password()?;

    controller.register(&username, &password, &confirm)?;

    output::success(&format!("Account '{username}' created."));
    output::tip("Choose 'Login' to start a session.");
    Ok(())
}

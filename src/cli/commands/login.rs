//! Login — authenticate and start a session.

use crate::cli::{output, prompt_input, prompt_password};
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let username = prompt_input("Username")?;
    let password = prompt_password("Password")?;

    controller.login(&username, &password)?;

    output::success(&format!("Logged in as '{username}'."));
    Ok(())
}

//! Logout — end the current session.

use crate::cli::output;
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    controller.logout()?;
    output::success("Logged out.");
    Ok(())
}

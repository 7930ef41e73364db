//! History — show the current user's activity log.

use crate::cli::output;
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let entries = controller.history()?;
    output::print_history_table(&entries);
    Ok(())
}

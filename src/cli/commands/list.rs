//! List — show the current user's record metadata.

use crate::cli::output;
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let records = controller.list_records()?;
    output::print_records_table(&records);
    Ok(())
}

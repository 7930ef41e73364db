//! Delete — remove a record after re-verifying its secret.

use crate::cli::{output, prompt_input, prompt_password};
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let id = prompt_input("Record id")?;
    let secret = prompt_password("Record secret")?;

    controller.delete_record(&id, &secret)?;

    output::success(&format!("Record {id} deleted."));
    Ok(())
}

//! Store — encrypt and save a new record.

use crate::cli::{output, prompt_input, prompt_password};
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let name = prompt_input("Record name")?;
    let plaintext = prompt_input("Data to encrypt")?;
    let secret = prompt_password("Record secret (PIN/passkey)")?;

    let id = controller.store_record(&name, &plaintext, &secret)?;

    output::success(&format!("Record stored with id {id}."));
    output::warning("You need the same secret to retrieve it — there is no recovery.");
    Ok(())
}

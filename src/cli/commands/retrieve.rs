//! Retrieve — decrypt and display a record.

use crate::cli::{output, prompt_input, prompt_password};
use crate::errors::Result;
use crate::session::SessionController;

pub fn execute(controller: &mut SessionController) -> Result<()> {
    let id = prompt_input("Record id")?;
    let secret = prompt_password("Record secret")?;

    let plaintext = controller.retrieve_record(&id, &secret)?;

    output::success("Decrypted:");
    println!("{plaintext}");
    Ok(())
}

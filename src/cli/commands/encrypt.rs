//! `pwvault encrypt`: encrypt a secret for a user and print the blob.

use crate::cli::{load_settings, read_secret, require_user, Cli};
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, text: Option<&str>) -> Result<()> {
    let user = require_user(cli)?;
    let plaintext = read_secret(text, "Secret to encrypt")?;

    let crypto = load_settings()?.build_crypto()?;
    let blob = crypto.encrypt(&plaintext, user)?;
    println!("{blob}");

    Ok(())
}

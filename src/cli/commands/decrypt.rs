//! `pwvault decrypt`: decrypt a blob for a user and print the plaintext.

use crate::cli::{load_settings, require_user, Cli};
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, blob: &str) -> Result<()> {
    let user = require_user(cli)?;

    let crypto = load_settings()?.build_crypto()?;
    let plaintext = zeroize::Zeroizing::new(crypto.decrypt(blob.trim(), user)?);
    println!("{}", plaintext.as_str());

    Ok(())
}

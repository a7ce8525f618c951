//! `pwvault check`: verify the secure RNG and AES-GCM are usable.

use crate::cli::output;
use crate::crypto::VaultCrypto;
use crate::errors::Result;

/// Execute the `check` command.
pub fn execute() -> Result<()> {
    VaultCrypto::ensure_supported()?;
    output::success("Secure RNG, SHA-256 and AES-256-GCM are available.");
    Ok(())
}

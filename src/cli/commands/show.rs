//! `pwvault show`: decrypt one entry, or copy its password.

use console::style;

use crate::cli::output;
use crate::cli::{load_settings, require_user, store_path, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, copy: bool) -> Result<()> {
    let user = require_user(cli)?;
    let settings = load_settings()?;
    let crypto = settings.build_crypto()?;
    let store = VaultStore::open(&store_path(cli, &settings)?)?;

    let entry = store.get(&crypto, user, id)?;

    if copy {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PwVaultError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(entry.password.as_str())
            .map_err(|e| PwVaultError::Clipboard(e.to_string()))?;
        output::success(&format!("Password for '{}' copied to clipboard", entry.title));
        return Ok(());
    }

    println!("{}  {}", style("Title:   ").dim(), entry.title);
    println!("{}  {}", style("Username:").dim(), entry.username);
    println!("{}  {}", style("Password:").dim(), entry.password.as_str());
    if let Some(notes) = &entry.notes {
        println!("{}  {}", style("Notes:   ").dim(), notes);
    }
    println!(
        "{}  {}",
        style("Updated: ").dim(),
        entry.updated_at.format("%Y-%m-%d %H:%M:%S")
    );

    Ok(())
}

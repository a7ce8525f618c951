//! `pwvault delete`: remove an entry from the store.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_settings, require_user, store_path, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultStore;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let user = require_user(cli)?;
    let settings = load_settings()?;
    let mut store = VaultStore::open(&store_path(cli, &settings)?)?;

    let title = store.row(user, id)?.site_name.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| PwVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.delete(user, id)?;
    store.save()?;

    output::success(&format!("Deleted entry '{title}'"));

    Ok(())
}

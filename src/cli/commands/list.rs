//! `pwvault list`: display a user's entries in a table.

use crate::cli::output;
use crate::cli::{load_settings, require_user, store_path, Cli};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let user = require_user(cli)?;
    let settings = load_settings()?;
    let store = VaultStore::open_or_create(&store_path(cli, &settings)?)?;

    let entries = store.list(user);
    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    output::info(&format!("{} {noun}", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}

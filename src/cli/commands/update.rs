//! `pwvault update`: replace an entry's password.

use crate::cli::output;
use crate::cli::{load_settings, read_secret, require_user, store_path, Cli};
use crate::errors::Result;
use crate::generator;
use crate::vault::VaultStore;

/// Execute the `update` command.
pub fn execute(cli: &Cli, id: &str, generate: bool) -> Result<()> {
    let user = require_user(cli)?;
    let settings = load_settings()?;
    let crypto = settings.build_crypto()?;
    let mut store = VaultStore::open(&store_path(cli, &settings)?)?;

    // Fail before prompting if the entry does not exist.
    let title = store.row(user, id)?.site_name.clone();

    let password = if generate {
        generator::generate(&settings.generator)?.password
    } else {
        read_secret(None, &format!("New password for {title}"))?
    };

    store.update_password(&crypto, user, id, &password)?;
    store.save()?;

    output::success(&format!("Password for '{title}' updated"));

    Ok(())
}

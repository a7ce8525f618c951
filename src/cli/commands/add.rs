//! `pwvault add`: seal a new entry and store it.

use crate::cli::output;
use crate::cli::{load_settings, read_secret, require_user, store_path, Cli};
use crate::errors::Result;
use crate::generator;
use crate::vault::{EntryDraft, VaultStore};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    title: &str,
    username: &str,
    notes: Option<&str>,
    generate: bool,
) -> Result<()> {
    let user = require_user(cli)?;
    let settings = load_settings()?;

    let password = if generate {
        let generated = generator::generate(&settings.generator)?;
        output::info(&format!(
            "Generated a {}-character password ({:.2} bits)",
            settings.generator.length, generated.entropy_bits
        ));
        generated.password
    } else {
        read_secret(None, &format!("Password for {title}"))?
    };

    let draft = EntryDraft {
        title: title.to_string(),
        username: username.to_string(),
        password,
        notes: notes.map(str::to_string),
    };

    let crypto = settings.build_crypto()?;
    let mut store = VaultStore::open_or_create(&store_path(cli, &settings)?)?;
    let id = store.add(&crypto, user, &draft)?;
    store.save()?;

    output::success(&format!(
        "Entry '{}' added ({} total)",
        title,
        store.count_for(user)
    ));
    output::tip(&format!("Id: {id}"));

    Ok(())
}

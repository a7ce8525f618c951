//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PwVaultError, Result};
use crate::generator::GeneratorSettings;

/// pwvault CLI: client-side password vault encryption.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Client-side encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault owner id (as issued by your auth provider)
    #[arg(short, long, env = "PWVAULT_USER", global = true)]
    pub user: Option<String>,

    /// Entry store file (default: store_file from .pwvault.toml)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Check that this machine has a secure RNG and AES-GCM
    Check,

    /// Encrypt a secret and print the blob
    Encrypt {
        /// Plaintext (omit for piped stdin or a hidden prompt)
        text: Option<String>,
    },

    /// Decrypt a blob and print the plaintext
    Decrypt {
        /// Base64 blob produced by `encrypt`
        blob: String,
    },

    /// Generate a random password
    Generate {
        #[command(flatten)]
        options: GenerateArgs,
    },

    /// Add an entry to the store
    Add {
        /// Entry title (e.g. the site name)
        title: String,
        /// Account username
        #[arg(long, default_value = "")]
        username: String,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Generate the password instead of prompting for it
        #[arg(long)]
        generate: bool,
    },

    /// List your entries (passwords stay encrypted)
    List,

    /// Decrypt and show one entry
    Show {
        /// Entry id
        id: String,
        /// Copy the password to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Replace an entry's password
    Update {
        /// Entry id
        id: String,
        /// Generate the new password instead of prompting for it
        #[arg(long)]
        generate: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Generator overrides shared by `generate`.
#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// Password length (12-50)
    #[arg(short, long)]
    pub length: Option<usize>,
    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,
    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,
    /// Leave out digits
    #[arg(long)]
    pub no_numbers: bool,
    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl GenerateArgs {
    /// Apply these flags on top of configured defaults.
    pub fn apply(&self, base: GeneratorSettings) -> GeneratorSettings {
        GeneratorSettings {
            length: self.length.unwrap_or(base.length),
            uppercase: base.uppercase && !self.no_uppercase,
            lowercase: base.lowercase && !self.no_lowercase,
            numbers: base.numbers && !self.no_numbers,
            symbols: base.symbols && !self.no_symbols,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.pwvault.toml` from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// The user id from `--user` / `PWVAULT_USER`, validated.
pub fn require_user(cli: &Cli) -> Result<&str> {
    match cli.user.as_deref() {
        Some(user) => {
            validate_user_id(user)?;
            Ok(user)
        }
        None => Err(PwVaultError::CommandFailed(
            "no user id, pass --user <ID> or set PWVAULT_USER".into(),
        )),
    }
}

/// Build the full path to the entry store from CLI args and settings.
pub fn store_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.store {
        Some(path) => cwd.join(path),
        None => settings.store_path(&cwd),
    })
}

/// Read a secret from one of three sources: an inline argument, piped
/// stdin, or a hidden interactive prompt.
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn read_secret(inline: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Value provided on command line; it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        return Ok(buf);
    }

    let secret = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Validate that a user id is usable as key-derivation input.
///
/// Any non-empty string without control characters, at most 256 bytes.
pub fn validate_user_id(user: &str) -> Result<()> {
    if user.is_empty() {
        return Err(PwVaultError::CommandFailed("user id cannot be empty".into()));
    }

    if user.len() > 256 {
        return Err(PwVaultError::CommandFailed(
            "user id cannot exceed 256 bytes".into(),
        ));
    }

    if user.chars().any(char::is_control) {
        return Err(PwVaultError::CommandFailed(
            "user id is invalid: control characters are not allowed".into(),
        ));
    }

    Ok(())
}

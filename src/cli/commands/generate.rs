//! `pwvault generate`: print a random password and its entropy.

use console::style;

use crate::cli::{load_settings, GenerateArgs};
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(args: &GenerateArgs) -> Result<()> {
    let settings = args.apply(load_settings()?.generator);
    let generated = generator::generate(&settings)?;

    println!("{}", generated.password.as_str());
    eprintln!(
        "{}",
        style(format!(
            "{} characters, {:.2} bits of entropy",
            settings.length, generated.entropy_bits
        ))
        .dim()
    );

    Ok(())
}

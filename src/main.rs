use clap::Parser;
use pwvault::cli::{Cli, Commands};

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pwvault={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check => pwvault::cli::commands::check::execute(),
        Commands::Encrypt { ref text } => {
            pwvault::cli::commands::encrypt::execute(&cli, text.as_deref())
        }
        Commands::Decrypt { ref blob } => pwvault::cli::commands::decrypt::execute(&cli, blob),
        Commands::Generate { ref options } => pwvault::cli::commands::generate::execute(options),
        Commands::Add {
            ref title,
            ref username,
            ref notes,
            generate,
        } => pwvault::cli::commands::add::execute(
            &cli,
            title,
            username,
            notes.as_deref(),
            generate,
        ),
        Commands::List => pwvault::cli::commands::list::execute(&cli),
        Commands::Show { ref id, copy } => pwvault::cli::commands::show::execute(&cli, id, copy),
        Commands::Update { ref id, generate } => {
            pwvault::cli::commands::update::execute(&cli, id, generate)
        }
        Commands::Delete { ref id, force } => {
            pwvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Completions { shell } => pwvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        pwvault::cli::output::error(&e.user_message());
        std::process::exit(1);
    }
}

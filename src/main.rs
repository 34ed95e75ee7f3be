use clap::Parser;
use pwvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Add { ref user, ref url } => {
            pwvault::cli::commands::add::execute(&cli, user.as_deref(), url.as_deref())
        }
        Commands::Get {
            ref user,
            ref url,
            show,
        } => pwvault::cli::commands::get::execute(&cli, user.as_deref(), url.as_deref(), show),
        Commands::List => pwvault::cli::commands::list::execute(&cli),
        Commands::Update => pwvault::cli::commands::update::execute(&cli),
        Commands::Delete { force } => pwvault::cli::commands::delete::execute(&cli, force),
        Commands::Generate {
            length,
            ref charset,
            no_clipboard,
        } => pwvault::cli::commands::generate::execute(length, charset.as_deref(), no_clipboard),
        Commands::Completions { shell } => pwvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        pwvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for `get --show` and `generate`.
///
/// `PWVAULT_LOG` takes an `EnvFilter` directive and overrides `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "pwvault=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_env("PWVAULT_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

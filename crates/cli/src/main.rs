use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_auth::TokenService;
use folio_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "folio-cli", about = "Operator utilities for the folio API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mint a signed API token for a user id
    Token {
        /// User id to encode in the token payload
        #[arg(long)]
        user_id: i64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load folio settings")?;

    match cli.command {
        Command::Token { user_id } => {
            let tokens = TokenService::new(&settings.auth.secret);
            let token = tokens
                .issue(user_id)
                .with_context(|| "failed to sign token")?;

            println!("{token}");
        }
    }

    Ok(())
}

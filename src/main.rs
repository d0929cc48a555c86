use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use rolechat::{
    ChatForm, CompletionHandler, Credential, OpenAiClient, OpenAiConfig, Provider, Role,
    form::{help_panel, render_outcome},
    provider::BASE_URL_ENV_VAR,
};

#[derive(Parser)]
#[command(name = "rolechat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Chat completions API base URL
    #[arg(long, global = true, env = BASE_URL_ENV_VAR)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive form (default)
    Chat,
    /// Ask a single question using OPENAI_API_KEY
    Ask {
        /// Role to address the question to
        #[arg(short, long, default_value_t = Role::default())]
        role: Role,

        /// Your question or idea
        question: String,
    },
    /// Show usage steps and the available roles
    Roles,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "rolechat=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = OpenAiConfig::new();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let handler = CompletionHandler::new(OpenAiClient::new(config)?);
            ChatForm::new(handler)
                .with_fallback_credential(Credential::from_env(Provider::OpenAI))
                .run()
                .await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Ask { role, question } => {
            let handler = CompletionHandler::new(OpenAiClient::new(config)?);
            let credential = Credential::from_env(Provider::OpenAI).unwrap_or_default();
            let outcome = handler.generate(&credential, role, &question).await;

            if outcome.is_success() {
                println!("{}", render_outcome(&outcome));
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}", render_outcome(&outcome));
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Roles => {
            println!("{}", help_panel());
            Ok(ExitCode::SUCCESS)
        }
    }
}

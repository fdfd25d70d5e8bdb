use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "restreminder", version, about = "Work/rest interval reminder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interval timer in the foreground
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a fresh engine snapshot as JSON
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Status => commands::status::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotgraph::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true // the bare sync arguments only apply without a subcommand
)]
struct Cli {
    #[clap(flatten)]
    sync: SyncArgs,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with YouTube
    Auth,

    /// Load a Spotify playlist into FalkorDB
    Import(ImportArgs),

    /// Create a YouTube playlist from the songs stored in FalkorDB
    Export(ExportArgs),

    /// Show node counts of the graph
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Spotify playlist URL, URI or bare id (prompted when missing)
    pub url: Option<String>,

    /// Read the public web page instead of the Web API
    #[clap(long)]
    pub scrape: bool,

    /// Keep the existing graph instead of clearing it first
    #[clap(long)]
    pub keep: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Name of the YouTube playlist
    #[clap(long, short)]
    pub name: Option<String>,

    /// Only export the songs of this stored playlist
    #[clap(long)]
    pub playlist: Option<String>,

    /// Do not ask for confirmation
    #[clap(long, short)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    #[clap(flatten)]
    pub import: ImportArgs,

    /// Name of the YouTube playlist (defaults to the Spotify name)
    #[clap(long, short)]
    pub name: Option<String>,

    /// Do not ask for confirmation
    #[clap(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

impl From<ImportArgs> for cli::ImportOptions {
    fn from(args: ImportArgs) -> Self {
        Self {
            url: args.url,
            scrape: args.scrape,
            keep: args.keep,
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }
    let config = config::Config::from_env();

    let cli = Cli::parse();

    match cli.command {
        None => {
            let opts = cli::SyncOptions {
                import: cli.sync.import.into(),
                name: cli.sync.name,
                yes: cli.sync.yes,
            };
            cli::sync(&config, opts).await
        }
        Some(Command::Auth) => cli::auth(&config).await,
        Some(Command::Import(args)) => cli::import(&config, args.into()).await,
        Some(Command::Export(args)) => {
            let opts = cli::ExportOptions {
                name: args.name,
                playlist_id: args.playlist,
                yes: args.yes,
            };
            cli::export(&config, opts).await
        }
        Some(Command::Status) => cli::status(&config).await,
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

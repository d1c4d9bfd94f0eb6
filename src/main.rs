use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use scrobcli::{cli, config, error, warning};

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
)]
struct Cli {
    /// Path of the credential file holding the session key
    #[clap(long, global = true)]
    credentials: Option<PathBuf>,

    /// Without a subcommand the interactive prompt loop starts
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with the Last.fm API
    Auth(AuthOptions),

    /// Scrobble a track repeatedly without prompting
    Scrobble(ScrobbleOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Discard the stored session and authorize again
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ScrobbleOptions {
    /// Artist name
    #[clap(long)]
    pub artist: String,

    /// Track title
    #[clap(long)]
    pub track: String,

    /// Number of scrobbles; values outside 1..=1000 are clamped, not rejected
    #[clap(long, default_value_t = 1)]
    pub count: u32,

    /// Let the generated plays end this many days ago
    #[clap(long)]
    pub days_ago: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Some(Command::Completions(opt)) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let mut config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };
    if let Some(path) = cli.credentials {
        config = config.with_credentials_path(path);
    }

    let mut scrobbler = match cli::build_scrobbler(config).await {
        Ok(scrobbler) => scrobbler,
        Err(e) => error!("{}", e),
    };

    let result = match cli.command {
        None => cli::interactive(&mut scrobbler).await,
        Some(Command::Auth(opt)) => cli::auth(&mut scrobbler, opt.force).await,
        Some(Command::Scrobble(opt)) => cli::scrobble(
            &mut scrobbler,
            opt.artist,
            opt.track,
            opt.count,
            opt.days_ago,
        )
        .await
        .map(|_| ()),
        Some(Command::Completions(_)) => Ok(()),
    };

    if let Err(e) = result {
        log::error!("Error: {e}");
        error!("{}", e);
    }
}

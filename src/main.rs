use std::path::PathBuf;

use clap::{
    ArgAction, Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_backup::{
    cli,
    config::{DEFAULT_CACHE_PATH, DEFAULT_ENV_PATH, DEFAULT_EXPORT_DIR, Settings},
    error,
    source::Origin,
    utils,
};

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
  args_conflicts_with_subcommands = true // disallow mixing run options with `completions`
)]
struct Cli {
    #[clap(flatten)]
    options: RunOptions,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct RunOptions {
    /// Streaming service the tracks come from
    #[clap(long, default_value = "spotify", value_parser = parse_origin)]
    pub origin: Origin,

    /// Playlist URL, URI or id to back up, or `liked` for the liked songs; can be repeated
    #[clap(long, action = ArgAction::Append, num_args = 1)]
    pub save: Vec<String>,

    /// Backup file to upload as a new playlist
    #[clap(long)]
    pub upload: Option<PathBuf>,

    /// Name of the uploaded playlist (default: Backup_<DD_MM_YYYY>)
    #[clap(long)]
    pub name: Option<String>,

    /// Env file holding the Spotify client credentials
    #[clap(long, default_value = DEFAULT_ENV_PATH)]
    pub env_file: PathBuf,

    /// Token cache file
    #[clap(long, default_value = DEFAULT_CACHE_PATH)]
    pub cache_path: PathBuf,

    /// Directory backups are written to
    #[clap(long, default_value = DEFAULT_EXPORT_DIR)]
    pub export_dir: PathBuf,
}

impl From<RunOptions> for Settings {
    fn from(opt: RunOptions) -> Self {
        Settings {
            origin: opt.origin,
            save: utils::normalize_references(opt.save),
            upload_path: opt.upload,
            upload_name: opt.name,
            env_path: opt.env_file,
            cache_path: opt.cache_path,
            export_dir: opt.export_dir,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_origin(s: &str) -> Result<Origin, String> {
    s.parse::<Origin>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        None => {
            let settings = Settings::from(cli.options);
            if let Err(e) = cli::run(&settings).await {
                error!("{}", e);
            }
        }
    }
}

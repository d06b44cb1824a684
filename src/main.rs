use std::{collections::BTreeSet, path::PathBuf};

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lyricorp::{cli, config, utils, warning};

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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Collect albums, tracks, lyrics and the corpus in one go
    Run(ArtistArgs),

    /// Collect the album table
    Albums(ArtistArgs),

    /// Build the track table from the album table
    Tracks(ArtistArgs),

    /// Resolve lyrics and songwriter credits for the track table
    Lyrics(ArtistArgs),

    /// Build the corpus from the lyrics table
    Corpus(CorpusArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct ArtistArgs {
    /// Artist name exactly as spelled on genius.com
    #[clap(long)]
    pub artist: String,

    /// Genius artist id (looked up by name when omitted)
    #[clap(long)]
    pub artist_id: Option<u64>,

    /// Comma separated songwriter credits that also count as the artist
    /// (band members, pseudonyms, writing partnerships)
    #[clap(long, value_parser = utils::parse_band_members)]
    pub band_members: Option<BTreeSet<String>>,

    /// Genius client access token (defaults to GENIUS_ACCESS_TOKEN)
    #[clap(long)]
    pub token: Option<String>,

    /// Directory the CSV tables are written to
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

impl From<ArtistArgs> for cli::ArtistOptions {
    fn from(args: ArtistArgs) -> Self {
        Self {
            artist: args.artist,
            artist_id: args.artist_id,
            band_members: args.band_members,
            token: args.token,
            output_dir: args.output_dir,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Artist name the lyrics table was generated for
    #[clap(long)]
    pub artist: String,

    /// Directory holding the CSV tables
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file, using process environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => cli::run(args.into()).await,
        Command::Albums(args) => cli::albums(args.into()).await,
        Command::Tracks(args) => cli::tracks(args.into()).await,
        Command::Lyrics(args) => cli::lyrics(args.into()).await,
        Command::Corpus(args) => cli::corpus(args.artist, args.output_dir).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

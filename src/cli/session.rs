use std::io::{self, Write};

use colored::Colorize;

use crate::{
    Res,
    cli::ArtistOptions,
    config::{self, Settings},
    genius::{GeniusClient, LyricsProvider},
    info,
    pipeline::{ArtistIdentity, Session},
    tables::TablePaths,
};

/// Everything a networked command needs, prepared once per invocation.
pub(crate) struct Context {
    pub client: GeniusClient,
    pub session: Session,
    pub paths: TablePaths,
}

pub(crate) async fn prepare(opts: &ArtistOptions) -> Res<Context> {
    let mut settings = Settings::from_env();
    if let Some(dir) = &opts.output_dir {
        settings.output_dir = dir.clone();
    }

    let token = match opts.token.clone().or_else(config::genius_token) {
        Some(token) => token,
        None => prompt_token()?,
    };

    let client = GeniusClient::new(&token, &settings)?;
    let artist = resolve_artist(&client, opts).await?;

    info!("Artist's name: {}", artist.name.yellow());
    info!("Artist's Genius id: {}", artist.id.to_string().yellow());
    if artist.is_band() {
        info!(
            "Songwriter credits also accepted for: {}",
            artist.aliases.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    let paths = TablePaths::new(&settings.output_dir, &artist.name);
    Ok(Context {
        client,
        session: Session::new(artist, settings),
        paths,
    })
}

/// Uses the id given on the command line, or looks the artist up by name.
///
/// The display name always stays as typed: it is what the flat song listing and
/// the lyrics search are matched against.
async fn resolve_artist<P: LyricsProvider + ?Sized>(
    provider: &P,
    opts: &ArtistOptions,
) -> Res<ArtistIdentity> {
    let id = match opts.artist_id {
        Some(id) => id,
        None => {
            info!("Looking up artist {} on genius.com...", opts.artist);
            match provider.find_artist(&opts.artist).await? {
                Some(found) => found.id,
                None => return Err(format!("Artist \"{}\" not found on genius.com", opts.artist).into()),
            }
        }
    };

    let aliases = opts.band_members.clone().unwrap_or_default();
    Ok(ArtistIdentity::new(&opts.artist, id).with_aliases(aliases))
}

fn prompt_token() -> Res<String> {
    print!("Please enter your Genius client access token: ");
    io::stdout().flush()?;

    let mut token = String::new();
    io::stdin().read_line(&mut token)?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err("A Genius access token is required (GENIUS_ACCESS_TOKEN or --token)".into());
    }
    Ok(token)
}

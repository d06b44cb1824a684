use colored::Colorize;

use crate::{
    Res,
    cli::{
        ArtistOptions,
        session::{self, Context},
    },
    error, info,
    pipeline::lyrics::resolve_lyrics,
    success,
    tables::{self, TablePaths},
};

/// Row counts of the three tables written by the lyrics stage.
pub(crate) struct LyricsExport {
    pub lyrics: usize,
    pub by_years: usize,
    pub not_by_artist: usize,
}

pub async fn lyrics(opts: ArtistOptions) {
    let ctx = match session::prepare(&opts).await {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot prepare session. Err: {}", e),
    };

    if let Err(e) = export_lyrics(&ctx).await {
        error!("Cannot resolve lyrics. Err: {}\nRun lyricorp tracks first.", e);
    }
}

pub(crate) async fn export_lyrics(ctx: &Context) -> Res<LyricsExport> {
    let artist = &ctx.session.artist.name;
    info!(
        "Generating lyrics of all songs for which {} is credited as the songwriter,",
        artist
    );
    info!(
        "and a list of songs released but not written by {} together with their writers.",
        artist
    );

    let tracks = tables::read_tracks(&ctx.paths.tracks).await?;
    let report = resolve_lyrics(&ctx.client, &ctx.session, &tracks).await?;

    let lyric_rows = tables::lyric_rows(&report);
    let year_rows = tables::year_rows(&report);
    let attribution_rows = tables::attribution_rows(&report);

    let paths: &TablePaths = &ctx.paths;
    tables::write_lyrics(&paths.lyrics, &lyric_rows).await?;
    tables::write_lyrics_by_years(&paths.lyrics_by_years, &year_rows).await?;
    tables::write_not_by_artist(&paths.not_by_artist, &attribution_rows).await?;

    let stats = &report.stats;
    info!(
        "{} rows looked up: {} matched, {} not available, {} rejected, {} timed out.",
        stats.rows, stats.matched, stats.missing, stats.rejected, stats.timed_out
    );
    success!(
        "Lyrics exported as {}",
        paths.lyrics.display().to_string().blue()
    );
    success!(
        "Lyrics by year exported as {}",
        paths.lyrics_by_years.display().to_string().blue()
    );
    success!(
        "Songs not written (but performed) by {} exported as {}",
        artist,
        paths.not_by_artist.display().to_string().blue()
    );

    Ok(LyricsExport {
        lyrics: lyric_rows.len(),
        by_years: year_rows.len(),
        not_by_artist: attribution_rows.len(),
    })
}

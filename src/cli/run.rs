use std::time::Instant;

use tabled::Table;

use crate::{
    cli::{
        ArtistOptions, albums::export_albums, corpus::export_corpus, lyrics::export_lyrics,
        session, tracks::export_tracks,
    },
    error, info, success, tables,
    types::ExportTableRow,
    warning,
};

pub async fn run(opts: ArtistOptions) {
    let start = Instant::now();

    let ctx = match session::prepare(&opts).await {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot prepare session. Err: {}", e),
    };

    let albums = match export_albums(&ctx).await {
        Ok(count) => count,
        Err(e) => error!("Cannot collect albums. Err: {}", e),
    };

    let tracks = match export_tracks(&ctx).await {
        Ok(count) => count,
        Err(e) => error!("Cannot collect tracks. Err: {}", e),
    };

    let lyrics = match export_lyrics(&ctx).await {
        Ok(export) => export,
        Err(e) => error!("Cannot resolve lyrics. Err: {}", e),
    };

    let corpus = match export_corpus(&ctx.paths, &ctx.session.artist.name).await {
        Ok(count) => count,
        Err(e) => error!("Cannot build corpus. Err: {}", e),
    };
    match tables::read_corpus(&ctx.paths.corpus).await {
        Ok(text) => info!(
            "Corpus holds {} words ({} characters)",
            text.split_whitespace().count(),
            text.chars().count()
        ),
        Err(e) => warning!("Cannot read back the corpus. Err: {}", e),
    }

    let paths = &ctx.paths;
    let rows = vec![
        ("albums", &paths.albums, albums),
        ("tracks", &paths.tracks, tracks),
        ("lyrics", &paths.lyrics, lyrics.lyrics),
        ("lyrics by year", &paths.lyrics_by_years, lyrics.by_years),
        ("not by artist", &paths.not_by_artist, lyrics.not_by_artist),
        ("corpus", &paths.corpus, corpus),
    ]
    .into_iter()
    .map(|(table, path, rows)| ExportTableRow {
        table: table.to_string(),
        file: path.display().to_string(),
        rows,
    })
    .collect::<Vec<_>>();

    println!("{}", Table::new(rows));
    info!("All files are stored in {}", ctx.session.settings.output_dir.display());
    success!(
        "Process completed in {:.2} minutes",
        start.elapsed().as_secs_f64() / 60.0
    );
}

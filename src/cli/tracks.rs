use colored::Colorize;

use crate::{
    Res,
    cli::{
        ArtistOptions,
        session::{self, Context},
    },
    error, info,
    pipeline::tracks::collect_tracks,
    success, tables,
};

pub async fn tracks(opts: ArtistOptions) {
    let ctx = match session::prepare(&opts).await {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot prepare session. Err: {}", e),
    };

    if let Err(e) = export_tracks(&ctx).await {
        error!("Cannot collect tracks. Err: {}\nRun lyricorp albums first.", e);
    }
}

pub(crate) async fn export_tracks(ctx: &Context) -> Res<usize> {
    info!(
        "Generating CSV file containing all tracks by albums, demos, EPs etc. released by {}",
        ctx.session.artist.name
    );

    let albums = tables::read_albums(&ctx.paths.albums).await?;
    let tracks = collect_tracks(&ctx.client, &ctx.session, &albums).await?;
    tables::write_tracks(&ctx.paths.tracks, &tracks).await?;

    success!(
        "List of all tracks exported ({} tracks) as {}",
        tracks.len(),
        ctx.paths.tracks.display().to_string().blue()
    );
    Ok(tracks.len())
}

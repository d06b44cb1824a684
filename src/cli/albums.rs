use colored::Colorize;

use crate::{
    Res,
    cli::{
        ArtistOptions,
        session::{self, Context},
    },
    error, info,
    pipeline::albums::collect_albums,
    success, tables,
};

pub async fn albums(opts: ArtistOptions) {
    let ctx = match session::prepare(&opts).await {
        Ok(ctx) => ctx,
        Err(e) => error!("Cannot prepare session. Err: {}", e),
    };

    if let Err(e) = export_albums(&ctx).await {
        error!("Cannot collect albums. Err: {}", e);
    }
}

pub(crate) async fn export_albums(ctx: &Context) -> Res<usize> {
    info!(
        "Generating CSV file containing all albums released by {}",
        ctx.session.artist.name
    );

    let albums = collect_albums(&ctx.client, &ctx.session).await?;
    tables::write_albums(&ctx.paths.albums, &albums).await?;

    success!(
        "List of albums exported ({} albums) as {}",
        albums.len(),
        ctx.paths.albums.display().to_string().blue()
    );
    Ok(albums.len())
}

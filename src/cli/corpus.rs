use std::path::PathBuf;

use colored::Colorize;

use crate::{
    Res,
    config::Settings,
    error,
    pipeline::corpus::build_corpus,
    success,
    tables::{self, TablePaths},
};

pub async fn corpus(artist: String, output_dir: Option<PathBuf>) {
    let dir = output_dir.unwrap_or_else(|| Settings::from_env().output_dir);
    let paths = TablePaths::new(&dir, &artist);

    if let Err(e) = export_corpus(&paths, &artist).await {
        error!("Cannot build corpus. Err: {}\nRun lyricorp lyrics first.", e);
    }
}

pub(crate) async fn export_corpus(paths: &TablePaths, artist: &str) -> Res<usize> {
    let rows = tables::read_lyrics(&paths.lyrics).await?;
    let corpus = build_corpus(&rows);
    tables::write_corpus(&paths.corpus, &paths.stem, &corpus).await?;

    success!(
        "Corpus for {} exported as {}",
        artist,
        paths.corpus.display().to_string().blue()
    );
    Ok(1)
}

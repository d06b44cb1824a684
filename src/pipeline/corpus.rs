use std::collections::BTreeSet;

use crate::{types::LyricRow, utils};

/// Distinct lyric blocks of a lyrics table, braces stripped.
///
/// Several rows (live takes, demos) often carry the same text; they collapse to
/// one block. Running this twice over the same table yields the same set.
pub fn distinct_blocks(rows: &[LyricRow]) -> BTreeSet<String> {
    rows.iter()
        .map(|row| utils::strip_braces(&row.lyrics))
        .collect()
}

/// Concatenates the distinct lyric blocks of a lyrics table into one corpus text.
pub fn build_corpus(rows: &[LyricRow]) -> String {
    distinct_blocks(rows).into_iter().collect::<Vec<_>>().concat()
}

mod common;

use std::{collections::BTreeSet, time::Duration};

use common::*;
use lyricorp::{
    config::MatchThresholds,
    pipeline::{
        ArtistIdentity, Session,
        albums::{album_from_entry, collect_albums},
        corpus::{build_corpus, distinct_blocks},
        lyrics::{Attribution, Verdict, attribute, resolve_lyrics, validate_match},
        tracks::collect_tracks,
    },
    types::{Album, AttributionEntry, LyricRow, Track, Writers},
};
use tokio::time::Instant;

// Helper function to create a track row
fn track(album_title: &str, song_title: &str, song_id: u64, year: &str) -> Track {
    Track {
        album_title: album_title.to_string(),
        song_title: song_title.to_string(),
        song_id,
        year: year.to_string(),
    }
}

fn lyric_row(song_title: &str, lyrics: &str) -> LyricRow {
    LyricRow {
        song_title: song_title.to_string(),
        lyrics: lyrics.to_string(),
    }
}

fn writers(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_album_from_entry() {
    let album = album_from_entry(&album_entry(7, "Blonde on Blonde", Some(1966)));
    assert_eq!(album.year, "1966");
    assert_eq!(album.title, "Blonde on Blonde");
    assert_eq!(album.id, 7);

    let undated = album_from_entry(&album_entry(8, "Séance", None));
    assert_eq!(undated.year, "N/A");
    assert_eq!(undated.title, "Seance");
}

#[tokio::test]
async fn test_collect_albums_pages_dedups_and_sorts() {
    let provider = FakeProvider {
        albums: vec![
            vec![
                album_entry(3, "Unreleased Sessions", None),
                album_entry(2, "Blood on the Tracks", Some(1975)),
            ],
            vec![
                album_entry(1, "Bringing It All Back Home", Some(1965)),
                album_entry(2, "Blood on the Tracks", Some(1975)),
            ],
        ],
        ..Default::default()
    };

    let albums = collect_albums(&provider, &session("Bob Dylan")).await.unwrap();

    assert_eq!(
        albums,
        vec![
            Album {
                year: "1965".to_string(),
                title: "Bringing It All Back Home".to_string(),
                id: 1
            },
            Album {
                year: "1975".to_string(),
                title: "Blood on the Tracks".to_string(),
                id: 2
            },
            Album {
                year: "N/A".to_string(),
                title: "Unreleased Sessions".to_string(),
                id: 3
            },
        ]
    );
}

#[tokio::test]
async fn test_collect_albums_same_title_different_id_kept() {
    let provider = FakeProvider {
        albums: vec![vec![
            album_entry(1, "Greatest Hits", Some(1967)),
            album_entry(2, "Greatest Hits", Some(1967)),
        ]],
        ..Default::default()
    };

    let albums = collect_albums(&provider, &session("Bob Dylan")).await.unwrap();
    assert_eq!(albums.len(), 2);
}

#[tokio::test]
async fn test_collect_albums_empty_listing() {
    let provider = FakeProvider::default();
    let albums = collect_albums(&provider, &session("Nobody")).await.unwrap();
    assert!(albums.is_empty());
}

#[tokio::test]
async fn test_collect_tracks_merges_album_and_flat_views() {
    let mut provider = FakeProvider {
        songs: vec![vec![
            song(10, "Song A", "Bob Dylan"),
            song(11, "Song B", "Bob Dylan"),
            // Only featured; primary artist differs
            song(12, "Song C", "The Band"),
        ]],
        ..Default::default()
    };
    provider.album_tracks.insert(
        1,
        vec![vec![
            track_entry(Some(song(10, "Song A", "Bob Dylan"))),
            track_entry(None),
        ]],
    );

    let albums = vec![Album {
        year: "1970".to_string(),
        title: "X".to_string(),
        id: 1,
    }];

    let tracks = collect_tracks(&provider, &session("Bob Dylan"), &albums)
        .await
        .unwrap();

    assert_eq!(
        tracks,
        vec![
            track("N/A", "Song A", 10, "N/A"),
            track("X", "Song A", 10, "1970"),
            track("N/A", "Song B", 11, "N/A"),
        ]
    );
}

#[tokio::test]
async fn test_collect_tracks_song_on_two_albums() {
    let mut provider = FakeProvider::default();
    provider.album_tracks.insert(
        1,
        vec![vec![track_entry(Some(song(10, "Knockin’ on Heaven’s Door", "Bob Dylan")))]],
    );
    provider.album_tracks.insert(
        2,
        vec![vec![track_entry(Some(song(10, "Knockin’ on Heaven’s Door", "Bob Dylan")))]],
    );

    let albums = vec![
        Album {
            year: "1973".to_string(),
            title: "Pat Garrett".to_string(),
            id: 1,
        },
        Album {
            year: "1974".to_string(),
            title: "Before the Flood".to_string(),
            id: 2,
        },
    ];

    let tracks = collect_tracks(&provider, &session("Bob Dylan"), &albums)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().all(|t| t.song_title == "Knockin' on Heaven's Door"));
}

#[tokio::test]
async fn test_collect_tracks_album_timeout_skips_album() {
    let mut provider = FakeProvider {
        songs: vec![vec![song(20, "Hurricane", "Bob Dylan")]],
        ..Default::default()
    };
    provider.album_timeouts.insert(1);
    provider.album_tracks.insert(
        2,
        vec![
            vec![track_entry(Some(song(21, "Isis", "Bob Dylan")))],
            vec![track_entry(Some(song(22, "Sara", "Bob Dylan")))],
        ],
    );

    let albums = vec![
        Album {
            year: "1974".to_string(),
            title: "Planet Waves".to_string(),
            id: 1,
        },
        Album {
            year: "1976".to_string(),
            title: "Desire".to_string(),
            id: 2,
        },
    ];

    let tracks = collect_tracks(&provider, &session("Bob Dylan"), &albums)
        .await
        .unwrap();

    assert_eq!(
        tracks,
        vec![
            track("N/A", "Hurricane", 20, "N/A"),
            track("Desire", "Isis", 21, "1976"),
            track("Desire", "Sara", 22, "1976"),
        ]
    );
}

#[test]
fn test_validate_match() {
    let thresholds = MatchThresholds::default();

    let exact = song_match("Song A", "Bob Dylan", "la la", &[]);
    assert_eq!(
        validate_match(&thresholds, "Song A", "Bob Dylan", &exact),
        Verdict::Accepted
    );

    // Title similarity 0.97 passes the 0.93 threshold
    let close = song_match("Simple Twist of Fat", "Bob Dylan", "la la", &[]);
    assert_eq!(
        validate_match(&thresholds, "Simple Twist of Fate", "Bob Dylan", &close),
        Verdict::Accepted
    );

    // Extra spaces around a slash still pass
    let spaced = song_match("Love Minus Zero / No Limit", "Bob Dylan", "la la", &[]);
    assert_eq!(
        validate_match(&thresholds, "Love Minus Zero/No Limit", "Bob Dylan", &spaced),
        Verdict::Accepted
    );

    let live = song_match("Visions of Johanna (Live)", "Bob Dylan", "la la", &[]);
    assert!(matches!(
        validate_match(&thresholds, "Visions of Johanna", "Bob Dylan", &live),
        Verdict::TitleMismatch(_)
    ));

    let other_artist = song_match("Song A", "Dylon", "la la", &[]);
    assert!(matches!(
        validate_match(&thresholds, "Song A", "Dylan", &other_artist),
        Verdict::ArtistMismatch(_)
    ));
}

#[test]
fn test_validate_match_threshold_is_monotonic() {
    let strict = MatchThresholds {
        title: 0.99,
        artist: 1.0,
    };
    let loose = MatchThresholds {
        title: 0.5,
        artist: 0.5,
    };

    let candidates = [
        song_match("Simple Twist of Fat", "Bob Dylan", "x", &[]),
        song_match("Visions of Johanna (Live)", "Bob Dylan", "x", &[]),
        song_match("Simple Twist of Fate", "Bob Dylon", "x", &[]),
    ];

    for found in &candidates {
        let strict_ok =
            validate_match(&strict, "Simple Twist of Fate", "Bob Dylan", found) == Verdict::Accepted;
        let loose_ok =
            validate_match(&loose, "Simple Twist of Fate", "Bob Dylan", found) == Verdict::Accepted;
        // Anything accepted by the stricter threshold is accepted by the looser one
        assert!(!strict_ok || loose_ok);
    }
}

#[test]
fn test_attribute() {
    let artist = ArtistIdentity::new("Bob Dylan", 1);

    assert_eq!(attribute(&artist, &BTreeSet::new()), Attribution::Unknown);
    assert_eq!(
        attribute(&artist, &writers(&["Bob Dylan", "Jacques Levy"])),
        Attribution::ByArtist
    );
    assert_eq!(
        attribute(&artist, &writers(&["Jerry Jeff Walker"])),
        Attribution::NotByArtist(writers(&["Jerry Jeff Walker"]))
    );

    let band = ArtistIdentity::new("The Beatles", 2)
        .with_aliases(writers(&["John Lennon", "Paul McCartney"]));
    assert!(band.is_band());
    assert_eq!(
        attribute(&band, &writers(&["Paul McCartney"])),
        Attribution::ByArtist
    );
}

#[tokio::test]
async fn test_resolve_lyrics_routes_by_attribution() {
    let mut provider = FakeProvider::default();
    provider.matches.insert(
        "Song A".to_string(),
        song_match("Song A", "Bob Dylan", "It's alright,\nMa", &["Bob Dylan"]),
    );
    provider.matches.insert(
        "Mr. Bojangles".to_string(),
        song_match("Mr. Bojangles", "Bob Dylan", "I knew a man", &["Jerry Jeff Walker"]),
    );
    provider.matches.insert(
        "Untitled".to_string(),
        song_match("Untitled", "Bob Dylan", "hum", &[]),
    );

    let tracks = vec![
        track("X", "Song A", 10, "1970"),
        track("Dylan", "Mr. Bojangles", 11, "1973"),
        track("N/A", "Untitled", 12, "N/A"),
        track("N/A", "Song Nobody Knows", 13, "N/A"),
    ];

    let report = resolve_lyrics(&provider, &session("Bob Dylan"), &tracks)
        .await
        .unwrap();

    assert_eq!(report.by_title.len(), 1);
    assert_eq!(
        report.by_title["Song A"],
        BTreeSet::from(["Its alright, Ma".to_string()])
    );
    assert!(report.by_year["1970"].contains("Its alright, Ma"));

    assert_eq!(
        report.not_by_artist["Mr. Bojangles"],
        vec![AttributionEntry {
            year: "1973".to_string(),
            album_title: "Dylan".to_string(),
            writers: Writers::Credited(writers(&["Jerry Jeff Walker"])),
        }]
    );
    assert_eq!(
        report.not_by_artist["Untitled"],
        vec![AttributionEntry {
            year: "N/A".to_string(),
            album_title: "N/A".to_string(),
            writers: Writers::Unknown,
        }]
    );

    assert_eq!(report.stats.rows, 4);
    assert_eq!(report.stats.matched, 3);
    assert_eq!(report.stats.missing, 1);
    assert_eq!(report.stats.by_artist, 1);
    assert_eq!(report.stats.not_by_artist, 1);
    assert_eq!(report.stats.unknown_writer, 1);
}

#[tokio::test]
async fn test_resolve_lyrics_rejects_wrong_artist() {
    let mut provider = FakeProvider::default();
    provider.matches.insert(
        "Song A".to_string(),
        song_match("Song A", "Dylon", "wrong song", &["Dylan"]),
    );

    let tracks = vec![track("X", "Song A", 10, "1970")];
    let report = resolve_lyrics(&provider, &session("Dylan"), &tracks)
        .await
        .unwrap();

    assert!(report.by_title.is_empty());
    assert!(report.not_by_artist.is_empty());
    assert_eq!(report.stats.rejected, 1);
}

#[tokio::test]
async fn test_resolve_lyrics_accepted_match_lands_in_exactly_one_table() {
    let mut provider = FakeProvider::default();
    provider.matches.insert(
        "Song A".to_string(),
        song_match("Song A", "Bob Dylan", "a", &["Bob Dylan"]),
    );
    provider.matches.insert(
        "Song B".to_string(),
        song_match("Song B", "Bob Dylan", "b", &["Someone Else"]),
    );
    provider.matches.insert(
        "Song C".to_string(),
        song_match("Song C", "Bob Dylan", "c", &[]),
    );

    let tracks = vec![
        track("X", "Song A", 1, "1970"),
        track("X", "Song B", 2, "1970"),
        track("X", "Song C", 3, "1970"),
    ];
    let report = resolve_lyrics(&provider, &session("Bob Dylan"), &tracks)
        .await
        .unwrap();

    for title in ["Song A", "Song B", "Song C"] {
        let in_lyrics = report.by_title.contains_key(title);
        let in_attribution = report.not_by_artist.contains_key(title);
        assert!(in_lyrics != in_attribution, "{} in both or neither", title);
    }

    let stats = &report.stats;
    assert_eq!(
        stats.by_artist + stats.not_by_artist + stats.unknown_writer,
        stats.matched - stats.rejected
    );
}

#[tokio::test]
async fn test_resolve_lyrics_band_aliases() {
    let mut provider = FakeProvider::default();
    provider.matches.insert(
        "Yesterday".to_string(),
        song_match("Yesterday", "The Beatles", "Yesterday", &["Paul McCartney"]),
    );
    provider.matches.insert(
        "Twist and Shout".to_string(),
        song_match("Twist and Shout", "The Beatles", "Shake it up baby", &["Phil Medley", "Bert Berns"]),
    );

    let tracks = vec![
        track("Help!", "Yesterday", 1, "1965"),
        track("Please Please Me", "Twist and Shout", 2, "1963"),
    ];
    let report = resolve_lyrics(
        &provider,
        &band_session("The Beatles", &["John Lennon", "Paul McCartney"]),
        &tracks,
    )
    .await
    .unwrap();

    assert!(report.by_title.contains_key("Yesterday"));
    assert_eq!(
        report.not_by_artist["Twist and Shout"][0].writers.to_string(),
        "Bert Berns; Phil Medley"
    );
}

#[tokio::test]
async fn test_resolve_lyrics_timeout_skips_row() {
    let mut provider = FakeProvider::default();
    provider.timeouts.insert("Song A".to_string());
    provider.matches.insert(
        "Song B".to_string(),
        song_match("Song B", "Bob Dylan", "b", &["Bob Dylan"]),
    );

    let tracks = vec![
        track("X", "Song A", 1, "1970"),
        track("X", "Song B", 2, "1970"),
    ];
    let report = resolve_lyrics(&provider, &session("Bob Dylan"), &tracks)
        .await
        .unwrap();

    assert_eq!(report.stats.timed_out, 1);
    assert!(report.by_title.contains_key("Song B"));
    assert_eq!(provider.searches.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_resolve_lyrics_provider_failure_aborts() {
    let mut provider = FakeProvider::default();
    provider.failures.insert("Song A".to_string());

    let tracks = vec![
        track("X", "Song A", 1, "1970"),
        track("X", "Song B", 2, "1970"),
    ];
    let result = resolve_lyrics(&provider, &session("Bob Dylan"), &tracks).await;

    assert!(result.is_err());
    assert_eq!(*provider.searches.lock().unwrap(), vec!["Song A".to_string()]);
}

#[tokio::test]
async fn test_resolve_lyrics_trims_row_fields() {
    let mut provider = FakeProvider::default();
    provider.matches.insert(
        "Song A".to_string(),
        song_match("Song A", "Bob Dylan", "a", &["Bob Dylan"]),
    );

    let tracks = vec![track(" X ", "  Song A ", 1, " 1970 ")];
    let report = resolve_lyrics(&provider, &session("Bob Dylan"), &tracks)
        .await
        .unwrap();

    assert!(report.by_title.contains_key("Song A"));
    assert!(report.by_year.contains_key("1970"));
}

// Helper function to create a provider and track table with `matched` resolvable
// rows, `missing` rows without a result and `timed_out` rows that time out
fn create_paced_rows(
    matched: usize,
    missing: usize,
    timed_out: usize,
) -> (FakeProvider, Vec<Track>) {
    let mut provider = FakeProvider::default();
    let mut tracks = Vec::new();

    for i in 0..matched {
        let title = format!("Matched {:02}", i);
        provider.matches.insert(
            title.clone(),
            song_match(&title, "Bob Dylan", "la la", &["Bob Dylan"]),
        );
        tracks.push(track("X", &title, i as u64, "1970"));
    }
    for i in 0..missing {
        tracks.push(track("X", &format!("Missing {:02}", i), 100 + i as u64, "1970"));
    }
    for i in 0..timed_out {
        let title = format!("Slow {:02}", i);
        provider.timeouts.insert(title.clone());
        tracks.push(track("X", &title, 200 + i as u64, "1970"));
    }

    // Interleave so unmatched rows sit between matched ones
    tracks.sort_by_key(|t| t.song_id % 7);
    (provider, tracks)
}

fn paced_session() -> Session {
    let mut paced = session("Bob Dylan");
    paced.settings.pause_every = 10;
    paced.settings.pause = Duration::from_secs(1);
    paced
}

#[tokio::test(start_paused = true)]
async fn test_resolve_lyrics_pauses_every_ten_matches() {
    let (provider, tracks) = create_paced_rows(21, 4, 3);
    let session = paced_session();

    let start = Instant::now();
    let report = resolve_lyrics(&provider, &session, &tracks).await.unwrap();

    assert_eq!(report.stats.matched, 21);
    assert_eq!(report.stats.missing, 4);
    assert_eq!(report.stats.timed_out, 3);
    // Pauses after the 10th and 20th match only
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_resolve_lyrics_unmatched_rows_do_not_pause() {
    let (provider, tracks) = create_paced_rows(9, 10, 10);
    let session = paced_session();

    let start = Instant::now();
    let report = resolve_lyrics(&provider, &session, &tracks).await.unwrap();

    assert_eq!(report.stats.rows, 29);
    assert_eq!(report.stats.matched, 9);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[test]
fn test_build_corpus_strips_braces_and_dedups() {
    let rows = vec![
        lyric_row("Song A", "{first} verse"),
        lyric_row("Song A (Live)", "first verse"),
        lyric_row("Song B", "second verse"),
    ];

    let blocks = distinct_blocks(&rows);
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| !b.contains('{') && !b.contains('}')));

    assert_eq!(build_corpus(&rows), "first versesecond verse");
}

#[test]
fn test_build_corpus_is_idempotent() {
    let rows = vec![
        lyric_row("Song B", "b b"),
        lyric_row("Song A", "a a"),
        lyric_row("Song C", "b b"),
    ];

    assert_eq!(build_corpus(&rows), build_corpus(&rows));
    assert_eq!(build_corpus(&[]), "");
}

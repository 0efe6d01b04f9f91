use trackgraph_core::{MatchOutcome, TrackGraph};

use crate::app::{BuildRequest, BuildResult};
use crate::colors::ColorScheme;

pub fn display_build_info(request: &BuildRequest, colors: &ColorScheme) {
    println!(
        "🎵 Building track graph around {}",
        colors.artist_name(&format!("\"{}\"", request.seed_artist))
    );

    if request.verbose {
        let config = &request.config;
        println!(
            "⚙️  {} similar artists, {} tracks per artist, market {}",
            colors.number(&config.similar_limit.to_string()),
            colors.number(&config.tracks_per_artist.to_string()),
            colors.number(&config.market)
        );
        println!(
            "⚡ Linking tracks sharing >= {} genres",
            colors.number(&config.min_genre_overlap.to_string())
        );

        let ignored: Vec<&str> = config.stoplist.ignored().collect();
        if ignored.is_empty() {
            println!("🏷️  Counting every genre");
        } else {
            println!("🏷️  Ignoring genres: {}", colors.genre(&ignored.join(", ")));
        }
    }

    println!("🔍 Fetching artists and tracks...");
}

pub fn display_build_results(result: &BuildResult, colors: &ColorScheme) {
    let graph = &result.graph;

    if result.verbose {
        println!("\n---\n");
        display_artists(graph, colors);
        println!("\n---\n");
    }

    println!(
        "{} {} tracks from {} artists, {} genre links",
        colors.success("✅"),
        colors.number(&format_number(graph.track_count())),
        colors.number(&graph.matched_artists.len().to_string()),
        colors.number(&format_number(graph.edge_count()))
    );

    if graph.matched_artists.len() == 1 {
        println!(
            "{}",
            colors.dimmed("No similar artist could be matched in the catalog, the graph only holds the seed's tracks")
        );
    }

    println!("📄 Graph written to {}", colors.path(&result.html_path.display().to_string()));
    if let Some(json_path) = &result.json_path {
        println!("📄 JSON written to {}", colors.path(&json_path.display().to_string()));
    }

    if result.verbose {
        println!(
            "{} Built in {} sec",
            colors.stats("📊"),
            colors.number(&format!("{:.3}", result.duration_secs))
        );
    }
}

fn display_artists(graph: &TrackGraph, colors: &ColorScheme) {
    println!(
        "Similar artists on Last.fm: {}",
        colors.number(&graph.similar_artists.len().to_string())
    );

    for (position, artist) in graph.matched_artists.iter().enumerate() {
        let track_names: Vec<String> = graph
            .tracks
            .iter()
            .filter(|track| &track.artist_name == artist)
            .map(|track| colors.track_name(&track.name).to_string())
            .collect();
        let genres = graph
            .tracks
            .iter()
            .find(|track| &track.artist_name == artist)
            .map(|track| track.artist_genres.join(", "))
            .unwrap_or_default();

        println!(
            "{:>2}. {} {}",
            position + 1,
            colors.artist_name(&format!("\"{}\"", artist)),
            colors.genre(&format!("[{}]", genres))
        );
        if !track_names.is_empty() {
            println!("    {}", track_names.join(" · "));
        }
    }

    for entry in &graph.artist_matches {
        if let Some(resolved) = entry.resolved.as_deref().filter(|resolved| *resolved != entry.candidate) {
            let note = match entry.outcome {
                MatchOutcome::AlreadyMatched => "already in graph",
                _ => "matched",
            };
            println!(
                "{}",
                colors.dimmed(&format!("\"{}\" {} as \"{}\"", entry.candidate, note, resolved))
            );
        }
    }

    let unmatched: Vec<&str> = graph.unmatched_candidates().collect();
    if !unmatched.is_empty() {
        println!("{} {}", colors.dimmed("Not found on Spotify:"), colors.dimmed(&unmatched.join(", ")));
    }
}

pub fn format_number(num: usize) -> String {
    let digits = num.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }

    formatted
}

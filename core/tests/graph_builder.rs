mod fixtures;

use fixtures::{StubCatalog, StubFinder, electronic_catalog};
use trackgraph_core::{
    ArtistMatch, GenreStoplist, GraphBuilder, GraphConfig, GraphError, MatchOutcome, Track, TrackGraph,
    build_track_graph,
};

fn track<'a>(graph: &'a TrackGraph, track_id: &str) -> &'a Track {
    graph.tracks.iter().find(|track| track.id == track_id).unwrap()
}

#[test]
fn test_seed_not_found_fails_without_graph() {
    let catalog = StubCatalog::new();
    let finder = StubFinder::new(&["Justice"]);

    let result = build_track_graph("nobody at all", &catalog, &finder, &GraphConfig::default());

    match result {
        Err(GraphError::ArtistNotFound(name)) => assert_eq!(name, "nobody at all"),
        other => panic!("expected ArtistNotFound, got {:?}", other),
    }
    // Nothing past seed resolution should run
    assert!(finder.calls.borrow().is_empty());
    assert!(catalog.genre_calls.borrow().is_empty());
    assert!(catalog.top_track_calls.borrow().is_empty());
}

#[test]
fn test_unresolved_candidate_is_dropped() {
    let catalog = StubCatalog::new()
        .with_artist("dp", "Daft Punk", &["french house", "electro"], 1)
        .with_artist("jus", "Justice", &["french house", "electro"], 1);
    let finder = StubFinder::new(&["Justice", "Not On Spotify"]);

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(2, 1, 1)).unwrap();

    assert_eq!(graph.seed_artist, "Daft Punk");
    assert_eq!(graph.similar_artists, vec!["Justice", "Not On Spotify"]);
    assert_eq!(graph.matched_artists, vec!["Daft Punk", "Justice"]);
    assert_eq!(graph.track_count(), 2);
    assert_eq!(graph.unmatched_candidates().collect::<Vec<_>>(), vec!["Not On Spotify"]);
}

#[test]
fn test_tracks_follow_seed_first_order() {
    let (catalog, finder) = electronic_catalog();

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 2, 1)).unwrap();

    let owners: Vec<&str> = graph.tracks.iter().map(|t| t.artist_id.as_str()).collect();
    assert_eq!(owners, vec!["dp", "dp", "jus", "jus", "cas", "cas"]);
    assert_eq!(graph.matched_artists, vec!["Daft Punk", "Justice", "Cassius"]);
}

#[test]
fn test_similar_lookup_uses_seed_input_and_limit() {
    let (catalog, finder) = electronic_catalog();

    build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(2, 1, 1)).unwrap();

    assert_eq!(*finder.calls.borrow(), vec![("daft punk".to_string(), 2)]);
    // Seed plus the two candidates requested
    assert_eq!(catalog.search_calls.borrow().len(), 3);
}

#[test]
fn test_zero_similar_limit_skips_finder() {
    let (catalog, finder) = electronic_catalog();

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(0, 3, 1)).unwrap();

    assert!(finder.calls.borrow().is_empty());
    assert_eq!(graph.matched_artists, vec!["Daft Punk"]);
    assert_eq!(graph.track_count(), 3);
    assert!(graph.edges.is_empty());
}

#[test]
fn test_zero_tracks_per_artist_gives_empty_graph() {
    let (catalog, finder) = electronic_catalog();

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 0, 1)).unwrap();

    assert_eq!(graph.matched_artists.len(), 3);
    assert!(graph.tracks.is_empty());
    assert!(graph.edges.is_empty());
    assert!(catalog.top_track_calls.borrow().is_empty());
}

#[test]
fn test_genres_fetched_once_per_artist() {
    let catalog = StubCatalog::new()
        .with_artist("dp", "Daft Punk", &["french house"], 4)
        .with_artist("jus", "Justice", &["french house"], 4)
        .with_alias("Daft Punk (alias)", "Daft Punk");
    let finder = StubFinder::new(&["Justice", "Daft Punk (alias)", "Justice"]);

    build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 4, 1)).unwrap();

    assert_eq!(catalog.genre_calls_for("dp"), 1);
    assert_eq!(catalog.genre_calls_for("jus"), 1);
    assert_eq!(catalog.genre_calls.borrow().len(), 2);
}

#[test]
fn test_candidate_matching_existing_artist_is_not_duplicated() {
    let catalog = StubCatalog::new()
        .with_artist("dp", "Daft Punk", &["french house"], 2)
        .with_alias("Thomas Bangalter & Guy-Manuel", "Daft Punk");
    let finder = StubFinder::new(&["Thomas Bangalter & Guy-Manuel"]);

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(1, 2, 1)).unwrap();

    assert_eq!(graph.matched_artists, vec!["Daft Punk"]);
    assert_eq!(graph.track_count(), 2);
    assert_eq!(
        graph.artist_matches,
        vec![ArtistMatch {
            candidate: "Thomas Bangalter & Guy-Manuel".to_string(),
            resolved: Some("Daft Punk".to_string()),
            outcome: MatchOutcome::AlreadyMatched,
        }]
    );
    assert_eq!(graph.unmatched_candidates().count(), 0);
}

#[test]
fn test_candidate_resolved_under_another_name_counts_as_matched() {
    let catalog = StubCatalog::new()
        .with_artist("dp", "Daft Punk", &["french house"], 1)
        .with_artist("jc", "Justice Crew", &["australian pop"], 1)
        .with_alias("Justice", "Justice Crew");
    let finder = StubFinder::new(&["Justice", "Not On Spotify"]);

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(2, 1, 1)).unwrap();

    assert_eq!(graph.matched_artists, vec!["Daft Punk", "Justice Crew"]);
    assert_eq!(graph.artist_matches.len(), 2);
    assert_eq!(graph.artist_matches[0].candidate, "Justice");
    assert_eq!(graph.artist_matches[0].resolved.as_deref(), Some("Justice Crew"));
    assert_eq!(graph.artist_matches[0].outcome, MatchOutcome::Added);
    assert_eq!(graph.artist_matches[1].resolved, None);
    assert_eq!(graph.unmatched_candidates().collect::<Vec<_>>(), vec!["Not On Spotify"]);
}

#[test]
fn test_graph_survives_json_round_trip() {
    let (catalog, finder) = electronic_catalog();

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 2, 1)).unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    let restored: TrackGraph = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, graph);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["artist_matches"][0]["outcome"], "added");
    assert!(value["edges"][0]["shared_genres"].is_array());
}

#[test]
fn test_shared_track_kept_under_first_artist() {
    let catalog = StubCatalog::new()
        .with_artist("dp", "Daft Punk", &["french house"], 0)
        .with_artist("pw", "Pharrell Williams", &["pop", "french house"], 0)
        .with_tracks("dp", &[("get-lucky", "Get Lucky"), ("aroundtheworld", "Around the World")])
        .with_tracks("pw", &[("happy", "Happy"), ("get-lucky", "Get Lucky")]);
    let finder = StubFinder::new(&["Pharrell Williams"]);

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(1, 5, 1)).unwrap();

    let ids: Vec<&str> = graph.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["get-lucky", "aroundtheworld", "happy"]);
    assert_eq!(track(&graph, "get-lucky").artist_id, "dp");
}

#[test]
fn test_market_and_limit_forwarded_to_catalog() {
    let (catalog, finder) = electronic_catalog();
    let config = GraphConfig::new(1, 2, 1).with_market("FR");

    build_track_graph("daft punk", &catalog, &finder, &config).unwrap();

    let calls = catalog.top_track_calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|(_, market, limit)| market == "FR" && *limit == 2));
}

#[test]
fn test_tracks_carry_artist_genre_snapshot() {
    let (catalog, finder) = electronic_catalog();

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 1, 1)).unwrap();

    let justice_track = graph.tracks.iter().find(|t| t.artist_id == "jus").unwrap();
    assert_eq!(justice_track.artist_name, "Justice");
    assert_eq!(
        justice_track.artist_genres,
        vec!["french house", "electro", "nu disco"]
    );
}

#[test]
fn test_edges_never_link_same_artist() {
    let (catalog, finder) = electronic_catalog();

    let graph = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 3, 1)).unwrap();

    assert!(!graph.edges.is_empty());
    for edge in &graph.edges {
        let first = track(&graph, &edge.track1_id);
        let second = track(&graph, &edge.track2_id);
        assert_ne!(first.artist_id, second.artist_id);
    }
}

#[test]
fn test_edges_respect_overlap_threshold_and_stoplist() {
    let (catalog, finder) = electronic_catalog();
    let stoplist = GenreStoplist::default();

    for min_overlap in 1..=3 {
        let graph = build_track_graph(
            "daft punk",
            &catalog,
            &finder,
            &GraphConfig::new(5, 2, min_overlap),
        )
        .unwrap();

        for edge in &graph.edges {
            assert!(edge.shared_genres.len() >= min_overlap);
            assert!(edge.shared_genres.iter().all(|genre| !stoplist.is_ignored(genre)));
        }
    }
}

#[test]
fn test_overlap_threshold_prunes_edges() {
    let (catalog, finder) = electronic_catalog();

    let loose = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 2, 1)).unwrap();
    let strict = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::new(5, 2, 2)).unwrap();

    // Justice and Cassius only share "french house"
    let links_justice_cassius = |graph: &trackgraph_core::TrackGraph| {
        graph
            .edges
            .iter()
            .any(|e| e.artist1 == "Justice" && e.artist2 == "Cassius")
    };
    assert!(links_justice_cassius(&loose));
    assert!(!links_justice_cassius(&strict));
    assert!(strict.edge_count() < loose.edge_count());
    // Daft Punk shares two genres with each of them: 2x2 pairs per artist
    assert_eq!(strict.edge_count(), 8);
    assert_eq!(loose.edge_count(), 12);
}

#[test]
fn test_house_funk_example_links_with_two_shared_genres() {
    let catalog = StubCatalog::new()
        .with_artist("a", "Artist A", &["house", "funk", "rock"], 1)
        .with_artist("b", "Artist B", &["house", "funk", "punk"], 1);
    let finder = StubFinder::new(&["Artist B"]);

    let graph = build_track_graph("artist a", &catalog, &finder, &GraphConfig::new(1, 1, 2)).unwrap();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges[0].shared_genres, vec!["funk", "house"]);
}

#[test]
fn test_only_stoplisted_genres_never_link() {
    let catalog = StubCatalog::new()
        .with_artist("a", "Artist A", &["rock"], 2)
        .with_artist("b", "Artist B", &["rock", "pop"], 2);
    let finder = StubFinder::new(&["Artist B"]);

    let graph = build_track_graph("artist a", &catalog, &finder, &GraphConfig::new(1, 2, 1)).unwrap();

    assert_eq!(graph.track_count(), 4);
    assert!(graph.edges.is_empty());
}

#[test]
fn test_custom_stoplist_changes_links() {
    let catalog = StubCatalog::new()
        .with_artist("a", "Artist A", &["rock"], 1)
        .with_artist("b", "Artist B", &["rock", "pop"], 1);
    let finder = StubFinder::new(&["Artist B"]);
    let config = GraphConfig::new(1, 1, 1).with_stoplist(GenreStoplist::empty());

    let graph = build_track_graph("artist a", &catalog, &finder, &config).unwrap();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges[0].shared_genres, vec!["rock"]);
}

#[test]
fn test_repeated_builds_are_identical() {
    let (catalog, finder) = electronic_catalog();
    let builder = GraphBuilder::new(&catalog, &finder);
    let config = GraphConfig::new(5, 3, 1);

    let first = builder.build("daft punk", &config).unwrap();
    let second = builder.build("daft punk", &config).unwrap();

    assert_eq!(first, second);
    // Each build fetches genres on its own
    assert_eq!(catalog.genre_calls_for("dp"), 2);
}

#[test]
fn test_similarity_failure_propagates() {
    let (catalog, _) = electronic_catalog();
    let finder = StubFinder::failing();

    let result = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::default());

    match result {
        Err(GraphError::Similarity(source)) => {
            assert_eq!(source.to_string(), "similarity service unavailable")
        }
        other => panic!("expected Similarity error, got {:?}", other),
    }
}

#[test]
fn test_catalog_failure_propagates() {
    let (mut catalog, finder) = electronic_catalog();
    catalog.fail_genres = true;

    let result = build_track_graph("daft punk", &catalog, &finder, &GraphConfig::default());

    assert!(matches!(result, Err(GraphError::Catalog(_))));
    assert!(!result.unwrap_err().is_artist_not_found());
}

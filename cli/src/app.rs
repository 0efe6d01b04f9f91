use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;
use trackgraph_core::{GenreStoplist, GraphConfig, TrackGraph, build_track_graph};

use crate::args::Args;
use crate::config::Credentials;
use crate::lastfm::LastFmClient;
use crate::render::{GraphRenderer, default_output_path, write_json};
use crate::spotify::SpotifyClient;

/// Everything needed to run one build, derived from the command line.
pub struct BuildRequest {
    pub seed_artist: String,
    pub config: GraphConfig,
    pub html_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub verbose: bool,
}

pub struct BuildResult {
    pub graph: TrackGraph,
    pub html_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub duration_secs: f64,
    pub verbose: bool,
}

impl BuildRequest {
    pub fn from_args(args: &Args, default_market: &str) -> Self {
        let mut stoplist = if args.keep_all_genres {
            GenreStoplist::empty()
        } else {
            GenreStoplist::default()
        };
        for genre in &args.ignore_genres {
            stoplist = stoplist.with_genre(genre.trim().to_lowercase());
        }

        let market = args
            .market
            .as_deref()
            .map(|market| market.trim().to_uppercase())
            .filter(|market| !market.is_empty())
            .unwrap_or_else(|| default_market.to_string());

        let config = GraphConfig::new(
            args.similar_limit,
            args.tracks_per_artist,
            usize::from(args.min_genre_overlap),
        )
        .with_market(market)
        .with_stoplist(stoplist);

        Self {
            seed_artist: args.artist.trim().to_string(),
            config,
            html_path: args
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(args.artist.trim())),
            json_path: args.json.clone(),
            verbose: args.verbose,
        }
    }
}

pub struct TrackGraphApp {
    catalog: SpotifyClient,
    finder: LastFmClient,
}

impl TrackGraphApp {
    pub fn new(credentials: &Credentials) -> Result<Self, Box<dyn Error>> {
        let catalog = SpotifyClient::new(
            credentials.spotify_client_id.clone(),
            credentials.spotify_client_secret.clone(),
        )?;
        let finder = LastFmClient::new(credentials.lastfm_api_key.clone())?;

        Ok(Self { catalog, finder })
    }

    pub fn run(&self, request: BuildRequest) -> Result<BuildResult, Box<dyn Error>> {
        let start_time = Instant::now();

        let graph = build_track_graph(&request.seed_artist, &self.catalog, &self.finder, &request.config)?;

        let renderer = GraphRenderer::new(format!("{} track graph", graph.seed_artist));
        renderer.write_html(&graph, &request.html_path)?;
        info!(path = %request.html_path.display(), "wrote graph page");

        if let Some(json_path) = &request.json_path {
            write_json(&graph, json_path)?;
            info!(path = %json_path.display(), "wrote graph json");
        }

        Ok(BuildResult {
            graph,
            html_path: request.html_path,
            json_path: request.json_path,
            duration_secs: start_time.elapsed().as_secs_f64(),
            verbose: request.verbose,
        })
    }
}

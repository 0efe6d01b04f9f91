use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "trackgraph")]
#[command(about = "Build a graph of tracks linked by shared genres around a seed artist")]
pub struct Args {
    /// Seed artist name
    #[arg(value_parser = parse_artist_name)]
    pub artist: String,

    /// Number of similar artists requested from Last.fm
    #[arg(short = 's', long, value_name = "COUNT", default_value = "12")]
    pub similar_limit: usize,

    /// Number of top tracks fetched per matched artist
    #[arg(short = 't', long, value_name = "COUNT", default_value = "5")]
    pub tracks_per_artist: usize,

    /// Minimum number of shared genres needed to link two tracks
    #[arg(
        short = 'm',
        long,
        value_name = "COUNT",
        default_value = "2",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub min_genre_overlap: u16,

    /// Spotify market for top tracks (defaults to TRACKGRAPH_MARKET or US)
    #[arg(long, value_name = "CODE")]
    pub market: Option<String>,

    /// Output HTML file (default: graphs/<artist>_graph.html)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the graph as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Extra genre to ignore when linking tracks (repeatable)
    #[arg(short = 'i', long = "ignore-genre", value_name = "GENRE")]
    pub ignore_genres: Vec<String>,

    /// Count generic genres (punk, rock, classic) as shared genres too
    #[arg(long)]
    pub keep_all_genres: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose mode - show build parameters and matched artists
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - only print the output path
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_artist_name(value: &str) -> Result<String, String> {
    let name = value.trim();
    if name.is_empty() {
        return Err("artist name cannot be blank".to_string());
    }
    Ok(name.to_string())
}

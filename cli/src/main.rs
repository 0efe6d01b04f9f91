use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use trackgraph::app::{BuildRequest, TrackGraphApp};
use trackgraph::colors::ColorScheme;
use trackgraph::display::{display_build_info, display_build_results};
use trackgraph::{Args, Credentials};
use trackgraph_core::GraphError;

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    let colors = ColorScheme::new(!args.no_color);

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(error) => exit_with_error(&colors, &error.to_string()),
    };

    let app = match TrackGraphApp::new(&credentials) {
        Ok(app) => app,
        Err(error) => exit_with_error(&colors, &error.to_string()),
    };

    let request = BuildRequest::from_args(&args, &credentials.market);
    if !args.quiet {
        display_build_info(&request, &colors);
    }

    let spinner = create_spinner(args.quiet);
    let outcome = app.run(request);
    spinner.finish_and_clear();

    match outcome {
        Ok(result) if args.quiet => println!("{}", result.html_path.display()),
        Ok(result) => display_build_results(&result, &colors),
        Err(error) => {
            let not_found = error
                .downcast_ref::<GraphError>()
                .is_some_and(GraphError::is_artist_not_found);
            if not_found && !args.quiet {
                eprintln!("{}", colors.dimmed("Check the spelling, or try the name as it appears on Spotify"));
            }
            exit_with_error(&colors, &error.to_string())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn create_spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Querying Last.fm and Spotify");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn exit_with_error(colors: &ColorScheme, message: &str) -> ! {
    eprintln!("{} {}", colors.error("❌ Error:"), message);
    std::process::exit(1);
}

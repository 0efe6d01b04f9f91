pub mod app;
pub mod args;
pub mod colors;
pub mod config;
pub mod display;
pub mod lastfm;
pub mod render;
pub mod spotify;

// Re-export commonly used items
pub use args::Args;
pub use config::Credentials;
pub use display::format_number;
pub use lastfm::LastFmClient;
pub use render::GraphRenderer;
pub use spotify::SpotifyClient;

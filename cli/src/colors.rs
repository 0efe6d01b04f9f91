use colored::*;

pub struct ColorScheme;

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if !use_colors {
            colored::control::set_override(false);
        }
        Self
    }

    pub fn artist_name(&self, text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn track_name(&self, text: &str) -> ColoredString {
        text.normal()
    }

    pub fn genre(&self, text: &str) -> ColoredString {
        text.magenta()
    }

    pub fn path(&self, text: &str) -> ColoredString {
        text.underline()
    }

    pub fn success(&self, text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(&self, text: &str) -> ColoredString {
        text.red()
    }

    pub fn dimmed(&self, text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn number(&self, text: &str) -> ColoredString {
        text.green()
    }

    pub fn stats(&self, text: &str) -> ColoredString {
        text.blue()
    }
}

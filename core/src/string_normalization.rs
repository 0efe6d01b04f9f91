use unidecode::unidecode;

pub fn clean_str(input: &str) -> String {
    unidecode(input) // Convert Unicode to ASCII
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// File-name friendly form of an artist name: "Daft Punk" -> "daft_punk".
pub fn to_file_stem(input: &str) -> String {
    clean_str(input)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("_")
}

/// Case- and accent-insensitive name comparison.
pub fn names_match(first: &str, second: &str) -> bool {
    clean_str(first) == clean_str(second)
}

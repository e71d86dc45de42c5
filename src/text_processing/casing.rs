//! Casing helpers for names and user queries

/// Upper-case exactly the first character, leaving the rest untouched
///
/// Used on the search box input and on creature names before display.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canonical form of a user query for use as a PokeAPI path segment
pub fn canonical_query(input: &str) -> String {
    input.trim().to_lowercase()
}

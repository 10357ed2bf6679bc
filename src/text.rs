//! Text normalization applied to card sides before they are stored.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for consistent storage and duplicate detection.
///
/// Composes to NFC, lowercases, and collapses runs of whitespace to a single
/// space with no leading or trailing whitespace.
pub fn normalize_text(input: &str) -> String {
  let composed: String = input.nfc().collect();
  composed
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// First sentence of a card side, used when presenting a card.
pub fn first_sentence(input: &str) -> &str {
  input.split('.').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lowercases_and_collapses_whitespace() {
    assert_eq!(normalize_text("  Hola   Mundo \n"), "hola mundo");
  }

  #[test]
  fn test_empty_input() {
    assert_eq!(normalize_text(""), "");
    assert_eq!(normalize_text("   \t "), "");
  }

  #[test]
  fn test_composes_accents() {
    // "e" + combining acute vs precomposed "é"
    let decomposed = "cafe\u{0301}";
    assert_eq!(normalize_text(decomposed), normalize_text("café"));
    assert_eq!(normalize_text(decomposed).chars().count(), 4);
  }

  #[test]
  fn test_uppercase_accents() {
    assert_eq!(normalize_text("ÁRBOL"), "árbol");
  }

  #[test]
  fn test_first_sentence() {
    assert_eq!(first_sentence("the house. A building to live in."), "the house");
    assert_eq!(first_sentence("  no period here "), "no period here");
    assert_eq!(first_sentence(""), "");
  }
}

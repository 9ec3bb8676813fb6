//! host::palette
//!
//! Display colors for language breakdowns.
//!
//! The first three positions keep their historical fixed colors. Every later
//! position derives a color from the language name, so any number of
//! languages gets a stable color without an unbounded palette table.

use sha2::{Digest, Sha256};

/// Fixed colors for the three largest languages.
const FIXED: [&str; 3] = ["#3572A5", "#89E051", "#FFC107"];

/// Color for the language at `index` in a size-ordered breakdown.
///
/// Deterministic: the same `(index, language)` always yields the same color.
pub fn color_for(index: usize, language: &str) -> String {
    match FIXED.get(index) {
        Some(color) => (*color).to_string(),
        None => {
            let digest = Sha256::digest(language.as_bytes());
            format!("#{}", hex::encode(&digest[..3]).to_uppercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_three_positions_are_fixed() {
        assert_eq!(color_for(0, "Python"), "#3572A5");
        assert_eq!(color_for(1, "Shell"), "#89E051");
        assert_eq!(color_for(2, "Anything"), "#FFC107");
    }

    #[test]
    fn later_positions_are_derived_and_stable() {
        let a = color_for(3, "Rust");
        let b = color_for(3, "Rust");
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
        assert!(a.starts_with('#'));
        assert!(a[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn derived_color_depends_on_name_not_index() {
        assert_eq!(color_for(3, "Rust"), color_for(9, "Rust"));
        assert_ne!(color_for(3, "Rust"), color_for(3, "Go"));
    }
}

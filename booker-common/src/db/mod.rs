//! Database models and queries
//!
//! Query functions are generic over `sqlx::Executor`, so handlers can run
//! them against the pool for reads or inside a transaction for writes.

pub mod artists;
pub mod init;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::*;
pub use models::*;

/// Case-insensitive substring match on a name
///
/// Folds case with full Unicode lowercasing, so "über" finds "Café Über".
/// The term is plain text; an empty term matches every name.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_ignores_case() {
        assert!(name_matches("The Musical Hop", "hop"));
        assert!(name_matches("The Musical Hop", "MUSICAL"));
        assert!(!name_matches("The Musical Hop", "jazz"));
    }

    #[test]
    fn test_name_matches_empty_term_matches_all() {
        assert!(name_matches("Anything", ""));
    }

    #[test]
    fn test_name_matches_folds_non_ascii() {
        assert!(name_matches("Café Über", "über"));
        assert!(name_matches("Café Über", "CAFÉ"));
        assert!(!name_matches("Cafe Uber", "über"));
    }

    #[test]
    fn test_name_matches_wildcards_are_literal() {
        assert!(!name_matches("Guns N Petals", "G_ns"));
        assert!(name_matches("100% Jazz", "0% j"));
    }
}

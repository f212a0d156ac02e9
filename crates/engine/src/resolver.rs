//! Fuzzy title resolution
//!
//! Matches a free-text query against the catalog's titles using normalized
//! Levenshtein similarity. A best match at or above the cutoff resolves to
//! that catalog entry; otherwise up to three suggestions at a relaxed
//! cutoff are offered.

use strsim::normalized_levenshtein;

/// Minimum similarity for a query to resolve to a catalog title
pub const MATCH_CUTOFF: f64 = 0.8;

/// Relaxed similarity cutoff for suggestions
pub const SUGGESTION_CUTOFF: f64 = 0.6;

/// Maximum number of suggestions returned for an unresolved query
pub const MAX_SUGGESTIONS: usize = 3;

/// Outcome of resolving a title query
#[derive(Debug, Clone, PartialEq)]
pub enum TitleMatch {
    /// The query resolved to a catalog entry
    Resolved {
        /// Catalog position of the matched entry
        index: usize,
        /// The matched catalog title
        title: String,
        /// Similarity score in [0, 1]
        score: f64,
    },
    /// No match above the cutoff; near misses at the relaxed cutoff,
    /// best first
    Suggestions(Vec<String>),
    /// Nothing close to the query
    NotFound,
}

/// Title resolver over the loaded catalog
///
/// Titles are normalized once at construction; resolution scores the query
/// against every catalog title. No side effects.
pub struct TitleResolver {
    titles: Vec<String>,
    normalized: Vec<String>,
}

impl TitleResolver {
    pub fn new(titles: Vec<String>) -> Self {
        let normalized = titles.iter().map(|t| normalize_title(t)).collect();
        Self { titles, normalized }
    }

    /// Resolve a query with the default cutoffs
    pub fn resolve(&self, query: &str) -> TitleMatch {
        self.resolve_with_cutoff(query, MATCH_CUTOFF)
    }

    /// Resolve a query with an explicit match cutoff
    pub fn resolve_with_cutoff(&self, query: &str, cutoff: f64) -> TitleMatch {
        let normalized_query = normalize_title(query);
        if normalized_query.is_empty() {
            return TitleMatch::NotFound;
        }

        let mut best_index = 0;
        let mut best_score = -1.0f64;
        let mut scores = Vec::with_capacity(self.normalized.len());

        for (index, candidate) in self.normalized.iter().enumerate() {
            let score = normalized_levenshtein(&normalized_query, candidate);
            scores.push(score);
            if score > best_score {
                best_score = score;
                best_index = index;
            }
        }

        if best_score >= cutoff {
            return TitleMatch::Resolved {
                index: best_index,
                title: self.titles[best_index].clone(),
                score: best_score,
            };
        }

        // Near misses at the relaxed cutoff, best first
        let mut near: Vec<(usize, f64)> = scores
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score >= SUGGESTION_CUTOFF)
            .collect();
        near.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        near.truncate(MAX_SUGGESTIONS);

        if near.is_empty() {
            TitleMatch::NotFound
        } else {
            TitleMatch::Suggestions(
                near.into_iter()
                    .map(|(index, _)| self.titles[index].clone())
                    .collect(),
            )
        }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

/// Normalize a title for fuzzy matching
fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resolver() -> TitleResolver {
        TitleResolver::new(vec![
            "Toy Story (1995)".to_string(),
            "Jumanji (1995)".to_string(),
            "Grumpier Old Men (1995)".to_string(),
            "Heat (1995)".to_string(),
        ])
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Toy Story (1995)"), "toy story 1995");
        assert_eq!(normalize_title("  HEAT!  "), "heat");
    }

    #[test]
    fn test_verbatim_title_resolves_to_itself() {
        let resolver = sample_resolver();
        match resolver.resolve("Toy Story (1995)") {
            TitleMatch::Resolved { index, title, score } => {
                assert_eq!(index, 0);
                assert_eq!(title, "Toy Story (1995)");
                assert!((score - 1.0).abs() < 1e-9);
            }
            other => panic!("Expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_small_edit_distance_resolves() {
        let resolver = sample_resolver();
        match resolver.resolve("Toy Stori (1995)") {
            TitleMatch::Resolved { title, .. } => assert_eq!(title, "Toy Story (1995)"),
            other => panic!("Expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_near_miss_gets_bounded_suggestions() {
        let resolver = sample_resolver();
        // "grumpier old men" vs "grumpier old men 1995": similarity ~0.76,
        // below the match cutoff but inside the suggestion band
        match resolver.resolve("Grumpier Old Men") {
            TitleMatch::Suggestions(suggestions) => {
                assert!(!suggestions.is_empty());
                assert!(suggestions.len() <= MAX_SUGGESTIONS);
                assert_eq!(suggestions[0], "Grumpier Old Men (1995)");
            }
            other => panic!("Expected Suggestions, got {:?}", other),
        }
    }

    #[test]
    fn test_unrelated_query_not_found() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("Zzyzx Quadrilogy XVII"), TitleMatch::NotFound);
    }

    #[test]
    fn test_empty_query_not_found() {
        let resolver = sample_resolver();
        assert_eq!(resolver.resolve("   "), TitleMatch::NotFound);
    }
}

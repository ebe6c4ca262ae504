//! Relevance scoring — deterministic heuristics over base similarity.
//!
//! Raw embedding similarity misranks short imperative phrases against
//! longer descriptive text, so a small, explainable rule set adjusts the
//! base score: an exact example match pins the score at 1.0, and partial
//! example / name / description / category-keyword matches add fixed
//! boosts. Everything here is a pure function of (query, similarity,
//! descriptor).

use crate::catalog::{CapabilityDescriptor, Category};

/// Query words that mark a system-monitoring request.
pub const SYSTEM_MONITORING_KEYWORDS: &[&str] =
    &["show", "get", "check", "display", "monitor", "system"];

/// Query words that mark an application-control request.
pub const APPLICATION_CONTROL_KEYWORDS: &[&str] =
    &["open", "launch", "start", "run", "execute"];

/// Score assigned when an example phrasing equals the query exactly.
pub const EXACT_MATCH_SCORE: f32 = 1.0;

const PARTIAL_EXAMPLE_BOOST: f32 = 0.3;
const NAME_TOKEN_BOOST: f32 = 0.2;
const DESCRIPTION_BOOST: f32 = 0.1;
const CATEGORY_KEYWORD_BOOST: f32 = 0.5;

/// True if any example phrasing equals the query, case-insensitively.
pub fn exact_example_match(query: &str, descriptor: &CapabilityDescriptor) -> bool {
    let query_lower = query.to_lowercase();
    descriptor
        .examples
        .iter()
        .any(|example| example.to_lowercase() == query_lower)
}

/// True if any example phrasing is a case-insensitive substring of the query.
pub fn partial_example_match(query: &str, descriptor: &CapabilityDescriptor) -> bool {
    let query_lower = query.to_lowercase();
    descriptor
        .examples
        .iter()
        .any(|example| query_lower.contains(&example.to_lowercase()))
}

/// True if the query contains any of the given keywords.
pub fn has_any_keyword(query: &str, keywords: &[&str]) -> bool {
    let query_lower = query.to_lowercase();
    keywords.iter().any(|word| query_lower.contains(word))
}

fn name_token_match(query_lower: &str, name: &str) -> bool {
    let spaced = name.replace(['_', '-'], " ").to_lowercase();
    !spaced.is_empty() && query_lower.contains(&spaced)
}

/// Compute the heuristic-adjusted relevance score for one candidate.
///
/// An exact example match short-circuits to [`EXACT_MATCH_SCORE`]. All
/// other applicable boosts stack on top of `base_similarity`, so the
/// result has no upper bound short of the exact-match ceiling.
pub fn adjusted_score(
    query: &str,
    base_similarity: f32,
    descriptor: &CapabilityDescriptor,
) -> f32 {
    if exact_example_match(query, descriptor) {
        return EXACT_MATCH_SCORE;
    }

    let query_lower = query.to_lowercase();
    let mut score = base_similarity;

    if partial_example_match(query, descriptor) {
        score += PARTIAL_EXAMPLE_BOOST;
    }
    if name_token_match(&query_lower, &descriptor.name) {
        score += NAME_TOKEN_BOOST;
    }
    if !descriptor.description.is_empty()
        && query_lower.contains(&descriptor.description.to_lowercase())
    {
        score += DESCRIPTION_BOOST;
    }

    match descriptor.category {
        Category::SystemMonitoring if has_any_keyword(query, SYSTEM_MONITORING_KEYWORDS) => {
            score += CATEGORY_KEYWORD_BOOST;
        }
        Category::ApplicationControl if has_any_keyword(query, APPLICATION_CONTROL_KEYWORDS) => {
            score += CATEGORY_KEYWORD_BOOST;
        }
        _ => {}
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "open_calculator",
            "Open the system calculator application",
            Category::ApplicationControl,
        )
        .with_examples(["Open calculator", "Launch calculator"])
    }

    fn cpu() -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "get_cpu_usage",
            "Get current CPU usage and details",
            Category::SystemMonitoring,
        )
        .with_examples(["Show CPU usage"])
    }

    #[test]
    fn test_exact_match_forces_ceiling() {
        assert_eq!(adjusted_score("open calculator", 0.02, &calculator()), 1.0);
        assert_eq!(adjusted_score("OPEN CALCULATOR", 0.9, &calculator()), 1.0);
    }

    #[test]
    fn test_partial_match_and_category_boost_stack() {
        // "open calculator" is a substring, the name tokens match, and
        // "open" triggers the application-control boost.
        let score = adjusted_score("please open calculator now", 0.1, &calculator());
        let expected = 0.1 + 0.3 + 0.2 + 0.5;
        assert!((score - expected).abs() < 1e-6, "got {score}");
    }

    #[test]
    fn test_name_token_match_only() {
        let descriptor = CapabilityDescriptor::new(
            "get_network_info",
            "Network interface details",
            Category::Custom("Networking".to_string()),
        );
        let score = adjusted_score("tell me the get network info thing", 0.2, &descriptor);
        assert!((score - 0.4).abs() < 1e-6, "got {score}");
    }

    #[test]
    fn test_system_monitoring_keyword_boost() {
        // No example matches; "show" and "system" trigger the category boost.
        let score = adjusted_score("how busy is the system, show me", 0.25, &cpu());
        assert!((score - 0.75).abs() < 1e-6, "got {score}");
    }

    #[test]
    fn test_no_rules_leaves_base_similarity() {
        let score = adjusted_score("hello there", 0.42, &calculator());
        assert!((score - 0.42).abs() < 1e-6, "got {score}");
    }

    #[test]
    fn test_keyword_helpers() {
        assert!(has_any_keyword("Show CPU usage", SYSTEM_MONITORING_KEYWORDS));
        assert!(has_any_keyword("please LAUNCH it", APPLICATION_CONTROL_KEYWORDS));
        assert!(!has_any_keyword("hello world", APPLICATION_CONTROL_KEYWORDS));
    }

    #[test]
    fn test_partial_match_direction_is_example_in_query() {
        // The example must appear inside the query, not the other way round.
        assert!(partial_example_match("well, open calculator please", &calculator()));
        assert!(!partial_example_match("open", &calculator()));
    }
}

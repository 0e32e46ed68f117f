// Jaccard similarity between people over their combined entity sets.
//
// Each person's set is every account they follow or are followed by, plus
// every topic, tagged by kind ("acc:bob", "topic:jazz"). The score is:
//
//   |A ∩ B| / |A ∪ B|
//
// This gives 0.0 for nothing in common and 1.0 for identical sets. Two empty
// sets score 0.0, so a person with no data is never "identical" to anyone,
// themselves included.

use std::collections::BTreeSet;

use serde::Serialize;

use super::sets::sorted_by_key;
use crate::ingest::profile::PersonProfile;

/// Jaccard index of two sets; `0.0` when both are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Combined-entity similarity of two profiles.
pub fn profile_similarity(a: &PersonProfile, b: &PersonProfile) -> f64 {
    jaccard(&a.combined_entities(), &b.combined_entities())
}

/// Square similarity matrix over people sorted by key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    pub people: Vec<String>,
    /// `values[i][j]` is the similarity of `people[i]` and `people[j]`
    pub values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.people.iter().position(|p| p == a)?;
        let j = self.people.iter().position(|p| p == b)?;
        Some(self.values[i][j])
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

/// Compute similarity for every ordered pair of people, diagonal included.
pub fn similarity_matrix(profiles: &[PersonProfile]) -> SimilarityMatrix {
    let sorted = sorted_by_key(profiles);
    let sets: Vec<BTreeSet<String>> = sorted.iter().map(|p| p.combined_entities()).collect();

    let n = sets.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let score = jaccard(&sets[i], &sets[j]);
            values[i][j] = score;
            values[j][i] = score;
        }
    }

    SimilarityMatrix {
        people: sorted.iter().map(|p| p.person_key.clone()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_sets() {
        let a = set(&["acc:a", "topic:b"]);
        assert!((jaccard(&a, &a) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_no_overlap() {
        assert_eq!(jaccard(&set(&["acc:a"]), &set(&["acc:b"])), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let score = jaccard(&set(&["x", "y", "z"]), &set(&["y", "z", "w"]));
        assert!((score - 0.5).abs() < 0.001, "2 shared of 4 total, got {score}");
    }

    #[test]
    fn test_both_empty_is_zero() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn test_matrix_diagonal_and_symmetry() {
        let mut a = PersonProfile::empty("b-person");
        a.following.insert("x".to_string());
        a.topics.insert("x".to_string());
        let mut b = PersonProfile::empty("a-person");
        b.followers.insert("x".to_string());
        let empty = PersonProfile::empty("c-empty");

        let m = similarity_matrix(&[a, b, empty]);
        assert_eq!(m.people, vec!["a-person", "b-person", "c-empty"]);
        assert_eq!(m.get("a-person", "a-person"), Some(1.0));
        assert_eq!(m.get("c-empty", "c-empty"), Some(0.0));
        // acc:x shared; topic:x only on one side
        assert_eq!(m.get("a-person", "b-person"), Some(0.5));
        assert_eq!(m.get("b-person", "a-person"), Some(0.5));
    }
}

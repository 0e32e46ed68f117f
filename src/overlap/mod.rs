// Overlap engine — set intersections, mutuals, shared entities and similarity.

pub mod sets;
pub mod shared;
pub mod similarity;

use serde::Serialize;

use crate::ingest::profile::PersonProfile;
use crate::ingest::records::Category;
use sets::{GroupOverlap, MutualConnections, PairOverlap};
use shared::{PairWeight, SharedEntity};
use similarity::SimilarityMatrix;

/// Pairwise and all-person overlap for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOverlap {
    pub category: Category,
    /// Every pair in lexicographic pair order, empty intersections included
    pub pairs: Vec<PairOverlap>,
    pub all_people: GroupOverlap,
}

impl CategoryOverlap {
    /// Pairs with something in common, largest first.
    pub fn shared_pairs(&self) -> Vec<&PairOverlap> {
        sets::rank_shared(&self.pairs)
    }

    pub fn pair(&self, a: &str, b: &str) -> Option<&PairOverlap> {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        self.pairs
            .iter()
            .find(|p| p.person_a == a && p.person_b == b)
    }
}

/// Everything the overlap engine derives from a set of profiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapReport {
    pub followers: CategoryOverlap,
    pub following: CategoryOverlap,
    pub topics: CategoryOverlap,
    pub mutuals: Vec<MutualConnections>,
    pub shared_entities: Vec<SharedEntity>,
    pub pair_weights: Vec<PairWeight>,
    pub similarity: SimilarityMatrix,
}

impl OverlapReport {
    pub fn category(&self, category: Category) -> &CategoryOverlap {
        match category {
            Category::Followers => &self.followers,
            Category::Following => &self.following,
            Category::Topics => &self.topics,
        }
    }
}

fn category_overlap(profiles: &[PersonProfile], category: Category) -> CategoryOverlap {
    CategoryOverlap {
        category,
        pairs: sets::pairwise_overlaps(profiles, category),
        all_people: sets::all_person_overlap(profiles, category),
    }
}

pub fn analyze_overlaps(profiles: &[PersonProfile]) -> OverlapReport {
    let (shared_entities, pair_weights) = shared::shared_entities(profiles);

    OverlapReport {
        followers: category_overlap(profiles, Category::Followers),
        following: category_overlap(profiles, Category::Following),
        topics: category_overlap(profiles, Category::Topics),
        mutuals: sets::mutual_connections(profiles),
        shared_entities,
        pair_weights,
        similarity: similarity::similarity_matrix(profiles),
    }
}

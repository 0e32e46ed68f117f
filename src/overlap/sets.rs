// Set overlaps between people — per pair, across everyone, and within one person.
//
// Members are always reported in lexicographic order and pairs are always
// keyed with the smaller person key first, so reports are reproducible
// across runs regardless of input order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ingest::profile::PersonProfile;
use crate::ingest::records::Category;

/// Intersection of one category between two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairOverlap {
    /// Lexicographically smaller person key
    pub person_a: String,
    pub person_b: String,
    pub category: Category,
    /// Sorted intersection
    pub members: Vec<String>,
}

impl PairOverlap {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Intersection of one category across every person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOverlap {
    pub category: Category,
    /// How many people were intersected. With exactly one person the
    /// members are that person's own set.
    pub participants: usize,
    pub members: Vec<String>,
}

/// Accounts one person both follows and is followed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutualConnections {
    pub person_key: String,
    pub members: Vec<String>,
}

/// Overlap of `category` between two profiles. Symmetric in its arguments.
pub fn pair_overlap(a: &PersonProfile, b: &PersonProfile, category: Category) -> PairOverlap {
    let (first, second) = if a.person_key <= b.person_key { (a, b) } else { (b, a) };
    PairOverlap {
        person_a: first.person_key.clone(),
        person_b: second.person_key.clone(),
        category,
        members: first
            .set(category)
            .intersection(second.set(category))
            .cloned()
            .collect(),
    }
}

/// Profiles sorted by person key.
pub(crate) fn sorted_by_key(profiles: &[PersonProfile]) -> Vec<&PersonProfile> {
    let mut sorted: Vec<&PersonProfile> = profiles.iter().collect();
    sorted.sort_by(|a, b| a.person_key.cmp(&b.person_key));
    sorted
}

/// Every unordered pair of distinct people, in lexicographic pair order.
pub(crate) fn person_pairs(profiles: &[PersonProfile]) -> Vec<(&PersonProfile, &PersonProfile)> {
    let sorted = sorted_by_key(profiles);
    let mut pairs = Vec::new();
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            pairs.push((sorted[i], sorted[j]));
        }
    }
    pairs
}

/// Overlap for every pair of people, including empty intersections.
pub fn pairwise_overlaps(profiles: &[PersonProfile], category: Category) -> Vec<PairOverlap> {
    person_pairs(profiles)
        .into_iter()
        .map(|(a, b)| pair_overlap(a, b, category))
        .collect()
}

/// Non-empty pair overlaps ranked by size (largest first), ties broken by pair order.
pub fn rank_shared<'a, I>(pairs: I) -> Vec<&'a PairOverlap>
where
    I: IntoIterator<Item = &'a PairOverlap>,
{
    let mut ranked: Vec<&PairOverlap> = pairs.into_iter().filter(|p| !p.is_empty()).collect();
    ranked.sort_by(|x, y| {
        y.size()
            .cmp(&x.size())
            .then_with(|| x.person_a.cmp(&y.person_a))
            .then_with(|| x.person_b.cmp(&y.person_b))
    });
    ranked
}

/// Intersection of `category` across every profile.
///
/// Zero people yields an empty result; one person yields that person's set.
pub fn all_person_overlap(profiles: &[PersonProfile], category: Category) -> GroupOverlap {
    let mut iter = profiles.iter();
    let members: BTreeSet<String> = match iter.next() {
        None => BTreeSet::new(),
        Some(first) => iter.fold(first.set(category).clone(), |acc, p| {
            acc.intersection(p.set(category)).cloned().collect()
        }),
    };
    GroupOverlap {
        category,
        participants: profiles.len(),
        members: members.into_iter().collect(),
    }
}

/// `followers ∩ following` for each person, in person-key order.
pub fn mutual_connections(profiles: &[PersonProfile]) -> Vec<MutualConnections> {
    sorted_by_key(profiles)
        .into_iter()
        .map(|p| MutualConnections {
            person_key: p.person_key.clone(),
            members: p.mutuals().into_iter().collect(),
        })
        .collect()
}

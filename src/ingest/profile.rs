// Person aggregation — folds a person's raw records into one profile.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::records::{Category, RawRecord};
use crate::identity::IdentityKind;

/// All raw records discovered for one person.
#[derive(Debug, Clone)]
pub struct PersonInput {
    /// Person key as derived from the export filenames (case preserved).
    pub person_key: String,
    pub records: Vec<RawRecord>,
}

impl PersonInput {
    pub fn new(person_key: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            person_key: person_key.into(),
            records,
        }
    }
}

/// One person's normalized follower, following and topic sets.
///
/// All three sets always exist; a category with no export file is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonProfile {
    pub person_key: String,
    pub followers: BTreeSet<String>,
    pub following: BTreeSet<String>,
    pub topics: BTreeSet<String>,
}

impl PersonProfile {
    pub fn empty(person_key: impl Into<String>) -> Self {
        Self {
            person_key: person_key.into(),
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
            topics: BTreeSet::new(),
        }
    }

    /// The set for one category.
    pub fn set(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Followers => &self.followers,
            Category::Following => &self.following,
            Category::Topics => &self.topics,
        }
    }

    /// Accounts this person both follows and is followed by.
    pub fn mutuals(&self) -> BTreeSet<String> {
        self.followers.intersection(&self.following).cloned().collect()
    }

    /// Every account and topic of this person, tagged with its kind.
    ///
    /// `("acc:" + handle)` for followers and following, `("topic:" + name)` for
    /// topics, so the same string in both namespaces stays distinct.
    pub fn combined_entities(&self) -> BTreeSet<String> {
        let accounts = self
            .followers
            .union(&self.following)
            .map(|a| format!("{}{a}", IdentityKind::Account.tag()));
        let topics = self
            .topics
            .iter()
            .map(|t| format!("{}{t}", IdentityKind::Topic.tag()));
        accounts.chain(topics).collect()
    }
}

/// Build one profile by routing each record to its parser and unioning the results.
pub fn aggregate(input: &PersonInput) -> PersonProfile {
    let mut followers = BTreeSet::new();
    let mut following = BTreeSet::new();
    let mut topics = BTreeSet::new();

    for record in &input.records {
        let parsed = record.identities();
        let target = match record.category {
            Category::Followers => &mut followers,
            Category::Following => &mut following,
            Category::Topics => &mut topics,
        };
        target.extend(parsed);
    }

    debug!(
        person = %input.person_key,
        followers = followers.len(),
        following = following.len(),
        topics = topics.len(),
        "Aggregated profile"
    );

    PersonProfile {
        person_key: input.person_key.clone(),
        followers,
        following,
        topics,
    }
}

/// Aggregate every person, preserving input order.
pub fn build_profiles(inputs: &[PersonInput]) -> Vec<PersonProfile> {
    inputs.iter().map(aggregate).collect()
}

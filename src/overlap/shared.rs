// Shared entities — what each pair of people has in common across all categories.
//
// Works on the kind-tagged combined sets, so an account and a topic with the
// same name are reported separately. The per-pair counts are the edge
// weights of the person-to-person meta-graph.

use serde::Serialize;

use super::sets::person_pairs;
use crate::identity::IdentityKind;
use crate::ingest::profile::PersonProfile;

/// One entity two people share.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SharedEntity {
    pub kind: IdentityKind,
    /// Identity without its kind tag
    pub entity: String,
    pub person_a: String,
    pub person_b: String,
}

/// How many entities a pair of people share (zero included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairWeight {
    pub person_a: String,
    pub person_b: String,
    pub shared: usize,
}

fn untag(tagged: &str) -> Option<(IdentityKind, &str)> {
    [IdentityKind::Account, IdentityKind::Topic]
        .into_iter()
        .find_map(|kind| tagged.strip_prefix(kind.tag()).map(|rest| (kind, rest)))
}

/// Every shared entity for every pair, sorted by kind, entity, then pair.
/// Also returns the per-pair counts in pair order.
pub fn shared_entities(profiles: &[PersonProfile]) -> (Vec<SharedEntity>, Vec<PairWeight>) {
    let mut rows = Vec::new();
    let mut weights = Vec::new();

    for (a, b) in person_pairs(profiles) {
        let set_a = a.combined_entities();
        let set_b = b.combined_entities();
        let mut shared = 0usize;
        for tagged in set_a.intersection(&set_b) {
            shared += 1;
            if let Some((kind, entity)) = untag(tagged) {
                rows.push(SharedEntity {
                    kind,
                    entity: entity.to_string(),
                    person_a: a.person_key.clone(),
                    person_b: b.person_key.clone(),
                });
            }
        }
        weights.push(PairWeight {
            person_a: a.person_key.clone(),
            person_b: b.person_key.clone(),
            shared,
        });
    }

    rows.sort();
    (rows, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_rows_and_weights() {
        let mut a = PersonProfile::empty("ana");
        a.followers.insert("bob".to_string());
        a.topics.insert("bob".to_string());
        a.topics.insert("art".to_string());
        let mut b = PersonProfile::empty("ben");
        b.following.insert("bob".to_string());
        b.topics.insert("art".to_string());
        let c = PersonProfile::empty("cy");

        let (rows, weights) = shared_entities(&[a, b, c]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, IdentityKind::Account);
        assert_eq!(rows[0].entity, "bob");
        assert_eq!(rows[1].kind, IdentityKind::Topic);
        assert_eq!(rows[1].entity, "art");

        assert_eq!(weights.len(), 3);
        assert_eq!(weights[0].shared, 2, "ana/ben");
        assert_eq!(weights[1].shared, 0, "ana/cy");
    }
}

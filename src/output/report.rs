// Plain-text report generation.
//
// The report lists every set in full except the per-person following,
// followers and mutuals sections, which show the first five entries.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::take_limited;
use crate::ingest::profile::PersonProfile;
use crate::overlap::sets::PairOverlap;
use crate::overlap::CategoryOverlap;
use crate::pipeline::Analysis;

const RULE_WIDTH: usize = 70;
const PREVIEW: usize = 5;

fn banner(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
}

fn bullets<'a>(out: &mut String, items: impl IntoIterator<Item = &'a String>) {
    for item in items {
        out.push_str(&format!("  • {item}\n"));
    }
}

/// First five items, then "... and N more".
fn preview(out: &mut String, items: &[String]) {
    let (shown, rest) = take_limited(items, PREVIEW);
    bullets(out, shown);
    if rest > 0 {
        out.push_str(&format!("  ... and {rest} more\n"));
    }
}

fn preview_section(
    out: &mut String,
    title: &str,
    profiles: &[PersonProfile],
    sets: impl Fn(&PersonProfile) -> Vec<String>,
    noun: &str,
    empty: &str,
) {
    banner(out, title);
    for profile in profiles {
        let items = sets(profile);
        out.push_str(&format!(
            "\n{} - {} {noun}:\n",
            profile.person_key.to_uppercase(),
            items.len()
        ));
        if items.is_empty() {
            out.push_str(&format!("  ({empty})\n"));
        } else {
            preview(out, &items);
        }
    }
}

/// Every pair, including those with nothing in common.
fn pairs_section(out: &mut String, title: &str, overlap: &CategoryOverlap, noun: &str) {
    banner(out, title);
    for pair in &overlap.pairs {
        write_pair(out, pair, noun);
    }
}

fn write_pair(out: &mut String, pair: &PairOverlap, noun: &str) {
    out.push_str(&format!(
        "\n{} ↔ {}: {} {noun} in common\n",
        pair.person_a,
        pair.person_b,
        pair.size()
    ));
    if pair.is_empty() {
        out.push_str(&format!("  (no {noun} in common)\n"));
    } else {
        bullets(out, &pair.members);
    }
}

fn everyone_section(out: &mut String, title: &str, overlap: &CategoryOverlap, empty: &str) {
    if overlap.all_people.participants < 2 {
        return;
    }
    banner(out, &format!("{title} ({})", overlap.all_people.members.len()));
    if overlap.all_people.members.is_empty() {
        out.push_str(&format!("\n({empty})\n"));
    } else {
        bullets(out, &overlap.all_people.members);
    }
}

/// Render the full report.
pub fn render_report(analysis: &Analysis, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let profiles = &analysis.profiles;
    let overlaps = &analysis.overlaps;

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str("SOCIAL ANALYSIS REPORT\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let people: Vec<&str> = profiles.iter().map(|p| p.person_key.as_str()).collect();
    out.push_str(&format!("People analyzed: {}\n", people.len()));
    out.push_str(&format!("People: {}\n\n", people.join(", ")));

    out.push_str("GENERAL STATISTICS:\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for (profile, mutuals) in profiles.iter().zip(&overlaps.mutuals) {
        out.push_str(&format!("\n{}:\n", profile.person_key.to_uppercase()));
        out.push_str(&format!("  Followers: {}\n", profile.followers.len()));
        out.push_str(&format!("  Following: {}\n", profile.following.len()));
        out.push_str(&format!("  Topics of interest: {}\n", profile.topics.len()));
        out.push_str(&format!("  Mutual connections: {}\n", mutuals.members.len()));
    }

    banner(&mut out, "TOPICS PER PERSON (FULL):");
    for profile in profiles {
        out.push_str(&format!(
            "\n{} - {} topics:\n",
            profile.person_key.to_uppercase(),
            profile.topics.len()
        ));
        if profile.topics.is_empty() {
            out.push_str("  (no topics)\n");
        } else {
            bullets(&mut out, &profile.topics);
        }
    }

    everyone_section(
        &mut out,
        "TOPICS SHARED BY EVERYONE",
        &overlaps.topics,
        "No topic is shared by every person",
    );
    pairs_section(&mut out, "TOPICS SHARED BETWEEN PAIRS:", &overlaps.topics, "topics");

    preview_section(
        &mut out,
        "ACCOUNTS EACH PERSON FOLLOWS (first 5):",
        profiles,
        |p| p.following.iter().cloned().collect(),
        "accounts followed",
        "follows no one",
    );
    preview_section(
        &mut out,
        "FOLLOWERS OF EACH PERSON (first 5):",
        profiles,
        |p| p.followers.iter().cloned().collect(),
        "followers",
        "no followers",
    );
    preview_section(
        &mut out,
        "MUTUAL CONNECTIONS PER PERSON (first 5):",
        profiles,
        |p| p.mutuals().into_iter().collect(),
        "mutual connections",
        "no mutual connections",
    );

    everyone_section(
        &mut out,
        "ACCOUNTS EVERYONE FOLLOWS",
        &overlaps.following,
        "No account is followed by every person",
    );
    pairs_section(
        &mut out,
        "FOLLOWED ACCOUNTS SHARED BETWEEN PAIRS (FULL):",
        &overlaps.following,
        "accounts",
    );
    pairs_section(
        &mut out,
        "FOLLOWERS SHARED BETWEEN PAIRS (FULL):",
        &overlaps.followers,
        "followers",
    );

    out
}

/// Render the report and write it to `path`, creating parent directories.
pub fn write_report(analysis: &Analysis, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let report = render_report(analysis, Utc::now());
    fs::write(path, report).with_context(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::centrality::PageRankConfig;
    use crate::ingest::profile::PersonInput;
    use crate::ingest::records::{Category, RawRecord};
    use crate::pipeline::analyze;
    use chrono::TimeZone;
    use serde_json::json;

    fn following(names: &[&str]) -> RawRecord {
        let entries: Vec<_> = names.iter().map(|n| json!({"title": n})).collect();
        RawRecord::new(Category::Following, json!({"relationships_following": entries}))
    }

    #[test]
    fn test_report_sections() {
        let inputs = vec![
            PersonInput::new("ana", vec![following(&["a", "b", "c", "d", "e", "f", "g"])]),
            PersonInput::new("bob", vec![following(&["b", "z"])]),
        ];
        let analysis = analyze(&inputs, &PageRankConfig::default()).unwrap();
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = render_report(&analysis, when);

        assert!(report.contains("Generated: 2024-05-01 12:00:00 UTC"));
        assert!(report.contains("People: ana, bob"));
        assert!(report.contains("ANA - 7 accounts followed:"));
        assert!(report.contains("  ... and 2 more"), "following preview truncates at five");
        assert!(report.contains("ACCOUNTS EVERYONE FOLLOWS (1)"));
        assert!(report.contains("ana ↔ bob: 1 accounts in common"));
        assert!(report.contains("ana ↔ bob: 0 topics in common"));
        assert!(report.contains("  (no topics in common)"));
    }

    #[test]
    fn test_single_person_has_no_everyone_section() {
        let inputs = vec![PersonInput::new("ana", vec![following(&["a"])])];
        let analysis = analyze(&inputs, &PageRankConfig::default()).unwrap();
        let report = render_report(&analysis, Utc::now());
        assert!(!report.contains("EVERYONE"));
    }
}

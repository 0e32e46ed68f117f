// Colored terminal output for topic, account, similarity and centrality summaries.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use super::take_limited;
use crate::graph::centrality::CentralityReport;
use crate::graph::model::NodeKind;
use crate::overlap::sets::PairOverlap;
use crate::overlap::similarity::SimilarityMatrix;
use crate::pipeline::Analysis;

fn heading(title: &str) {
    println!("\n{}", "=".repeat(70).dimmed());
    println!("{}", title.bold());
    println!("{}", "=".repeat(70).dimmed());
}

fn subheading(title: &str) {
    println!("\n{}", "-".repeat(70).dimmed());
    println!("{}", title.bold());
    println!("{}", "-".repeat(70).dimmed());
}

/// Print a bulleted list, truncated to `limit` entries.
fn print_members(members: &[String], limit: usize) {
    let (shown, rest) = take_limited(members, limit);
    for member in shown {
        println!("  • {member}");
    }
    if rest > 0 {
        println!("  {}", format!("... and {rest} more").dimmed());
    }
}

fn print_shared_pairs(pairs: &[&PairOverlap], noun: &str, limit: usize) {
    if pairs.is_empty() {
        println!("\n  {}", format!("No {noun} shared between any pair.").dimmed());
        return;
    }
    for pair in pairs {
        println!(
            "\n{} ↔ {} ({} {noun} in common)",
            pair.person_a.cyan(),
            pair.person_b.cyan(),
            pair.size().to_string().bold()
        );
        print_members(&pair.members, limit);
    }
}

/// One-line summary of what was loaded.
pub fn display_load_summary(analysis: &Analysis) {
    let people: Vec<&str> = analysis.profiles.iter().map(|p| p.person_key.as_str()).collect();
    println!(
        "{} Loaded data for {} person(s): {}",
        "✓".green(),
        people.len(),
        people.join(", ")
    );
}

/// Topics per person, topics shared by pairs, topics everyone shares.
pub fn display_topics(analysis: &Analysis, limit: usize) {
    heading("TOPIC ANALYSIS");

    for profile in &analysis.profiles {
        println!(
            "\n{} - {} topics:",
            profile.person_key.to_uppercase().bold(),
            profile.topics.len()
        );
        if profile.topics.is_empty() {
            println!("  {}", "(no topics)".dimmed());
        } else {
            let topics: Vec<String> = profile.topics.iter().cloned().collect();
            print_members(&topics, limit);
        }
    }

    let topics = &analysis.overlaps.topics;
    subheading("SHARED TOPICS");
    print_shared_pairs(&topics.shared_pairs(), "topics", limit);

    if topics.all_people.participants > 1 {
        subheading(&format!(
            "TOPICS EVERYONE SHARES ({})",
            topics.all_people.members.len()
        ));
        if topics.all_people.members.is_empty() {
            println!("\n  {}", "No topic is shared by every person.".dimmed());
        } else {
            print_members(&topics.all_people.members, limit);
        }
    }
}

/// Follower/following counts, mutuals, and shared accounts.
pub fn display_accounts(analysis: &Analysis, limit: usize) {
    heading("ACCOUNT ANALYSIS");

    for (profile, mutuals) in analysis.profiles.iter().zip(&analysis.overlaps.mutuals) {
        println!("\n{}:", profile.person_key.to_uppercase().bold());
        println!("  • Followers: {}", profile.followers.len());
        println!("  • Following: {}", profile.following.len());
        println!("  • Mutual connections: {}", mutuals.members.len());
    }

    let following = &analysis.overlaps.following;
    if following.all_people.participants > 1 {
        subheading(&format!(
            "ACCOUNTS EVERYONE FOLLOWS ({})",
            following.all_people.members.len()
        ));
        if following.all_people.members.is_empty() {
            println!("\n  {}", "No account is followed by every person.".dimmed());
        } else {
            print_members(&following.all_people.members, limit);
        }
    }

    subheading("FOLLOWED ACCOUNTS SHARED BETWEEN PAIRS");
    print_shared_pairs(&following.shared_pairs(), "accounts", limit);

    subheading("FOLLOWERS SHARED BETWEEN PAIRS");
    print_shared_pairs(&analysis.overlaps.followers.shared_pairs(), "followers", limit);
}

/// Print the similarity matrix as a table.
pub fn display_similarity(matrix: &SimilarityMatrix) {
    heading("COMBINED SIMILARITY (JACCARD)");
    if matrix.is_empty() {
        println!("  {}", "(no people)".dimmed());
        return;
    }

    let width = matrix.people.iter().map(|p| p.chars().count()).max().unwrap_or(0).max(6);
    print!("  {:width$}", "");
    for person in &matrix.people {
        print!(" {:>width$}", person.dimmed());
    }
    println!();

    for (person, row) in matrix.people.iter().zip(&matrix.values) {
        print!("  {:<width$}", person.bold());
        for value in row {
            let cell = format!("{value:.3}");
            let cell = if *value >= 0.5 {
                cell.bright_green()
            } else if *value >= 0.1 {
                cell.yellow()
            } else {
                cell.normal()
            };
            print!(" {:>width$}", cell);
        }
        println!();
    }
}

/// The most central accounts and topics of a graph, by PageRank.
pub fn display_top_central(report: &CentralityReport, count: usize) {
    heading("MOST CENTRAL ENTITIES");
    if !report.pagerank_converged {
        println!(
            "  {} PageRank did not converge after {} iterations; scores shown as 0.",
            "!".yellow(),
            report.pagerank_iterations
        );
    }

    let mut entities: Vec<_> = report
        .nodes
        .iter()
        .filter(|n| n.key.kind != NodeKind::Person)
        .collect();
    entities.sort_by(|a, b| {
        b.pagerank
            .total_cmp(&a.pagerank)
            .then(b.degree.cmp(&a.degree))
            .then(a.key.cmp(&b.key))
    });

    println!(
        "  {:>4}  {:<32} {:<8} {:>6} {:>9} {:>11}",
        "Rank".dimmed(),
        "Entity".dimmed(),
        "Kind".dimmed(),
        "Degree".dimmed(),
        "PageRank".dimmed(),
        "Betweenness".dimmed(),
    );
    println!("  {}", "-".repeat(76).dimmed());
    for (i, node) in entities.iter().take(count).enumerate() {
        println!(
            "  {:>4}. {:<32} {:<8} {:>6} {:>9.4} {:>11.4}",
            i + 1,
            node.label,
            node.key.kind.as_str(),
            node.degree,
            node.pagerank,
            node.betweenness,
        );
    }
}

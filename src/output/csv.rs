// CSV exports: similarity matrix, shared entities, centrality tables.
//
// Fields are quoted per RFC 4180 only when they need it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::centrality::CentralityReport;
use crate::overlap::shared::SharedEntity;
use crate::overlap::similarity::SimilarityMatrix;

/// Quote a field if it contains a comma, quote, or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f.as_ref())).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Square matrix with a leading header row and column of person keys.
pub fn similarity_csv(matrix: &SimilarityMatrix) -> String {
    let mut out = String::new();
    let mut header = vec![String::new()];
    header.extend(matrix.people.iter().cloned());
    push_row(&mut out, &header);

    for (person, row) in matrix.people.iter().zip(&matrix.values) {
        let mut fields = vec![person.clone()];
        fields.extend(row.iter().map(|v| format!("{v:.6}")));
        push_row(&mut out, &fields);
    }
    out
}

pub fn shared_entities_csv(rows: &[SharedEntity]) -> String {
    let mut out = String::new();
    push_row(&mut out, &["person_a", "person_b", "entity", "kind"]);
    for row in rows {
        push_row(
            &mut out,
            &[
                row.person_a.as_str(),
                row.person_b.as_str(),
                row.entity.as_str(),
                row.kind.as_str(),
            ],
        );
    }
    out
}

pub fn centrality_csv(report: &CentralityReport) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        &[
            "node",
            "label",
            "kind",
            "degree",
            "in_degree",
            "out_degree",
            "betweenness",
            "pagerank",
        ],
    );
    for node in &report.nodes {
        push_row(
            &mut out,
            &[
                node.key.to_string(),
                node.label.clone(),
                node.key.kind.as_str().to_string(),
                node.degree.to_string(),
                node.in_degree.to_string(),
                node.out_degree.to_string(),
                format!("{:.6}", node.betweenness),
                format!("{:.6}", node.pagerank),
            ],
        );
    }
    out
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_csv(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityKind;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_similarity_csv() {
        let matrix = SimilarityMatrix {
            people: vec!["ana".to_string(), "bob".to_string()],
            values: vec![vec![1.0, 0.25], vec![0.25, 1.0]],
        };
        assert_eq!(
            similarity_csv(&matrix),
            ",ana,bob\nana,1.000000,0.250000\nbob,0.250000,1.000000\n"
        );
    }

    #[test]
    fn test_shared_entities_csv() {
        let rows = vec![SharedEntity {
            kind: IdentityKind::Topic,
            entity: "rock, indie".to_string(),
            person_a: "ana".to_string(),
            person_b: "bob".to_string(),
        }];
        assert_eq!(
            shared_entities_csv(&rows),
            "person_a,person_b,entity,kind\nana,bob,\"rock, indie\",topic\n"
        );
    }
}

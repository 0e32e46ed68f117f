// GEXF 1.2 export of a social graph, for loading into Gephi and similar tools.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::model::SocialGraph;

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `graph` as a directed GEXF document.
///
/// Node ids are the prefixed node keys (`person:ana`, `acc:bob`, `topic:jazz`);
/// edges carry `edge_kind` and, for follows, `direction`.
pub fn render_gexf(graph: &SocialGraph) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<gexf xmlns=\"http://gexf.net/1.2\" version=\"1.2\">\n");
    out.push_str("  <graph mode=\"static\" defaultedgetype=\"directed\">\n");

    out.push_str("    <attributes class=\"node\">\n");
    out.push_str("      <attribute id=\"0\" title=\"kind\" type=\"string\"/>\n");
    out.push_str("    </attributes>\n");
    out.push_str("    <attributes class=\"edge\">\n");
    out.push_str("      <attribute id=\"0\" title=\"edge_kind\" type=\"string\"/>\n");
    out.push_str("      <attribute id=\"1\" title=\"direction\" type=\"string\"/>\n");
    out.push_str("    </attributes>\n");

    out.push_str("    <nodes>\n");
    for node in graph.nodes() {
        out.push_str(&format!(
            "      <node id=\"{}\" label=\"{}\">\n",
            escape_xml(&node.key.to_string()),
            escape_xml(&node.label)
        ));
        out.push_str(&format!(
            "        <attvalues><attvalue for=\"0\" value=\"{}\"/></attvalues>\n",
            node.kind().as_str()
        ));
        out.push_str("      </node>\n");
    }
    out.push_str("    </nodes>\n");

    out.push_str("    <edges>\n");
    for (i, edge) in graph.edges().enumerate() {
        out.push_str(&format!(
            "      <edge id=\"{i}\" source=\"{}\" target=\"{}\">\n",
            escape_xml(&edge.source.to_string()),
            escape_xml(&edge.target.to_string())
        ));
        out.push_str("        <attvalues>");
        out.push_str(&format!(
            "<attvalue for=\"0\" value=\"{}\"/>",
            edge.kind.as_str()
        ));
        if let Some(direction) = edge.kind.direction() {
            out.push_str(&format!(
                "<attvalue for=\"1\" value=\"{}\"/>",
                direction.as_str()
            ));
        }
        out.push_str("</attvalues>\n");
        out.push_str("      </edge>\n");
    }
    out.push_str("    </edges>\n");

    out.push_str("  </graph>\n");
    out.push_str("</gexf>\n");
    out
}

pub fn write_gexf(graph: &SocialGraph, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, render_gexf(graph))
        .with_context(|| format!("Failed to write graph to {}", path.display()))
}

// Output formatting — terminal display, text report, CSV and GEXF exports.

pub mod csv;
pub mod gexf;
pub mod report;
pub mod terminal;

/// Split a list for display: the first `limit` items and how many were left out.
pub fn take_limited<T>(items: &[T], limit: usize) -> (&[T], usize) {
    if items.len() <= limit {
        (items, 0)
    } else {
        (&items[..limit], items.len() - limit)
    }
}

/// Make a person key safe to embed in a file name.
///
/// Keeps letters, digits, `-`, `_` and `.`; everything else becomes `_`.
pub fn file_stem(person_key: &str) -> String {
    person_key
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

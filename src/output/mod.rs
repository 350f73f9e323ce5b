//! Output formatting for CLI display
//!
//! Renders category forests, list pages and tag suggestions as terminal
//! lines. In quiet mode only the bare values are printed, one per line.

use crate::catalog::{Forest, flatten};
use crate::listing::Page;
use crate::records::Record;
use crate::tags::WaitReason;
use colored::Colorize;

/// Format a category forest as an indented outline
#[must_use]
pub fn tree_lines(forest: &Forest, quiet: bool) -> Vec<String> {
    flatten(&forest.roots)
        .into_iter()
        .map(|(depth, node)| {
            let indent = "  ".repeat(depth);
            let name = &node.record.name;
            if quiet {
                format!("{indent}{name}")
            } else if node.children.is_empty() {
                format!("{indent}{} {}", name.bold(), format!("({})", node.record.id).dimmed())
            } else {
                format!(
                    "{indent}{} {} [{}]",
                    name.bold(),
                    format!("({})", node.record.id).dimmed(),
                    node.descendant_count()
                )
            }
        })
        .collect()
}

/// Warnings for categories that could not be placed in the forest
#[must_use]
pub fn forest_warnings(forest: &Forest) -> Vec<String> {
    let mut lines = Vec::new();
    if !forest.cyclic.is_empty() {
        let message = format!(
            "Skipped {} categories on a parent cycle: {}",
            forest.cyclic.len(),
            forest.cyclic.join(", ")
        );
        lines.push(message.yellow().to_string());
    }
    if !forest.duplicates.is_empty() {
        lines.push(
            format!("Ignored duplicate category ids: {}", forest.duplicates.join(", "))
                .yellow()
                .to_string(),
        );
    }
    lines
}

/// Format one record with the given fields
///
/// Missing fields show as `-`; in quiet mode the values are tab separated.
#[must_use]
pub fn record_line<T: Record>(record: &T, fields: &[&str], quiet: bool) -> String {
    let values: Vec<String> = fields
        .iter()
        .map(|name| record.field(name).unwrap_or_else(|| "-".to_string()))
        .collect();

    if quiet {
        std::iter::once(record.id().to_string())
            .chain(values)
            .collect::<Vec<_>>()
            .join("\t")
    } else {
        format!("  {} {}", record.id().cyan(), values.join(" | "))
    }
}

/// Summary line under a list page
#[must_use]
pub fn page_footer<T>(page: &Page<T>) -> String {
    match page.shown() {
        Some((first, last)) => format!(
            "Showing {first}-{last} of {} (page {}/{})",
            page.total, page.page, page.total_pages
        ),
        None => "No matching items".to_string(),
    }
}

/// Format a tag set
#[must_use]
pub fn tag_lines(tags: &[String], quiet: bool) -> Vec<String> {
    if quiet {
        return tags.to_vec();
    }
    tags.iter().map(|tag| format!("  #{}", tag.green())).collect()
}

/// Message shown while tag generation waits for usable input
#[must_use]
pub fn waiting(reason: WaitReason) -> String {
    format!("Tags: {reason}").yellow().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryRecord, build_forest};
    use crate::listing::paginate;
    use crate::records::Entity;
    use serde_json::json;

    fn sample_forest() -> Forest {
        build_forest(&[
            CategoryRecord::new("1", "Men", None),
            CategoryRecord::new("2", "Shirts", Some("1")),
            CategoryRecord::new("3", "Loop", Some("3")),
        ])
    }

    #[test]
    fn test_tree_lines_quiet() {
        let lines = tree_lines(&sample_forest(), true);
        assert_eq!(lines, vec!["Men", "  Shirts"]);
    }

    #[test]
    fn test_tree_lines_show_ids() {
        let lines = tree_lines(&sample_forest(), false);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Men"));
        assert!(lines[0].contains("(1)"));
        assert!(lines[1].starts_with("  "));
    }

    #[test]
    fn test_tree_lines_nesting() {
        let forest = build_forest(&crate::testing::category_fixture());
        let lines = tree_lines(&forest, true);
        assert_eq!(
            lines,
            vec!["Men", "  Shirts", "  Ethnic", "    Kurtas", "Women", "Accessories"]
        );
        assert!(forest_warnings(&forest).is_empty());
    }

    #[test]
    fn test_forest_warnings() {
        let warnings = forest_warnings(&sample_forest());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("3"));
    }

    #[test]
    fn test_record_line() {
        let entity: Entity = serde_json::from_value(json!({ "id": "e1", "name": "Asha" })).unwrap();
        assert_eq!(record_line(&entity, &["name", "email"], true), "e1\tAsha\t-");
        assert!(record_line(&entity, &["name"], false).contains("Asha"));
    }

    #[test]
    fn test_page_footer() {
        let page = paginate((1..=25).collect::<Vec<_>>(), 2, 10);
        assert_eq!(page_footer(&page), "Showing 11-20 of 25 (page 2/3)");

        let empty = paginate(Vec::<u8>::new(), 1, 10);
        assert_eq!(page_footer(&empty), "No matching items");
    }

    #[test]
    fn test_tag_lines_quiet() {
        let tags = vec!["party wear".to_string(), "kurta".to_string()];
        assert_eq!(tag_lines(&tags, true), tags);
        assert_eq!(tag_lines(&tags, false).len(), 2);
    }
}

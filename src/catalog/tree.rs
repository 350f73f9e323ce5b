use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::records::{AliasTable, ID_ALIASES, KeyAliases, unalias, value_text};

/// Flat category record as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    #[serde(alias = "_id", deserialize_with = "id_text")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Parent category id; `None` for top-level categories
    #[serde(
        default,
        alias = "parent_id",
        alias = "parentId",
        deserialize_with = "parent_ref"
    )]
    pub parent: Option<String>,
    /// Remaining API fields, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_text(&value)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| serde::de::Error::custom("category id must be a string or number"))
}

/// Parent may be an id, a populated parent object, null, or an empty string
fn parent_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Object(map) => map.get("_id").or_else(|| map.get("id")).and_then(value_text),
        other => value_text(other),
    };
    Ok(id.filter(|s| !s.trim().is_empty()))
}

impl KeyAliases for CategoryRecord {
    const ALIASES: AliasTable = &[ID_ALIASES, ("parent", &["parentId", "parent_id"])];
}

impl CategoryRecord {
    /// Create a record with no extra fields
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: parent.map(str::to_string),
            extra: Map::new(),
        }
    }
}

/// Category with its nested children
///
/// Walks over the tree use an explicit stack, so chains of any depth are
/// safe to build, search and drop.
#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub record: CategoryRecord,
    /// Children in input order
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of nodes below this one
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Self> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}

impl Drop for CategoryNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Result of building a category forest
#[derive(Debug, Default, PartialEq)]
pub struct Forest {
    /// Top-level categories, including those whose parent id is unknown
    pub roots: Vec<CategoryNode>,
    /// Ids on or beneath a parent cycle; these could not be placed
    pub cyclic: Vec<String>,
    /// Ids seen more than once; only the first record was used
    pub duplicates: Vec<String>,
}

impl Forest {
    /// Total number of placed nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|root| 1 + root.descendant_count()).sum()
    }
}

/// Build the category forest, keeping only the roots
///
/// Records whose parent id is not in the input become roots. Sibling order
/// follows input order.
#[must_use]
pub fn build_tree(records: &[CategoryRecord]) -> Vec<CategoryNode> {
    build_forest(records).roots
}

/// Build the category forest with diagnostics
///
/// Parent cycles (including a category naming itself as parent) are not
/// broken. Their members, and anything hanging off them, are unreachable from
/// any root, so they are left out of `roots` and listed in `cyclic`.
#[must_use]
pub fn build_forest(records: &[CategoryRecord]) -> Forest {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut duplicates = Vec::new();

    for (i, record) in records.iter().enumerate() {
        match index.entry(record.id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
            Entry::Occupied(_) => duplicates.push(record.id.clone()),
        }
    }

    let is_primary = |i: usize, record: &CategoryRecord| index.get(record.id.as_str()) == Some(&i);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut root_ids = Vec::new();
    let mut orphans = 0usize;

    for (i, record) in records.iter().enumerate() {
        if !is_primary(i, record) {
            continue;
        }
        match record.parent.as_deref() {
            Some(parent) => match index.get(parent) {
                Some(&p) => children[p].push(i),
                None => {
                    orphans += 1;
                    root_ids.push(i);
                }
            },
            None => root_ids.push(i),
        }
    }

    let mut placed = vec![false; records.len()];
    let roots = assemble(&root_ids, records, &children, &mut placed);

    let cyclic: Vec<String> = records
        .iter()
        .enumerate()
        .filter(|&(i, record)| is_primary(i, record) && !placed[i])
        .map(|(_, record)| record.id.clone())
        .collect();

    if orphans > 0 {
        tracing::debug!(orphans, "promoted categories with unknown parent to root");
    }
    if !cyclic.is_empty() {
        tracing::warn!(ids = ?cyclic, "category parent cycle detected; members left out of tree");
    }
    if !duplicates.is_empty() {
        tracing::warn!(ids = ?duplicates, "duplicate category ids; later records ignored");
    }

    Forest {
        roots,
        cyclic,
        duplicates,
    }
}

/// Build the nodes reachable from `root_ids`, bottom-up
///
/// Each index has at most one parent, so the pre-order walk visits it once;
/// building in reverse pre-order finishes every child before its parent.
fn assemble(
    root_ids: &[usize],
    records: &[CategoryRecord],
    children: &[Vec<usize>],
    placed: &mut [bool],
) -> Vec<CategoryNode> {
    let mut order = Vec::with_capacity(records.len());
    let mut stack = root_ids.to_vec();
    while let Some(i) = stack.pop() {
        placed[i] = true;
        order.push(i);
        stack.extend(&children[i]);
    }

    let mut built: Vec<Option<CategoryNode>> = records.iter().map(|_| None).collect();
    for &i in order.iter().rev() {
        let node = CategoryNode {
            record: records[i].clone(),
            children: children[i].iter().filter_map(|&c| built[c].take()).collect(),
        };
        built[i] = Some(node);
    }

    root_ids.iter().filter_map(|&i| built[i].take()).collect()
}

/// Build the forest straight from an API JSON value
///
/// Anything other than an array yields an empty forest. Array elements that
/// are not valid category records are skipped.
#[must_use]
pub fn build_tree_from_json(value: &Value) -> Vec<CategoryNode> {
    let Value::Array(items) = value else {
        tracing::debug!("category payload is not an array");
        return Vec::new();
    };

    let records: Vec<CategoryRecord> = items
        .iter()
        .filter_map(|item| serde_json::from_value(unalias::<CategoryRecord>(item)).ok())
        .collect();

    build_tree(&records)
}

/// Depth-first listing of every node with its depth (roots at 0)
#[must_use]
pub fn flatten(roots: &[CategoryNode]) -> Vec<(usize, &CategoryNode)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &CategoryNode)> = roots.iter().rev().map(|n| (0, n)).collect();
    while let Some((depth, node)) = stack.pop() {
        out.push((depth, node));
        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }
    out
}

/// Find a node anywhere in the forest by id
#[must_use]
pub fn find<'a>(roots: &'a [CategoryNode], id: &str) -> Option<&'a CategoryNode> {
    let mut stack: Vec<&CategoryNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.record.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(id: &str, name: &str, parent: Option<&str>) -> CategoryRecord {
        CategoryRecord::new(id, name, parent)
    }

    fn names(nodes: &[CategoryNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.record.name.as_str()).collect()
    }

    #[test]
    fn test_build_tree_scenario() {
        let records = vec![
            rec("1", "Men", None),
            rec("2", "Shirts", Some("1")),
            rec("3", "Orphan", Some("99")),
        ];

        let roots = build_tree(&records);
        assert_eq!(names(&roots), vec!["Men", "Orphan"]);
        assert_eq!(names(&roots[0].children), vec!["Shirts"]);
        assert!(roots[1].children.is_empty());
    }

    #[test]
    fn test_build_tree_empty() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_children_before_parent_in_input() {
        let records = vec![
            rec("c", "Casual", Some("s")),
            rec("s", "Shirts", Some("m")),
            rec("m", "Men", None),
        ];

        let roots = build_tree(&records);
        assert_eq!(names(&roots), vec!["Men"]);
        assert_eq!(names(&roots[0].children), vec!["Shirts"]);
        assert_eq!(names(&roots[0].children[0].children), vec!["Casual"]);
    }

    #[test]
    fn test_sibling_order_follows_input() {
        let records = vec![
            rec("root", "Women", None),
            rec("z", "Sarees", Some("root")),
            rec("a", "Kurtis", Some("root")),
            rec("m", "Lehengas", Some("root")),
        ];

        let roots = build_tree(&records);
        assert_eq!(names(&roots[0].children), vec!["Sarees", "Kurtis", "Lehengas"]);
    }

    #[test]
    fn test_every_record_placed_once() {
        let records = vec![
            rec("1", "A", None),
            rec("2", "B", Some("1")),
            rec("3", "C", Some("1")),
            rec("4", "D", Some("2")),
            rec("5", "E", Some("missing")),
            rec("6", "F", Some("5")),
        ];

        let forest = build_forest(&records);
        assert_eq!(forest.node_count(), records.len());
        assert!(forest.cyclic.is_empty());

        for (_, node) in flatten(&forest.roots) {
            let expected: Vec<&str> = records
                .iter()
                .filter(|r| r.parent.as_deref() == Some(node.record.id.as_str()))
                .map(|r| r.id.as_str())
                .collect();
            let actual: Vec<&str> = node.children.iter().map(|c| c.record.id.as_str()).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_self_parent_is_reported() {
        let records = vec![rec("1", "Loop", Some("1")), rec("2", "Fine", None)];

        let forest = build_forest(&records);
        assert_eq!(names(&forest.roots), vec!["Fine"]);
        assert_eq!(forest.cyclic, vec!["1".to_string()]);
    }

    #[test]
    fn test_cycle_is_reported_not_looped() {
        let records = vec![
            rec("a", "A", Some("c")),
            rec("b", "B", Some("a")),
            rec("c", "C", Some("b")),
            rec("d", "D", Some("a")),
            rec("r", "Root", None),
        ];

        let forest = build_forest(&records);
        assert_eq!(names(&forest.roots), vec!["Root"]);
        assert_eq!(forest.cyclic, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let records = vec![
            rec("1", "First", None),
            rec("1", "Second", None),
            rec("2", "Child", Some("1")),
        ];

        let forest = build_forest(&records);
        assert_eq!(names(&forest.roots), vec!["First"]);
        assert_eq!(names(&forest.roots[0].children), vec!["Child"]);
        assert_eq!(forest.duplicates, vec!["1".to_string()]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![rec("1", "Men", None), rec("2", "Shirts", Some("1"))];
        let before = records.clone();
        let _ = build_tree(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn test_from_json_non_array() {
        assert!(build_tree_from_json(&json!(null)).is_empty());
        assert!(build_tree_from_json(&json!({ "data": [] })).is_empty());
        assert!(build_tree_from_json(&json!("categories")).is_empty());
    }

    #[test]
    fn test_from_json_api_shapes() {
        let value = json!([
            { "_id": "m", "name": "Men", "parent": null, "slug": "men" },
            { "_id": "s", "name": "Shirts", "parentId": "m" },
            { "_id": "t", "name": "Tees", "parent": { "_id": "m", "name": "Men" } },
            { "_id": "x", "name": "Top", "parent": "" },
            { "name": "no id" },
            7
        ]);

        let roots = build_tree_from_json(&value);
        assert_eq!(names(&roots), vec!["Men", "Top"]);
        assert_eq!(names(&roots[0].children), vec!["Shirts", "Tees"]);
        assert_eq!(roots[0].record.extra.get("slug"), Some(&json!("men")));
    }

    #[test]
    fn test_from_json_with_both_id_keys() {
        let value = json!([
            { "_id": "m", "id": "m", "name": "Men" },
            { "_id": "s", "id": "s", "name": "Shirts", "parent": null, "parentId": "m" }
        ]);

        let roots = build_tree_from_json(&value);
        assert_eq!(names(&roots), vec!["Men"]);
        assert_eq!(names(&roots[0].children), vec!["Shirts"]);
    }

    #[test]
    fn test_deep_chain() {
        const DEPTH: usize = 10_000;
        let records: Vec<CategoryRecord> = (0..DEPTH)
            .map(|i| {
                let parent = i.checked_sub(1).map(|p| p.to_string());
                rec(&i.to_string(), &format!("Level {i}"), parent.as_deref())
            })
            .collect();

        let forest = build_forest(&records);
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.node_count(), DEPTH);
        assert!(forest.cyclic.is_empty());

        let flat = flatten(&forest.roots);
        assert_eq!(flat.len(), DEPTH);
        assert_eq!(flat.last().map(|(depth, _)| *depth), Some(DEPTH - 1));

        let deepest = find(&forest.roots, &(DEPTH - 1).to_string()).unwrap();
        assert_eq!(deepest.record.name, format!("Level {}", DEPTH - 1));
        assert!(deepest.children.is_empty());
    }

    #[test]
    fn test_node_serializes_with_children() {
        let roots = build_tree(&[rec("1", "Men", None), rec("2", "Shirts", Some("1"))]);
        let value = serde_json::to_value(&roots[0]).unwrap();
        assert_eq!(value["name"], "Men");
        assert_eq!(value["children"][0]["name"], "Shirts");
        assert_eq!(value["children"][0]["parent"], "1");
    }

    #[test]
    fn test_flatten_depths() {
        let roots = build_tree(&[
            rec("1", "Men", None),
            rec("2", "Shirts", Some("1")),
            rec("3", "Formal", Some("2")),
            rec("4", "Women", None),
        ]);

        let flat: Vec<(usize, &str)> = flatten(&roots)
            .into_iter()
            .map(|(d, n)| (d, n.record.name.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![(0, "Men"), (1, "Shirts"), (2, "Formal"), (0, "Women")]
        );
    }

    #[test]
    fn test_find_and_descendants() {
        let roots = build_tree(&[
            rec("1", "Men", None),
            rec("2", "Shirts", Some("1")),
            rec("3", "Formal", Some("2")),
        ]);

        assert_eq!(roots[0].descendant_count(), 2);
        assert_eq!(find(&roots, "3").map(|n| n.record.name.as_str()), Some("Formal"));
        assert!(find(&roots, "9").is_none());
    }
}

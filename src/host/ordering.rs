//! host::ordering
//!
//! Deterministic display ordering for branches and directory entries.
//!
//! Upstream responses do not guarantee an order, so these pure functions
//! impose one. Both are total orders: the same input always produces the
//! same output, regardless of upstream shuffling.

use super::traits::{BranchSummary, EnrichedEntry, EntryKind, TreeEntry};

/// Anything that knows whether it is a file or a directory.
///
/// Lets [`order_entries`] sort plain and commit-enriched listings the same
/// way.
pub trait DirectoryEntry {
    /// File or directory.
    fn kind(&self) -> EntryKind;
}

impl DirectoryEntry for TreeEntry {
    fn kind(&self) -> EntryKind {
        self.kind
    }
}

impl DirectoryEntry for EnrichedEntry {
    fn kind(&self) -> EntryKind {
        self.kind
    }
}

/// Order branches with the primary branch first, then lexicographic.
///
/// A branch literally named `primary` always lands at index 0 when present.
pub fn order_branches(mut branches: Vec<BranchSummary>, primary: &str) -> Vec<BranchSummary> {
    branches.sort_by(|a, b| {
        let a_key = (a.name != primary, &a.name);
        let b_key = (b.name != primary, &b.name);
        a_key.cmp(&b_key)
    });
    branches
}

/// Order directory entries with all directories before all files.
///
/// Stable: within each group, the input's relative order is preserved.
pub fn order_entries<T: DirectoryEntry>(mut entries: Vec<T>) -> Vec<T> {
    entries.sort_by_key(|e| e.kind() == EntryKind::File);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str) -> BranchSummary {
        BranchSummary {
            name: name.to_string(),
            sha: format!("sha-{}", name),
        }
    }

    fn entry(name: &str, kind: EntryKind) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind,
        }
    }

    mod branches {
        use super::*;

        #[test]
        fn primary_first_then_lexicographic() {
            let input = vec![branch("feature-x"), branch("master"), branch("dev")];
            let out = order_branches(input, "master");
            let names: Vec<_> = out.iter().map(|b| b.name.as_str()).collect();
            assert_eq!(names, vec!["master", "dev", "feature-x"]);
        }

        #[test]
        fn primary_first_regardless_of_position() {
            for pos in 0..3 {
                let mut input = vec![branch("a"), branch("b")];
                input.insert(pos, branch("main"));
                let out = order_branches(input, "main");
                assert_eq!(out[0].name, "main");
            }
        }

        #[test]
        fn absent_primary_is_pure_lexicographic() {
            let input = vec![branch("zeta"), branch("alpha"), branch("mid")];
            let out = order_branches(input, "master");
            let names: Vec<_> = out.iter().map(|b| b.name.as_str()).collect();
            assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        }

        #[test]
        fn empty_input() {
            assert!(order_branches(Vec::new(), "master").is_empty());
        }
    }

    mod entries {
        use super::*;

        #[test]
        fn directories_before_files() {
            let input = vec![
                entry("a.txt", EntryKind::File),
                entry("lib", EntryKind::Dir),
            ];
            let out = order_entries(input);
            assert_eq!(out[0].name, "lib");
            assert_eq!(out[1].name, "a.txt");
        }

        #[test]
        fn relative_order_preserved_within_groups() {
            let input = vec![
                entry("z.txt", EntryKind::File),
                entry("src", EntryKind::Dir),
                entry("a.txt", EntryKind::File),
                entry("docs", EntryKind::Dir),
            ];
            let out = order_entries(input);
            let names: Vec<_> = out.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["src", "docs", "z.txt", "a.txt"]);
        }

        #[test]
        fn enriched_entries_order_the_same_way() {
            let input = vec![
                EnrichedEntry {
                    name: "readme.md".into(),
                    kind: EntryKind::File,
                    latest_message: "m".into(),
                    latest_sha: None,
                },
                EnrichedEntry {
                    name: "src".into(),
                    kind: EntryKind::Dir,
                    latest_message: "m".into(),
                    latest_sha: None,
                },
            ];
            let out = order_entries(input);
            assert_eq!(out[0].name, "src");
        }
    }
}

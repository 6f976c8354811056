//! The detective's notebook: collected clues kept in a binary search tree
//!
//! Clues are ordered by plain lexicographic comparison of their text, so an
//! in-order walk lists them alphabetically without a separate sort.

use std::cmp::Ordering;

#[derive(Debug)]
struct ClueNode {
    text: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn new(text: &str) -> Box<Self> {
        Box::new(Self {
            text: text.to_string(),
            left: None,
            right: None,
        })
    }
}

/// Unbalanced BST of clue strings, without duplicates
#[derive(Debug, Default)]
pub struct ClueTree {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `text` to the notebook.
    ///
    /// Returns `false` and leaves the tree untouched when the clue is
    /// already present.
    pub fn insert(&mut self, text: &str) -> bool {
        let mut slot = &mut self.root;
        loop {
            match slot {
                None => {
                    *slot = Some(ClueNode::new(text));
                    self.len += 1;
                    return true;
                }
                Some(node) => {
                    slot = match text.cmp(node.text.as_str()) {
                        Ordering::Equal => return false,
                        Ordering::Less => &mut node.left,
                        Ordering::Greater => &mut node.right,
                    };
                }
            }
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match text.cmp(node.text.as_str()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clues in ascending order
    pub fn iter(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl<'a> IntoIterator for &'a ClueTree {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Drop for ClueTree {
    fn drop(&mut self) {
        // A tree fed sorted input degenerates into a list; free it with an
        // explicit worklist so the stack depth stays constant.
        let mut pending: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// In-order traversal: left subtree, node, right subtree
pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut cursor: Option<&'a ClueNode>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_tree() {
        let tree = ClueTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_in_order_is_alphabetical() {
        let mut tree = ClueTree::new();
        for clue in ["Muddy Boots", "Broken Vase", "Torn Glove", "Old Diary", "Ash"] {
            assert!(tree.insert(clue));
        }
        let listed: Vec<&str> = tree.iter().collect();
        assert_eq!(
            listed,
            vec!["Ash", "Broken Vase", "Muddy Boots", "Old Diary", "Torn Glove"]
        );
    }

    #[test]
    fn test_duplicate_is_ignored() {
        let mut tree = ClueTree::new();
        assert!(tree.insert("Old Diary"));
        assert!(!tree.insert("Old Diary"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.iter().count(), 1);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let mut tree = ClueTree::new();
        tree.insert("old diary");
        tree.insert("Old Diary");
        // Uppercase sorts before lowercase in byte order
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec!["Old Diary", "old diary"]);
    }

    #[test]
    fn test_contains() {
        let mut tree = ClueTree::new();
        tree.insert("Pipe Ash");
        tree.insert("Gold Coin");
        assert!(tree.contains("Gold Coin"));
        assert!(!tree.contains("Ledger"));
    }

    #[test]
    fn test_degenerate_tree_drops() {
        let mut tree = ClueTree::new();
        for i in 0..5_000 {
            tree.insert(&format!("clue {:06}", i));
        }
        assert_eq!(tree.len(), 5_000);
        drop(tree);
    }

    proptest! {
        #[test]
        fn prop_in_order_strictly_ascending(
            clues in proptest::collection::vec("[a-zA-Z ]{0,10}", 0..60),
        ) {
            let mut tree = ClueTree::new();
            for clue in &clues {
                tree.insert(clue);
            }

            let listed: Vec<&str> = tree.iter().collect();
            for pair in listed.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }

            let mut expected = clues.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(listed, expected.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(tree.len(), expected.len());
        }
    }
}

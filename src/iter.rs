//! Depth-first traversal of a path trie.

use indexmap::map;

use crate::node::TrieNode;
use crate::trie::PathTrie;

/// An iterator over the `(path, value)` pairs of a [`PathTrie`].
///
/// This iterator performs a depth-first pre-order traversal: the siblings of
/// a level are visited in insertion order, and the value of a node is yielded
/// before anything below it. Placeholder nodes are descended into but not
/// yielded.
///
/// Created by [`PathTrie::iter`] and [`PathTrie::iter_from`].
pub struct Iter<'a, T> {
    /// Levels still being walked, each with the path leading to it
    stack: Vec<(Vec<String>, map::Iter<'a, String, TrieNode<T>>)>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(trie: &'a PathTrie<T>, root_path: Vec<String>) -> Self {
        Iter {
            stack: vec![(root_path, trie.root.entries.iter())],
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Vec<String>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, siblings) = self.stack.last_mut()?;

            let (segment, node) = match siblings.next() {
                Some(entry) => entry,
                None => {
                    // Level exhausted, resume with the parent's siblings
                    self.stack.pop();
                    continue;
                }
            };

            let mut path = prefix.clone();
            path.push(segment.clone());

            if !node.children.is_empty() {
                self.stack
                    .push((path.clone(), node.children.root.entries.iter()));
            }

            if let Some(value) = node.value() {
                return Some((path, value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_iter_empty() {
        let trie: PathTrie<u32> = PathTrie::new();
        assert!(trie.iter().next().is_none());
    }

    #[test]
    fn test_iter_pre_order() {
        let trie = PathTrie::new()
            .update(&["a"], 1)
            .update(&["a", "b", "c"], 2)
            .update(&["d"], 3)
            .update(&["a", "e"], 4);

        let results: Vec<(Vec<String>, &u32)> = trie.iter().collect();

        assert_eq!(
            results,
            vec![
                (path(&["a"]), &1),
                (path(&["a", "b", "c"]), &2),
                (path(&["a", "e"]), &4),
                (path(&["d"]), &3),
            ]
        );
    }

    #[test]
    fn test_iter_insertion_order_not_sorted() {
        // Segments deliberately not in lexicographic order
        let trie = PathTrie::new()
            .update(&["zebra"], 1)
            .update(&["apple"], 2)
            .update(&["mango"], 3);

        let keys: Vec<Vec<String>> = trie.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec![path(&["zebra"]), path(&["apple"]), path(&["mango"])]);
    }

    #[test]
    fn test_iter_skips_placeholders() {
        let trie = PathTrie::new().update(&["a", "b", "c"], 1);

        let results: Vec<(Vec<String>, &u32)> = trie.iter().collect();
        assert_eq!(results, vec![(path(&["a", "b", "c"]), &1)]);
    }

    #[test]
    fn test_iter_from_prefixes_paths() {
        let trie = PathTrie::new().update(&["x"], 1).update(&["y", "z"], 2);

        let results: Vec<(Vec<String>, &u32)> = trie.iter_from(&["root", "sub"]).collect();
        assert_eq!(
            results,
            vec![
                (path(&["root", "sub", "x"]), &1),
                (path(&["root", "sub", "y", "z"]), &2),
            ]
        );
    }

    #[test]
    fn test_iter_is_lazy_and_repeatable() {
        let trie = PathTrie::new()
            .update(&["a"], 1)
            .update(&["b"], 2)
            .update(&["c"], 3);

        // Stopping early is fine
        let first: Vec<&u32> = trie.iter().take(1).map(|(_, v)| v).collect();
        assert_eq!(first, vec![&1]);

        // A fresh call starts from the top again
        let all: Vec<&u32> = trie.iter().map(|(_, v)| v).collect();
        let again: Vec<&u32> = trie.iter().map(|(_, v)| v).collect();
        assert_eq!(all, vec![&1, &2, &3]);
        assert_eq!(all, again);
    }

    #[test]
    fn test_iter_into_iterator() {
        let trie = PathTrie::new().update(&["a"], 1).update(&["b"], 2);

        let mut sum = 0;
        for (_, value) in &trie {
            sum += value;
        }
        assert_eq!(sum, 3);
    }
}

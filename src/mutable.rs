//! In-place construction and editing of path tries.
//!
//! `MutablePathTrie` has the same layout as `PathTrie` but edits its levels
//! in place instead of returning new versions. Levels are written through
//! `Arc::make_mut`, so a level that is still shared with some `PathTrie` is
//! copied first and that `PathTrie` never observes the change.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::iter::Iter;
use crate::node::{Level, TrieNode};
use crate::trie::PathTrie;

/// A path trie edited in place.
///
/// Use it to build a trie in bulk and then freeze it with
/// [`into_trie`](Self::into_trie), or thaw an existing [`PathTrie`] with
/// `MutablePathTrie::from` to apply a batch of edits. Both conversions are
/// O(1).
///
/// # Examples
///
/// ```
/// use path_trie::MutablePathTrie;
///
/// let mut trie = MutablePathTrie::new();
/// trie.update(&["a", "b"], 1);
/// trie.update(&["a", "c"], 2);
/// trie.update(&["a", "b"], 3);
///
/// assert_eq!(trie.get(&["a", "b"]), Some(&3));
///
/// let frozen = trie.into_trie();
/// assert_eq!(frozen.len(), 2);
/// ```
pub struct MutablePathTrie<T> {
    trie: PathTrie<T>,
}

impl<T> MutablePathTrie<T> {
    /// Creates a new, empty trie.
    pub fn new() -> Self {
        MutablePathTrie {
            trie: PathTrie::new(),
        }
    }

    /// Returns a persistent view of the current contents.
    pub fn as_trie(&self) -> &PathTrie<T> {
        &self.trie
    }

    /// Freezes this trie into a persistent [`PathTrie`].
    pub fn into_trie(self) -> PathTrie<T> {
        self.trie
    }

    /// Returns `true` if the top level of the trie has no entries.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Returns the number of values stored in the trie.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Finds the node at `path`. See [`PathTrie::find`].
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&TrieNode<T>> {
        self.trie.find(path)
    }

    /// Returns `true` if every segment of `path` can be followed from the
    /// root. See [`PathTrie::contains_path`].
    pub fn contains_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.trie.contains_path(path)
    }

    /// Retrieves the value stored at `path`, if any.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&T> {
        self.trie.get(path)
    }

    /// Returns an iterator over the `(path, value)` pairs of the trie.
    pub fn iter(&self) -> Iter<'_, T> {
        self.trie.iter()
    }

    /// Like [`iter`](Self::iter), but every yielded path starts with
    /// `root_path`.
    pub fn iter_from<S: AsRef<str>>(&self, root_path: &[S]) -> Iter<'_, T> {
        self.trie.iter_from(root_path)
    }

    /// Stores `value` at `path`, creating placeholder ancestors as needed.
    ///
    /// Existing nodes along the path are reused; an existing value at `path`
    /// is overwritten. Does nothing for the empty path.
    pub fn update<S: AsRef<str>>(&mut self, path: &[S], value: T) {
        if path.is_empty() {
            return;
        }
        update_in_place(&mut self.trie, path, Arc::new(value));
    }

    /// Removes the value at `path` in place.
    ///
    /// Follows the same pruning rule as [`PathTrie::remove`]: a node that
    /// still has children becomes a placeholder, a node left empty is
    /// removed together with every ancestor that becomes empty. Returns
    /// `true` if a value was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::MutablePathTrie;
    ///
    /// let mut trie = MutablePathTrie::new();
    /// trie.update(&["a", "b"], 1);
    ///
    /// assert!(trie.remove(&["a", "b"]));
    /// assert!(!trie.remove(&["a", "b"]));
    /// assert!(trie.is_empty());
    /// ```
    pub fn remove<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        // Checking first keeps shared levels from being copied for nothing
        if self.trie.get(path).is_none() {
            return false;
        }
        remove_in_place(&mut self.trie, path)
    }
}

// Gives exclusive access to a level, copying it first if another trie
// still holds it.
fn level_mut<T>(trie: &mut PathTrie<T>) -> &mut Level<T> {
    if Arc::strong_count(&trie.root) > 1 {
        trace!(entries = trie.root.entries.len(), "Copying shared level before write");
    }
    let level = Arc::make_mut(&mut trie.root);
    level.invalidate_count();
    level
}

fn update_in_place<T, S: AsRef<str>>(trie: &mut PathTrie<T>, path: &[S], value: Arc<T>) {
    let (segment, rest) = match path.split_first() {
        Some(split) => split,
        None => return,
    };

    let level = level_mut(trie);
    let node = level
        .entries
        .entry(segment.as_ref().to_owned())
        .or_default();

    if rest.is_empty() {
        node.value = Some(value);
    } else {
        update_in_place(&mut node.children, rest, value);
    }
}

fn remove_in_place<T, S: AsRef<str>>(trie: &mut PathTrie<T>, path: &[S]) -> bool {
    let (segment, rest) = match path.split_first() {
        Some(split) => split,
        None => return false,
    };
    let segment = segment.as_ref();

    let level = level_mut(trie);
    let node = match level.entries.get_mut(segment) {
        Some(node) => node,
        None => return false,
    };

    let removed = if rest.is_empty() {
        node.value.take().is_some()
    } else {
        remove_in_place(&mut node.children, rest)
    };

    if node.is_prunable() {
        trace!(segment, "Pruned empty node");
        level.entries.shift_remove(segment);
    }

    removed
}

impl<T> Default for MutablePathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<PathTrie<T>> for MutablePathTrie<T> {
    fn from(trie: PathTrie<T>) -> Self {
        MutablePathTrie { trie }
    }
}

impl<T> From<MutablePathTrie<T>> for PathTrie<T> {
    fn from(trie: MutablePathTrie<T>) -> Self {
        trie.into_trie()
    }
}

impl<T, S: AsRef<str>> Extend<(Vec<S>, T)> for MutablePathTrie<T> {
    fn extend<I: IntoIterator<Item = (Vec<S>, T)>>(&mut self, iter: I) {
        for (path, value) in iter {
            self.update(&path, value);
        }
    }
}

impl<T, S: AsRef<str>> std::iter::FromIterator<(Vec<S>, T)> for MutablePathTrie<T> {
    fn from_iter<I: IntoIterator<Item = (Vec<S>, T)>>(iter: I) -> Self {
        let mut trie = MutablePathTrie::new();
        trie.extend(iter);
        trie
    }
}

impl<'a, T> IntoIterator for &'a MutablePathTrie<T> {
    type Item = (Vec<String>, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutablePathTrie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.trie, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: [&str; 0] = [];

    #[test]
    fn test_update_in_place() {
        let mut trie = MutablePathTrie::new();
        trie.update(&["a", "b"], 1);
        trie.update(&["a", "c"], 2);

        assert_eq!(trie.get(&["a", "b"]), Some(&1));
        assert_eq!(trie.get(&["a", "c"]), Some(&2));
        assert!(trie.find(&["a"]).unwrap().is_placeholder());
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_update_reuses_unshared_levels() {
        let mut trie = MutablePathTrie::new();
        trie.update(&["a"], 1);
        let before = Arc::as_ptr(&trie.trie.root);

        trie.update(&["b"], 2);

        // Nobody else holds the root level, so it is edited in place
        assert_eq!(before, Arc::as_ptr(&trie.trie.root));
    }

    #[test]
    fn test_update_empty_path_is_noop() {
        let mut trie = MutablePathTrie::new();
        trie.update(&ROOT, 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_update_overwrites_and_keeps_position() {
        let mut trie = MutablePathTrie::new();
        trie.update(&["x"], 1);
        trie.update(&["y"], 2);
        trie.update(&["x"], 3);

        let results: Vec<(Vec<String>, &u32)> = trie.iter().collect();
        assert_eq!(
            results,
            vec![(vec!["x".to_string()], &3), (vec!["y".to_string()], &2)]
        );
    }

    #[test]
    fn test_thawed_trie_does_not_touch_original() {
        let frozen = PathTrie::new()
            .update(&["a", "b"], 1)
            .update(&["c"], 2);

        let mut thawed = MutablePathTrie::from(frozen.clone());
        thawed.update(&["a", "b"], 10);
        thawed.update(&["a", "d"], 11);
        assert!(thawed.remove(&["c"]));

        assert_eq!(frozen.get(&["a", "b"]), Some(&1));
        assert_eq!(frozen.get(&["a", "d"]), None);
        assert_eq!(frozen.get(&["c"]), Some(&2));
        assert_eq!(frozen.len(), 2);

        assert_eq!(thawed.get(&["a", "b"]), Some(&10));
        assert_eq!(thawed.get(&["a", "d"]), Some(&11));
        assert_eq!(thawed.len(), 2);
    }

    #[test]
    fn test_remove_in_place_prunes() {
        let mut trie = MutablePathTrie::new();
        trie.update(&["a", "b"], 1);
        trie.update(&["a", "c"], 2);

        assert!(trie.remove(&["a", "b"]));
        assert!(trie.contains_path(&["a"]));
        assert_eq!(trie.get(&["a", "c"]), Some(&2));

        assert!(trie.remove(&["a", "c"]));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_remove_in_place_keeps_router() {
        let mut trie = MutablePathTrie::new();
        trie.update(&["a"], 1);
        trie.update(&["a", "b"], 2);

        assert!(trie.remove(&["a"]));
        assert!(trie.find(&["a"]).unwrap().is_placeholder());
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_remove_missing_does_not_copy_shared_levels() {
        let frozen = PathTrie::new().update(&["a", "b"], 1);
        let mut thawed = MutablePathTrie::from(frozen.clone());

        assert!(!thawed.remove(&["a", "x"]));
        assert!(!thawed.remove(&["a"]));
        assert!(!thawed.remove(&ROOT));
        assert!(PathTrie::ptr_eq(&frozen, thawed.as_trie()));
    }

    #[test]
    fn test_extend_and_collect() {
        let mut trie: MutablePathTrie<u32> = vec![(vec!["a"], 1)].into_iter().collect();
        trie.extend(vec![(vec!["b", "c"], 2), (vec!["a"], 3)]);

        let frozen: PathTrie<u32> = trie.into();
        assert_eq!(frozen.get(&["a"]), Some(&3));
        assert_eq!(frozen.get(&["b", "c"]), Some(&2));
    }
}

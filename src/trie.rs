//! The persistent trie implementation.
//!
//! This module contains the `PathTrie` type, the primary API for working with
//! path-keyed tries in persistent mode.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::iter::Iter;
use crate::mutable::MutablePathTrie;
use crate::node::{Entries, Level, TrieNode};
use crate::util::to_owned_path;

/// A persistent trie keyed by paths of string segments.
///
/// Each path segment selects a child of the current level, so the path
/// `["user", "tech"]` reaches the `"tech"` child of the `"user"` node.
/// Siblings keep the order in which their segment was first inserted.
///
/// `PathTrie` is persistent: all operations that would modify the trie return
/// a new trie that shares every unmodified level with the original via `Arc`.
/// Cloning a `PathTrie` is O(1). For bulk in-place construction see
/// [`MutablePathTrie`].
///
/// # Examples
///
/// ```
/// use path_trie::PathTrie;
///
/// let bindings = PathTrie::new()
///     .update(&["g", "g"], "first line")
///     .update(&["G"], "last line");
///
/// assert_eq!(bindings.get(&["g", "g"]), Some(&"first line"));
/// assert!(bindings.contains_path(&["g"]));
/// assert_eq!(bindings.get(&["g"]), None);
/// ```
pub struct PathTrie<T> {
    /// The top level of the trie
    pub(crate) root: Arc<Level<T>>,
}

impl<T> Clone for PathTrie<T> {
    fn clone(&self) -> Self {
        PathTrie {
            root: Arc::clone(&self.root),
        }
    }
}

impl<T> PathTrie<T> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::<u32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        PathTrie {
            root: Arc::new(Level::default()),
        }
    }

    pub(crate) fn from_entries(entries: Entries<T>) -> Self {
        PathTrie {
            root: Arc::new(Level::new(entries)),
        }
    }

    /// Builds a trie from `(path, value)` pairs.
    ///
    /// Entries are inserted in order, so a later entry overwrites an earlier
    /// one with the same path. Entries with an empty path are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::create(vec![
    ///     (vec!["a", "b"], 1),
    ///     (vec!["a", "c"], 2),
    ///     (vec!["a", "b"], 3),
    /// ]);
    ///
    /// assert_eq!(trie.get(&["a", "b"]), Some(&3));
    /// assert_eq!(trie.len(), 2);
    /// ```
    pub fn create<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<S>, T)>,
        S: AsRef<str>,
    {
        let mut trie = MutablePathTrie::new();
        let mut inserted = 0usize;
        for (path, value) in entries {
            trie.update(&path, value);
            inserted += 1;
        }
        debug!(entries = inserted, "Built path trie");
        trie.into_trie()
    }

    /// Returns `true` if the top level of the trie has no entries.
    ///
    /// Thanks to pruning, a non-empty trie always stores at least one value.
    pub fn is_empty(&self) -> bool {
        self.root.entries.is_empty()
    }

    /// Returns the number of values stored in the trie.
    ///
    /// Placeholder nodes are not counted. The count of every level is cached,
    /// so after an update only the copied levels are counted again.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new().update(&["a", "b", "c"], 1);
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        *self.root.value_count.get_or_init(|| {
            self.root
                .entries
                .values()
                .map(|node| node.value.is_some() as usize + node.children.len())
                .sum()
        })
    }

    /// Returns the nodes of the top level, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TrieNode<T>)> + '_ {
        self.root
            .entries
            .iter()
            .map(|(segment, node)| (segment.as_str(), node))
    }

    /// Returns `true` if both tries are handles to the same top level.
    ///
    /// This is how structural sharing between versions can be observed.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new().update(&["a"], 1);
    /// let unchanged = trie.update(&[] as &[&str], 2);
    /// assert!(PathTrie::ptr_eq(&trie, &unchanged));
    /// ```
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.root, &other.root)
    }

    /// Finds the node at `path`.
    ///
    /// Returns `None` as soon as a segment is missing. The root itself is not
    /// a node, so the empty path always yields `None`, even though
    /// [`contains_path`](Self::contains_path) reports `true` for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new().update(&["a", "b"], 1);
    ///
    /// assert_eq!(trie.find(&["a", "b"]).and_then(|n| n.value()), Some(&1));
    /// assert!(trie.find(&["a"]).is_some());
    /// assert!(trie.find(&["b"]).is_none());
    /// assert!(trie.find(&[] as &[&str]).is_none());
    /// ```
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&TrieNode<T>> {
        let mut level = self;
        let mut node = None;

        for segment in path {
            let next = level.root.entries.get(segment.as_ref())?;
            level = &next.children;
            node = Some(next);
        }

        node
    }

    /// Returns `true` if every segment of `path` can be followed from the root.
    ///
    /// Placeholder nodes count as present. The empty path is always
    /// contained, even though [`find`](Self::find) returns `None` for it;
    /// this asymmetry is part of the contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new().update(&["a", "b"], 1);
    ///
    /// assert!(trie.contains_path(&["a"]));
    /// assert!(!trie.contains_path(&["a", "x"]));
    /// assert!(PathTrie::<u32>::new().contains_path(&[] as &[&str]));
    /// ```
    pub fn contains_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        let mut level = self;

        for segment in path {
            match level.root.entries.get(segment.as_ref()) {
                Some(node) => level = &node.children,
                None => return false,
            }
        }

        true
    }

    /// Retrieves the value stored at `path`, if any.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&T> {
        self.find(path)?.value()
    }

    /// Stores `value` at `path`, returning a new trie.
    ///
    /// Missing ancestors are created as placeholders. The value of an existing
    /// node is replaced and its children are kept. Only the levels along
    /// `path` are copied; everything else is shared with `self`. An empty path
    /// returns `self` unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie1 = PathTrie::new();
    /// let trie2 = trie1.update(&["a", "b"], 42);
    ///
    /// assert!(trie1.is_empty());
    /// assert_eq!(trie2.get(&["a", "b"]), Some(&42));
    /// ```
    pub fn update<S: AsRef<str>>(&self, path: &[S], value: T) -> Self {
        if path.is_empty() {
            return self.clone();
        }
        self.update_recursive(path, Arc::new(value))
    }

    // Recursive helper for update that copies the levels along the path
    fn update_recursive<S: AsRef<str>>(&self, path: &[S], value: Arc<T>) -> Self {
        let (segment, rest) = match path.split_first() {
            Some(split) => split,
            None => return self.clone(),
        };
        let segment = segment.as_ref();
        let node = self.root.entries.get(segment).cloned().unwrap_or_default();

        let new_node = if rest.is_empty() {
            TrieNode {
                value: Some(value),
                children: node.children,
            }
        } else {
            TrieNode {
                value: node.value,
                children: node.children.update_recursive(rest, value),
            }
        };

        self.with_entry(segment, new_node)
    }

    /// Removes the value at `path`, returning a new trie.
    ///
    /// A node that still has children stays in place as a placeholder. A node
    /// left with neither a value nor children is pruned from its parent, and
    /// so is every ancestor that becomes empty as a result. If nothing is
    /// stored at `path` (including the empty path), `self` is returned
    /// unchanged, so removal is idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new()
    ///     .update(&["a", "b"], 1)
    ///     .update(&["a", "c"], 2);
    ///
    /// let trie = trie.remove(&["a", "b"]);
    /// assert!(trie.contains_path(&["a"]));
    ///
    /// let trie = trie.remove(&["a", "c"]);
    /// assert!(trie.is_empty());
    /// ```
    pub fn remove<S: AsRef<str>>(&self, path: &[S]) -> Self {
        self.remove_recursive(path).unwrap_or_else(|| self.clone())
    }

    // Recursive helper for remove. Returns `None` when nothing was removed so
    // that untouched levels are handed back as they are.
    fn remove_recursive<S: AsRef<str>>(&self, path: &[S]) -> Option<Self> {
        let (segment, rest) = path.split_first()?;
        let segment = segment.as_ref();
        let node = self.root.entries.get(segment)?;

        let new_node = if rest.is_empty() {
            node.value.as_ref()?;
            TrieNode {
                value: None,
                children: node.children.clone(),
            }
        } else {
            TrieNode {
                value: node.value.clone(),
                children: node.children.remove_recursive(rest)?,
            }
        };

        if new_node.is_prunable() {
            trace!(segment, "Pruned empty node");
            Some(self.without_entry(segment))
        } else {
            Some(self.with_entry(segment, new_node))
        }
    }

    /// Returns an iterator over the `(path, value)` pairs of the trie.
    ///
    /// The traversal is depth-first pre-order: siblings are visited in
    /// insertion order and a node's value comes before its descendants.
    /// Placeholder nodes are walked through but never yielded. The iterator
    /// is lazy, so stopping early does not visit the rest of the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new()
    ///     .update(&["b"], 1)
    ///     .update(&["a", "x"], 2)
    ///     .update(&["b", "y"], 3);
    ///
    /// let pairs: Vec<_> = trie.iter().collect();
    /// assert_eq!(pairs, vec![
    ///     (vec!["b".to_string()], &1),
    ///     (vec!["b".to_string(), "y".to_string()], &3),
    ///     (vec!["a".to_string(), "x".to_string()], &2),
    /// ]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, Vec::new())
    }

    /// Like [`iter`](Self::iter), but every yielded path starts with
    /// `root_path`.
    ///
    /// Useful for walking a subtree obtained through
    /// [`TrieNode::children`] while still reporting full paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new().update(&["user", "tech"], 1);
    /// let user = trie.find(&["user"]).unwrap();
    ///
    /// let paths: Vec<_> = user.children().iter_from(&["user"]).map(|(p, _)| p).collect();
    /// assert_eq!(paths, vec![vec!["user".to_string(), "tech".to_string()]]);
    /// ```
    pub fn iter_from<S: AsRef<str>>(&self, root_path: &[S]) -> Iter<'_, T> {
        Iter::new(self, to_owned_path(root_path))
    }

    /// Builds a new trie with the same shape, transforming every value.
    ///
    /// `transform` receives the full path and the value of every stored
    /// entry, in iteration order. Placeholders stay placeholders.
    ///
    /// # Examples
    ///
    /// ```
    /// use path_trie::PathTrie;
    ///
    /// let trie = PathTrie::new().update(&["a", "b"], 2);
    /// let labels = trie.map(|path, value| format!("{}={}", path.join("/"), value));
    ///
    /// assert_eq!(labels.get(&["a", "b"]), Some(&"a/b=2".to_string()));
    /// ```
    pub fn map<U, F>(&self, mut transform: F) -> PathTrie<U>
    where
        F: FnMut(&[String], &T) -> U,
    {
        let mut mapped = MutablePathTrie::new();
        for (path, value) in self.iter() {
            let new_value = transform(&path, value);
            mapped.update(&path, new_value);
        }
        mapped.into_trie()
    }

    // Copy of this level with `segment` bound to `node`. An existing segment
    // keeps its position.
    fn with_entry(&self, segment: &str, node: TrieNode<T>) -> Self {
        let mut entries = self.root.entries.clone();
        match entries.get_mut(segment) {
            Some(slot) => *slot = node,
            None => {
                entries.insert(segment.to_owned(), node);
            }
        }
        PathTrie::from_entries(entries)
    }

    // Copy of this level without `segment`, keeping the order of the rest.
    fn without_entry(&self, segment: &str) -> Self {
        let mut entries = self.root.entries.clone();
        entries.shift_remove(segment);
        PathTrie::from_entries(entries)
    }
}

// Default implementation
impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a PathTrie<T> {
    type Item = (Vec<String>, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S: AsRef<str>> std::iter::FromIterator<(Vec<S>, T)> for PathTrie<T> {
    fn from_iter<I: IntoIterator<Item = (Vec<S>, T)>>(iter: I) -> Self {
        PathTrie::create(iter)
    }
}

// Content equality. Two handles to the same level are equal without looking
// inside; sibling order does not matter.
impl<T: PartialEq> PartialEq for PathTrie<T> {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.root, &other.root) {
            return true;
        }
        self.root.entries == other.root.entries
    }
}

impl<T: Eq> Eq for PathTrie<T> {}

impl<T: fmt::Debug> fmt::Debug for PathTrie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

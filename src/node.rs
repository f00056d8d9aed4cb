//! Node and level types for the path trie.
//!
//! A trie is a tree of *levels*. Each level maps a path segment to a
//! `TrieNode`, and each node owns the level holding its children. Levels are
//! always wrapped in an `Arc` (see `PathTrie`) so that versions of a trie can
//! share every level they did not modify.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::trie::PathTrie;

/// Segment → node mapping of a single level, in insertion order.
pub(crate) type Entries<T> = IndexMap<String, TrieNode<T>>;

/// The contents of one level of the trie.
#[derive(Debug)]
pub(crate) struct Level<T> {
    /// Child nodes keyed by path segment
    pub entries: Entries<T>,

    /// Number of values stored in this level and everything below it.
    ///
    /// Computed lazily and cached. A level that is shared between versions
    /// keeps its cached count; writes through `Arc::make_mut` must reset it.
    pub value_count: OnceCell<usize>,
}

impl<T> Level<T> {
    pub fn new(entries: Entries<T>) -> Self {
        Level {
            entries,
            value_count: OnceCell::new(),
        }
    }

    /// Forgets the cached value count after an in-place write.
    pub fn invalidate_count(&mut self) {
        self.value_count.take();
    }
}

impl<T> Default for Level<T> {
    fn default() -> Self {
        Level::new(IndexMap::new())
    }
}

// Cloning a level copies the mapping but only bumps the reference counts of
// the values and child levels it points to.
impl<T> Clone for Level<T> {
    fn clone(&self) -> Self {
        Level {
            entries: self.entries.clone(),
            value_count: self.value_count.clone(),
        }
    }
}

/// A vertex of the trie: an optional value plus the level of its children.
///
/// A node without a value is a *placeholder*: it only exists to route to
/// values stored deeper down. Nodes are handed out by
/// [`PathTrie::find`](crate::PathTrie::find) and
/// [`PathTrie::entries`](crate::PathTrie::entries) as read-only views.
///
/// # Examples
///
/// ```
/// use path_trie::PathTrie;
///
/// let trie = PathTrie::new().update(&["a", "b"], 1);
///
/// let a = trie.find(&["a"]).unwrap();
/// assert!(a.is_placeholder());
/// assert_eq!(a.children().get(&["b"]), Some(&1));
/// ```
pub struct TrieNode<T> {
    /// The value stored at this node, if any
    pub(crate) value: Option<Arc<T>>,

    /// The level holding this node's children
    pub(crate) children: PathTrie<T>,
}

impl<T> TrieNode<T> {
    /// Creates a placeholder node with no value and no children.
    pub(crate) fn new() -> Self {
        TrieNode {
            value: None,
            children: PathTrie::new(),
        }
    }

    /// Returns the value stored at this node, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_deref()
    }

    /// Returns the trie of this node's children.
    ///
    /// The returned trie is a full `PathTrie`: it can be searched, iterated
    /// or used as the base of new versions on its own.
    pub fn children(&self) -> &PathTrie<T> {
        &self.children
    }

    /// Returns `true` if no value is stored at this node.
    pub fn is_placeholder(&self) -> bool {
        self.value.is_none()
    }

    /// A node with neither a value nor children must not stay in its parent.
    pub(crate) fn is_prunable(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

impl<T> Default for TrieNode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TrieNode<T> {
    fn clone(&self) -> Self {
        TrieNode {
            value: self.value.clone(),
            children: self.children.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for TrieNode<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.children == other.children
    }
}

impl<T: Eq> Eq for TrieNode<T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for TrieNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieNode")
            .field("value", &self.value())
            .field("children", &self.children)
            .finish()
    }
}

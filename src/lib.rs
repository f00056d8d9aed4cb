//! # Path Trie
//!
//! A trie keyed by paths, ordered sequences of string segments, with both
//! persistent and in-place update styles.
//!
//! A path such as `["user", "tech", "rust"]` selects a node by following one
//! child per segment. Every node holds an optional value and its own child
//! trie; nodes without a value only route to deeper values.
//!
//! ## Features
//!
//! - **Persistent API**: [`PathTrie`] operations return a new trie instance
//! - **Structural Sharing**: new versions share every untouched subtree via `Arc`
//! - **In-place API**: [`MutablePathTrie`] for bulk construction and batched edits,
//!   with O(1) conversion to and from `PathTrie`
//! - **Pruning**: removing a value drops every node left without value or children
//! - **Ordered traversal**: depth-first, siblings in insertion order
//!
//! ## Example
//!
//! ```rust
//! use path_trie::PathTrie;
//!
//! // Create a new trie
//! let trie = PathTrie::<u32>::new();
//!
//! // Update some paths (each operation returns a new trie)
//! let trie = trie.update(&["user", "tech"], 1);
//! let trie = trie.update(&["user", "news"], 2);
//!
//! // Lookup values
//! assert_eq!(trie.get(&["user", "tech"]), Some(&1));
//!
//! // "user" exists, but only as a placeholder
//! assert!(trie.contains_path(&["user"]));
//! assert_eq!(trie.get(&["user"]), None);
//! ```
//!
//! ## The root path
//!
//! The root of a trie is not a node. [`PathTrie::find`] therefore returns
//! `None` for the empty path, while [`PathTrie::contains_path`] returns `true`
//! for it because there is no segment that could be missing. Updates and
//! removals with the empty path leave the trie unchanged.

mod iter;
mod mutable;
pub mod node;
mod trie;
mod util;

// Re-export public types
pub use crate::iter::Iter;
pub use crate::mutable::MutablePathTrie;
pub use crate::node::TrieNode;
pub use crate::trie::PathTrie;

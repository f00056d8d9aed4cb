//! Examples of using the path trie
use path_trie::{MutablePathTrie, PathTrie};

fn main() {
    // Key bindings, where a binding may be the prefix of a longer one
    let bindings = PathTrie::create(vec![
        (vec!["g", "g"], "Go to first line"),
        (vec!["G"], "Go to last line"),
        (vec!["g", "f"], "Fetch full content"),
    ]);

    // Check values
    assert_eq!(bindings.get(&["g", "g"]), Some(&"Go to first line"));
    assert_eq!(bindings.get(&["G"]), Some(&"Go to last line"));
    assert_eq!(bindings.get(&["x"]), None);

    // "g" is only a prefix: it exists but has no command
    assert!(bindings.contains_path(&["g"]));
    assert_eq!(bindings.get(&["g"]), None);

    // Every update returns a new version, the old one is left alone
    let rebound = bindings.update(&["g", "g"], "Scroll to top");
    assert_eq!(bindings.get(&["g", "g"]), Some(&"Go to first line"));
    assert_eq!(rebound.get(&["g", "g"]), Some(&"Scroll to top"));

    // Bulk edits go through the in-place trie
    let mut editable = MutablePathTrie::from(rebound);
    editable.update(&["g", "c"], "Fetch comments");
    editable.remove(&["G"]);
    let edited = editable.into_trie();

    for (keys, command) in &edited {
        println!("{:<6} {}", keys.join(" "), command);
    }
}

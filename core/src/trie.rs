use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    // BTreeMap keeps children in character order, which is what makes
    // suggestions come out lexicographically sorted.
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// Prefix trie over the indexed vocabulary, used for autocomplete.
///
/// Terms are only ever added. There is no delete: a removed document's terms
/// stay suggestible, since pruning safely would need per-term reference
/// counts across documents.
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term; re-inserting is a no-op, as is the empty string.
    pub fn insert(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for ch in term.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
    }

    /// Return up to `k` inserted terms starting with `prefix`, in ascending
    /// lexicographic order. An empty prefix or a prefix matching no term
    /// yields an empty list.
    ///
    /// The walk is an explicit-stack preorder traversal rather than
    /// recursion, so a pathologically deep vocabulary cannot overflow the
    /// call stack. It stops as soon as `k` terms are collected instead of
    /// enumerating the whole subtree.
    pub fn suggest(&self, prefix: &str, k: usize) -> Vec<String> {
        if prefix.is_empty() || k == 0 {
            return Vec::new();
        }
        let mut node = &self.root;
        for ch in prefix.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        let mut results = Vec::new();
        // Children are pushed in reverse order so the smallest character is
        // popped first, preserving preorder lexicographic output.
        let mut stack = vec![(node, prefix.to_string())];
        while let Some((node, term)) = stack.pop() {
            if node.terminal {
                results.push(term.clone());
                if results.len() == k {
                    break;
                }
            }
            for (&ch, child) in node.children.iter().rev() {
                let mut next = term.clone();
                next.push(ch);
                stack.push((child, next));
            }
        }
        results
    }
}

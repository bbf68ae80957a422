//! Patricia trie over NUL-terminated byte strings.
//!
//! Every node stores a full key and the bit index (`diff`) at which it
//! branches. A descent follows [`Link::Child`] slots, choosing the side by the
//! query's bit at the current node's `diff`, and stops at the first
//! [`Link::Leaf`] slot. The node named by that slot is the only candidate the
//! query can equal, so a lookup costs one whole-key comparison no matter how
//! many keys are stored.
//!
//! The first node inserted is the head. Its `left` slot is the entry into the
//! branching structure (initially a leaf naming the head itself) and its
//! `diff` sits below every real bit index, so the entry slot is taken without
//! probing a bit. Its `right` slot is never used.

use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::bits::{compute_diff_tracked, get_bit, padded_bit, BITS_PER_BYTE};
use crate::counters::Tracker;
use crate::error::{validate_key, Result};

/// Index of a node in the trie's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

const HEAD: NodeId = NodeId(0);

/// A branch slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Link {
    /// Descend into this node; its `diff` is greater than the current one.
    Child(NodeId),
    /// Stop here and compare against this node's key. Names either the node
    /// holding the slot or one of its ancestors.
    Leaf(NodeId),
}

impl Link {
    #[inline]
    fn child(self) -> Option<NodeId> {
        match self {
            Link::Child(id) => Some(id),
            Link::Leaf(_) => None,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<V> {
    /// Key bytes followed by a single NUL terminator.
    pub(crate) key: Box<[u8]>,
    pub(crate) diff: usize,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) value: V,
}

impl<V> Node<V> {
    /// Key without the terminator.
    #[inline]
    fn user_key(&self) -> &[u8] {
        &self.key[..self.key.len() - 1]
    }

    #[inline]
    fn link(&self, bit: u8) -> Link {
        if bit == 0 {
            self.left
        } else {
            self.right
        }
    }

    #[inline]
    fn link_mut(&mut self, bit: u8) -> &mut Link {
        if bit == 0 {
            &mut self.left
        } else {
            &mut self.right
        }
    }
}

fn terminated(key: &[u8]) -> Box<[u8]> {
    let mut stored = Vec::with_capacity(key.len() + 1);
    stored.extend_from_slice(key);
    stored.push(0);
    stored.into_boxed_slice()
}

/// A Patricia trie mapping byte-string keys to values.
///
/// Keys must be non-empty and free of `0x00` bytes. Re-inserting a key
/// replaces its value. There is no removal.
///
/// ```rust
/// use patricia_dict::{Counters, PatriciaTrie};
///
/// let mut trie = PatriciaTrie::new();
/// trie.insert(b"Carlton", 3053).unwrap();
/// trie.insert(b"Carlton North", 3054).unwrap();
///
/// let mut counters = Counters::new();
/// assert_eq!(trie.search(b"Carlton", &mut counters).unwrap(), Some(&3053));
/// assert_eq!(counters.string_comparisons, 1);
/// assert_eq!(trie.get(b"Brunswick"), None);
/// ```
#[derive(Clone)]
pub struct PatriciaTrie<V> {
    pub(crate) nodes: Vec<Node<V>>,
}

impl<V> PatriciaTrie<V> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty trie with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id.0]
    }

    /// Follows child slots from the entry slot until a leaf slot and returns
    /// the node it names. The trie must not be empty.
    fn descend<T: Tracker>(&self, key: &[u8], tracker: &mut T) -> NodeId {
        let mut link = self.node(HEAD).left;
        let mut above: Option<usize> = None;
        loop {
            match link {
                Link::Child(id) => {
                    tracker.node();
                    let node = self.node(id);
                    debug_assert!(
                        above.map_or(true, |d| node.diff > d),
                        "diff must strictly increase along a descent"
                    );
                    above = Some(node.diff);
                    tracker.bit();
                    link = node.link(padded_bit(key, node.diff));
                }
                Link::Leaf(id) => return id,
            }
        }
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<Option<V>> {
        self.insert_tracked(key, value, &mut ())
    }

    /// [`insert`](Self::insert), reporting the work done to `tracker`.
    pub fn insert_tracked<T: Tracker>(
        &mut self,
        key: &[u8],
        value: V,
        tracker: &mut T,
    ) -> Result<Option<V>> {
        validate_key(key)?;
        let stored = terminated(key);

        if self.nodes.is_empty() {
            let diff = compute_diff_tracked(None, &stored, tracker);
            self.nodes.push(Node {
                key: stored,
                diff,
                left: Link::Leaf(HEAD),
                right: Link::Leaf(HEAD),
                value,
            });
            trace!(key_len = key.len(), "created head node");
            return Ok(None);
        }

        let candidate = self.descend(key, tracker);
        let (diff, equal) = {
            let cand_key = &self.node(candidate).key;
            let diff = compute_diff_tracked(Some(cand_key), &stored, tracker);
            let extent = cand_key.len().min(stored.len()) * BITS_PER_BYTE;
            (diff, diff == extent)
        };
        tracker.key_cmp();

        if equal {
            debug!(key_len = key.len(), "replacing value of existing key");
            let old = mem::replace(&mut self.node_mut(candidate).value, value);
            return Ok(Some(old));
        }

        // Walk the path again and stop above the first node that branches at
        // or after `diff`. The new node goes into that slot.
        let mut slot: Option<(NodeId, u8)> = None;
        let mut link = self.node(HEAD).left;
        while let Link::Child(id) = link {
            let node = self.node(id);
            if node.diff >= diff {
                debug_assert_ne!(node.diff, diff, "two nodes on one path share a diff");
                break;
            }
            tracker.node();
            tracker.bit();
            let bit = padded_bit(key, node.diff);
            slot = Some((id, bit));
            link = node.link(bit);
        }

        let new_id = NodeId(self.nodes.len());
        tracker.bit();
        let (left, right) = if get_bit(&stored, diff)? == 0 {
            (Link::Leaf(new_id), link)
        } else {
            (link, Link::Leaf(new_id))
        };
        self.nodes.push(Node {
            key: stored,
            diff,
            left,
            right,
            value,
        });

        match slot {
            Some((parent, bit)) => *self.node_mut(parent).link_mut(bit) = Link::Child(new_id),
            None => self.node_mut(HEAD).left = Link::Child(new_id),
        }
        trace!(key_len = key.len(), diff, "spliced new node");

        Ok(None)
    }

    /// Look up `key`, reporting the work done to `tracker`.
    ///
    /// A miss is `Ok(None)`. Keys that could never have been inserted (empty,
    /// or containing `0x00`) are rejected.
    pub fn search<T: Tracker>(&self, key: &[u8], tracker: &mut T) -> Result<Option<&V>> {
        validate_key(key)?;
        Ok(self.find(key, tracker).map(|id| &self.node(id).value))
    }

    fn find<T: Tracker>(&self, key: &[u8], tracker: &mut T) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        tracker.node();
        let candidate = self.descend(key, tracker);
        tracker.key_cmp();
        (self.node(candidate).user_key() == key).then_some(candidate)
    }

    /// Get a reference to the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.find(key, &mut ()).map(|id| &self.node(id).value)
    }

    /// Get a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let id = self.find(key, &mut ())?;
        Some(&mut self.node_mut(id).value)
    }

    /// Whether `key` is stored.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find(key, &mut ()).is_some()
    }

    /// Visit every entry in structural in-order: a node's left subtree, the
    /// node, then its right subtree. Only child slots are followed.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&[u8], &V),
    {
        if self.nodes.is_empty() {
            return;
        }

        let mut stack: Vec<NodeId> = Vec::new();
        let mut cur = Some(HEAD);
        loop {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.node(id).left.child();
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = self.node(id);
            visit(node.user_key(), &node.value);
            cur = node.right.child();
        }
    }

    /// Iterate over entries in ascending byte order of their keys.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut stack = Vec::new();
        if let Some(head) = self.nodes.first() {
            stack.push(head.left);
        }
        Iter { trie: self, stack }
    }

    /// Drop every node, key and value. The trie can be reused afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<V> Default for PatriciaTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for PatriciaTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (String::from_utf8_lossy(k), v)))
            .finish()
    }
}

/// Iterator over a trie's entries in key order.
///
/// Each key is named by exactly one leaf slot reachable from the entry slot,
/// and leaf slots read left to right follow the key bits.
pub struct Iter<'a, V> {
    trie: &'a PatriciaTrie<V>,
    stack: Vec<Link>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(link) = self.stack.pop() {
            match link {
                Link::Leaf(id) => {
                    let node = self.trie.node(id);
                    return Some((node.user_key(), &node.value));
                }
                Link::Child(id) => {
                    let node = self.trie.node(id);
                    self.stack.push(node.right);
                    self.stack.push(node.left);
                }
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a PatriciaTrie<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

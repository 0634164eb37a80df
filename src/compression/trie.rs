
//! The binary prefix tree whose root-to-leaf paths define the code of each byte.
//! Nodes live in an arena and refer to their children by index.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use crate::error::{Error, Result};
use super::frequency::Frequencies;
use super::table::CodeTable;


/// Position of a node in the arena of its trie.
pub type NodeIndex = usize;

/// A node of the prefix tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {

    /// The end of a code.
    Leaf(u8),

    /// The left child is reached with a zero bit, the right child with a one bit.
    /// Tries built from frequencies always have both children.
    /// Tries read from a code table may miss a branch if the table is incomplete.
    Branch([Option<NodeIndex>; 2]),
}

/// A binary prefix tree.
/// Contains no nodes if there were no symbols at all,
/// and only a leaf as the root if there was exactly one distinct symbol.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Trie {
    nodes: Vec<Node>,
    root: Option<NodeIndex>,
}


/// Frequency with position, used for the min heap.
#[derive(Eq, PartialEq)]
struct HeapFrequency {
    position: NodeIndex,
    frequency: u64,
}

impl Ord for HeapFrequency {
    // reversed, so that the max heap pops the lowest frequency first,
    // and the lowest position among equal frequencies
    fn cmp(&self, other: &Self) -> Ordering {
        other.frequency.cmp(&self.frequency)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for HeapFrequency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


impl Trie {

    /// Build an optimal prefix tree:
    /// repeatedly merge the two least frequent nodes
    /// until only the root is left.
    ///
    /// Leaves are created in ascending byte order and ties are broken by arena position,
    /// so the same frequencies always produce the same tree.
    pub fn from_frequencies(frequencies: &Frequencies) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * frequencies.distinct());
        let mut heap = BinaryHeap::with_capacity(frequencies.distinct());

        for (byte, frequency) in frequencies.occurring() {
            heap.push(HeapFrequency { position: nodes.len(), frequency });
            nodes.push(Node::Leaf(byte));
        }

        while heap.len() > 1 {
            let (left, right) = match (heap.pop(), heap.pop()) {
                (Some(left), Some(right)) => (left, right),
                _ => unreachable!("heap has at least two elements"),
            };

            heap.push(HeapFrequency {
                position: nodes.len(),
                frequency: left.frequency + right.frequency,
            });

            nodes.push(Node::Branch([ Some(left.position), Some(right.position) ]));
        }

        let root = heap.pop().map(|root| root.position);
        Trie { nodes, root }
    }

    /// Rebuild the prefix tree from the codes of a stream header.
    ///
    /// Fails if a code is a prefix of another code, if two codes are equal,
    /// or if an empty code is not the only entry of the table.
    /// An incomplete table is accepted here, as long as no payload
    /// actually walks into the missing branch.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        if table.is_empty() {
            return Ok(Trie::default());
        }

        let mut nodes = vec![ Node::Branch([None, None]) ];
        let root = 0;

        for (byte, code) in table.iter() {
            let (&last_bit, path) = match code.split_last() {
                Some(split) => split,

                None if table.len() == 1 => {
                    nodes[root] = Node::Leaf(byte);
                    break;
                },

                None => return Err(Error::malformed_header(
                    "empty code in a code table with multiple entries"
                )),
            };

            let mut parent = root;
            for &bit in path {
                let current = nodes[parent];
                parent = match current {
                    Node::Branch(children) => match children[bit as usize] {
                        Some(child) => child,
                        None => {
                            let child = nodes.len();
                            nodes.push(Node::Branch([None, None]));
                            set_child(&mut nodes[parent], bit, child);
                            child
                        }
                    },

                    Node::Leaf(_) => return Err(Error::malformed_header(
                        "code table contains a code that is a prefix of another code"
                    )),
                };
            }

            let current = nodes[parent];
            match current {
                Node::Branch(children) if children[last_bit as usize].is_none() => {
                    let leaf = nodes.len();
                    nodes.push(Node::Leaf(byte));
                    set_child(&mut nodes[parent], last_bit, leaf);
                },

                _ => return Err(Error::malformed_header(
                    "code table contains a code that is a prefix of another code"
                )),
            }
        }

        Ok(Trie { nodes, root: Some(root) })
    }

    /// The root node, or `None` if the trie has no leaves.
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// The node at the specified arena position.
    /// Panics for positions that were not returned by this trie.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> Node {
        self.nodes[index]
    }

    /// Whether the trie contains no leaves.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct symbols in the trie.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| matches!(node, Node::Leaf(_))).count()
    }
}

fn set_child(node: &mut Node, bit: bool, child: NodeIndex) {
    if let Node::Branch(children) = node {
        children[bit as usize] = Some(child);
    }
    else {
        unreachable!("only branches have children");
    }
}

//! Offset-addressed prefix trie stored in a growable memory map.
//!
//! Each node is a 16 byte record and each out-edge a 12 byte record, both appended to a
//! [`Region`]. A node links to its first edge; edges of one node form a singly linked
//! sibling list in insertion order. All links are `u32` offsets, so the map can move on
//! growth without invalidating any handle.
//!
//! ```text
//! node: word_id | parent | letter | first_edge
//! edge: letter  | child  | next
//! ```

mod region;

use tracing::debug;

use region::Region;

use crate::{IndexError, Letter, Word, WordId};

/// Stored in the word id field of nodes where no word ends.
const NO_WORD: u32 = u32::MAX;

/// Offset meaning "no link".
const NULL: u32 = 0;

/// Byte size of a node record.
const NODE_SIZE: usize = 16;
/// Node field: word id.
const NODE_WORD: usize = 0;
/// Node field: parent node offset.
const NODE_PARENT: usize = 4;
/// Node field: letter on the incoming edge.
const NODE_LETTER: usize = 8;
/// Node field: first edge offset.
const NODE_FIRST_EDGE: usize = 12;

/// Byte size of an edge record.
const EDGE_SIZE: usize = 12;
/// Edge field: letter.
const EDGE_LETTER: usize = 0;
/// Edge field: child node offset.
const EDGE_CHILD: usize = 4;
/// Edge field: next sibling edge offset.
const EDGE_NEXT: usize = 8;

/// Handle to a trie node.
///
/// Handles remain valid across growth of the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeOffset(u32);

/// Handle to an entry in a node's sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeOffset(u32);

impl NodeOffset {
    /// Byte offset of the node record.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl EdgeOffset {
    /// Byte offset of the edge record.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A prefix tree over letters whose nodes may carry a [`WordId`].
///
/// Mutation needs `&mut self`; once built, any number of threads may read through `&self`.
#[derive(Debug)]
pub struct Trie {
    /// Backing storage.
    region: Region,
    /// The node for the empty word.
    root: NodeOffset,
    /// Nodes, root included.
    num_nodes: usize,
    /// Edges across all sibling lists.
    num_edges: usize,
    /// Nodes with a word id.
    num_words: usize,
    /// Set when an insertion failed part way through.
    poisoned: bool,
}

impl Trie {
    /// Creates a trie holding only the root node.
    pub fn new() -> Result<Self, IndexError> {
        let mut region = Region::new()?;
        let root = region.append(&node_record(NULL, NULL))?;
        Ok(Self {
            region,
            root: NodeOffset(root),
            num_nodes: 1,
            num_edges: 0,
            num_words: 0,
            poisoned: false,
        })
    }

    /// The node of the empty word.
    pub fn root(&self) -> NodeOffset {
        self.root
    }

    /// Number of nodes, root included.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of distinct words stored.
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Mapped bytes.
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Bytes holding records, header included.
    pub fn used_bytes(&self) -> usize {
        self.region.used()
    }

    /// Stores `word` with `id` and returns the node where it ends.
    ///
    /// Inserting the same word with the same id again is a no-op. A different id for an
    /// already stored word is rejected, as is the empty word and the reserved id
    /// `u32::MAX`. If the insertion fails for any other reason, such as the storage failing
    /// to grow, the trie becomes unusable.
    pub fn insert_word(&mut self, word: &Word, id: WordId) -> Result<NodeOffset, IndexError> {
        self.check_usable()?;
        if id == NO_WORD {
            return Err(IndexError::ReservedWordId(id));
        }
        if word.is_empty() {
            return Err(IndexError::EmptyWord);
        }

        let result = self.insert_path(word, id);
        match &result {
            Ok(_) | Err(IndexError::ConflictingWordId { .. }) => {}
            Err(e) => {
                debug!(error = %e, "Trie poisoned by failed insertion");
                self.poisoned = true;
            }
        }
        result
    }

    /// Marks the trie unusable, as a failed insertion does.
    #[cfg(test)]
    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    /// Walks and extends the path for `word`, then tags its last node.
    fn insert_path(&mut self, word: &Word, id: WordId) -> Result<NodeOffset, IndexError> {
        let mut node = self.root;
        for &letter in word.letters() {
            node = self.child_or_insert(node, letter)?;
        }

        match self.word_id(node)? {
            Some(existing) if existing != id => Err(IndexError::ConflictingWordId {
                word: word.to_string(),
                existing,
                requested: id,
            }),
            Some(_) => Ok(node),
            None => {
                self.write_node(node, NODE_WORD, id)?;
                self.num_words += 1;
                Ok(node)
            }
        }
    }

    /// Returns the child of `node` along `letter`, appending it if missing.
    fn child_or_insert(
        &mut self,
        node: NodeOffset,
        letter: Letter,
    ) -> Result<NodeOffset, IndexError> {
        let mut last = None;
        let mut edges = self.edge_offsets(node)?;
        while let Some(edge) = edges.next_edge(self)? {
            if self.edge_letter(edge)? == letter {
                return self.edge_child(edge);
            }
            last = Some(edge);
        }

        // Node and edge go in with one append so a failure leaves no orphaned record.
        let base = self.region.append(&child_records(node, letter))?;
        let child = NodeOffset(base);
        let edge = EdgeOffset(base + NODE_SIZE as u32);
        self.write_edge(edge, EDGE_CHILD, child.0)?;
        match last {
            Some(last) => self.write_edge(last, EDGE_NEXT, edge.0)?,
            None => self.write_node(node, NODE_FIRST_EDGE, edge.0)?,
        }
        self.num_nodes += 1;
        self.num_edges += 1;
        Ok(child)
    }

    /// Whether `word` was inserted.
    pub fn has_word(&self, word: &Word) -> Result<bool, IndexError> {
        match self.find_word(word)? {
            Some(node) => Ok(self.word_id(node)?.is_some()),
            None => Ok(false),
        }
    }

    /// Node at the end of the path spelling `word`, whether or not a word ends there.
    pub fn find_word(&self, word: &Word) -> Result<Option<NodeOffset>, IndexError> {
        self.check_usable()?;
        let mut node = self.root;
        'letters: for &letter in word.letters() {
            for edge in self.edges(node) {
                let (edge_letter, child) = edge?;
                if edge_letter == letter {
                    node = child;
                    continue 'letters;
                }
            }
            return Ok(None);
        }
        Ok(Some(node))
    }

    /// First entry of the sibling list of `node`.
    pub fn first_edge(&self, node: NodeOffset) -> Result<Option<EdgeOffset>, IndexError> {
        let first = self.read_node(node, NODE_FIRST_EDGE)?;
        Ok((first != NULL).then_some(EdgeOffset(first)))
    }

    /// The entry after `edge` in its sibling list.
    pub fn next_edge(&self, edge: EdgeOffset) -> Result<Option<EdgeOffset>, IndexError> {
        let next = self.read_edge(edge, EDGE_NEXT)?;
        Ok((next != NULL).then_some(EdgeOffset(next)))
    }

    /// Letter labelling `edge`.
    pub fn edge_letter(&self, edge: EdgeOffset) -> Result<Letter, IndexError> {
        decode_letter(self.read_edge(edge, EDGE_LETTER)?)
    }

    /// Node reached through `edge`.
    pub fn edge_child(&self, edge: EdgeOffset) -> Result<NodeOffset, IndexError> {
        match self.read_edge(edge, EDGE_CHILD)? {
            NULL => Err(IndexError::corrupted(format!(
                "edge at {} has no child",
                edge.0
            ))),
            child => Ok(NodeOffset(child)),
        }
    }

    /// Id of the word ending at `node`, if any.
    pub fn word_id(&self, node: NodeOffset) -> Result<Option<WordId>, IndexError> {
        let id = self.read_node(node, NODE_WORD)?;
        Ok((id != NO_WORD).then_some(id))
    }

    /// Parent of `node`, or `None` for the root.
    pub fn parent(&self, node: NodeOffset) -> Result<Option<NodeOffset>, IndexError> {
        let parent = self.read_node(node, NODE_PARENT)?;
        Ok((parent != NULL).then_some(NodeOffset(parent)))
    }

    /// Reconstructs the word spelled by the path from the root to `node`.
    pub fn word(&self, node: NodeOffset) -> Result<Word, IndexError> {
        self.check_usable()?;
        let mut letters = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current)? {
            if letters.len() >= self.num_nodes {
                return Err(IndexError::corrupted("parent chain does not reach the root"));
            }
            letters.push(decode_letter(self.read_node(current, NODE_LETTER)?)?);
            current = parent;
        }
        if current != self.root {
            return Err(IndexError::corrupted(format!(
                "parent chain of node {} ends at {} instead of the root",
                node.0, current.0
            )));
        }
        letters.reverse();
        Word::from_letters(letters)
    }

    /// Iterates over `(letter, child)` for every edge of `node` in sibling order.
    pub fn edges(&self, node: NodeOffset) -> Edges<'_> {
        let (cursor, error) = match self.edge_offsets(node) {
            Ok(cursor) => (cursor, None),
            Err(e) => (EdgeCursor::default(), Some(e)),
        };
        Edges {
            trie: self,
            cursor,
            error,
        }
    }

    /// Cursor over the sibling list of `node`.
    fn edge_offsets(&self, node: NodeOffset) -> Result<EdgeCursor, IndexError> {
        Ok(EdgeCursor {
            next: self.first_edge(node)?,
            remaining: self.num_edges,
        })
    }

    /// Fails if an earlier growth failure poisoned the trie.
    fn check_usable(&self) -> Result<(), IndexError> {
        if self.poisoned {
            Err(IndexError::Unusable)
        } else {
            Ok(())
        }
    }

    /// Reads a field of a node record.
    fn read_node(&self, node: NodeOffset, field: usize) -> Result<u32, IndexError> {
        self.check_usable()?;
        self.region.read_u32(node.0 as usize + field)
    }

    /// Reads a field of an edge record.
    fn read_edge(&self, edge: EdgeOffset, field: usize) -> Result<u32, IndexError> {
        self.check_usable()?;
        self.region.read_u32(edge.0 as usize + field)
    }

    /// Writes a field of a node record.
    fn write_node(&mut self, node: NodeOffset, field: usize, value: u32) -> Result<(), IndexError> {
        self.region.write_u32(node.0 as usize + field, value)
    }

    /// Writes a field of an edge record.
    fn write_edge(&mut self, edge: EdgeOffset, field: usize, value: u32) -> Result<(), IndexError> {
        self.region.write_u32(edge.0 as usize + field, value)
    }
}

/// Serializes a fresh node without word or edges.
fn node_record(parent: u32, letter: u32) -> [u8; NODE_SIZE] {
    let mut record = [0u8; NODE_SIZE];
    record[NODE_WORD..NODE_WORD + 4].copy_from_slice(&NO_WORD.to_le_bytes());
    record[NODE_PARENT..NODE_PARENT + 4].copy_from_slice(&parent.to_le_bytes());
    record[NODE_LETTER..NODE_LETTER + 4].copy_from_slice(&letter.to_le_bytes());
    record[NODE_FIRST_EDGE..NODE_FIRST_EDGE + 4].copy_from_slice(&NULL.to_le_bytes());
    record
}

/// Serializes a new child of `parent` followed by the edge leading to it.
///
/// The edge's child field is left null; the caller fills it in once the offset is known.
fn child_records(parent: NodeOffset, letter: Letter) -> [u8; NODE_SIZE + EDGE_SIZE] {
    let mut records = [0u8; NODE_SIZE + EDGE_SIZE];
    records[..NODE_SIZE].copy_from_slice(&node_record(parent.0, u32::from(letter)));
    let edge = &mut records[NODE_SIZE..];
    edge[EDGE_LETTER..EDGE_LETTER + 4].copy_from_slice(&u32::from(letter).to_le_bytes());
    edge[EDGE_CHILD..EDGE_CHILD + 4].copy_from_slice(&NULL.to_le_bytes());
    edge[EDGE_NEXT..EDGE_NEXT + 4].copy_from_slice(&NULL.to_le_bytes());
    records
}

/// Converts a stored letter back to a `char`.
fn decode_letter(raw: u32) -> Result<Letter, IndexError> {
    char::from_u32(raw)
        .ok_or_else(|| IndexError::corrupted(format!("stored letter {raw:#x} is not a code point")))
}

/// Walks a sibling list, bounded by the total number of edges so a cycle is detected.
#[derive(Default)]
struct EdgeCursor {
    /// Next edge to yield.
    next: Option<EdgeOffset>,
    /// Edges that may still legitimately follow.
    remaining: usize,
}

impl EdgeCursor {
    /// Advances the cursor. Borrows the trie per call so callers may mutate between steps.
    fn next_edge(&mut self, trie: &Trie) -> Result<Option<EdgeOffset>, IndexError> {
        let Some(edge) = self.next else {
            return Ok(None);
        };
        if self.remaining == 0 {
            return Err(IndexError::corrupted(format!(
                "sibling list through edge {} does not terminate",
                edge.0
            )));
        }
        self.remaining -= 1;
        self.next = trie.next_edge(edge)?;
        Ok(Some(edge))
    }
}

/// Iterator over the edges of one node, see [`Trie::edges`].
pub struct Edges<'a> {
    /// Trie being walked.
    trie: &'a Trie,
    /// Position in the sibling list.
    cursor: EdgeCursor,
    /// Error hit while locating the first edge, yielded once.
    error: Option<IndexError>,
}

impl Iterator for Edges<'_> {
    type Item = Result<(Letter, NodeOffset), IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.error.take() {
            return Some(Err(e));
        }
        match self.cursor.next_edge(self.trie) {
            Ok(Some(edge)) => Some(
                self.trie
                    .edge_letter(edge)
                    .and_then(|letter| Ok((letter, self.trie.edge_child(edge)?))),
            ),
            Ok(None) => None,
            Err(e) => {
                self.cursor.next = None;
                Some(Err(e))
            }
        }
    }
}

use super::buffer::{BufferId, BufferStore};

/// Handle to a segment held in a [`SegmentArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(u32);

/// One link in a segment chain: an inclusive slice `[start, end]` over a
/// backing buffer, plus the id of the next segment.
///
/// A live segment satisfies `start <= end` with both bounds valid indices
/// into its buffer. A retired (tombstoned) segment instead satisfies
/// `start == end + 1`: it renders as nothing but stays in the chain so that
/// every id handed out earlier keeps pointing at a linked node.
#[derive(Debug, Clone)]
pub struct Segment {
    buffer: BufferId,
    start: usize,
    end: usize,
    next: Option<SegmentId>,
}

impl Segment {
    /// Backing buffer this segment slices.
    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// First visible position (a buffer index).
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last visible position, inclusive.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Id of the next segment in the chain, if any.
    #[inline]
    pub fn next(&self) -> Option<SegmentId> {
        self.next
    }

    /// Number of visible bases.
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Whether this segment has been emptied and kept only for linkage.
    #[inline]
    pub fn is_retired(&self) -> bool {
        self.start == self.end + 1
    }

    /// Whether `pos` falls inside this segment's live range.
    #[inline]
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Empty the segment in place, leaving its linkage intact.
    #[inline]
    fn retire(&mut self) {
        self.start = self.end + 1;
    }
}

/// One logical sequence under edit: the identifier of the record it was
/// built from plus the head segment of its chain.
///
/// The head id is stable for the lifetime of the run. Edits may retire the
/// head node but never replace it, so a chain built once can be walked and
/// rendered through any number of splits, insertions, and deletions.
#[derive(Debug, Clone)]
pub struct SegmentChain {
    name: String,
    head: SegmentId,
}

impl SegmentChain {
    pub fn new(name: impl Into<String>, head: SegmentId) -> Self {
        Self {
            name: name.into(),
            head,
        }
    }

    /// Identifier of the originating record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Head segment of the chain.
    pub fn head(&self) -> SegmentId {
        self.head
    }
}

/// Arena holding every segment of every chain, addressed by [`SegmentId`].
///
/// All structural edits manipulate ids and offsets only; no buffer byte is
/// ever copied or erased by an edit, which keeps each operation
/// O(segments touched) regardless of sequence length. Nothing is removed
/// from the arena until the whole run is torn down by dropping it.
#[derive(Debug, Default)]
pub struct SegmentArena {
    segments: Vec<Segment>,
}

impl SegmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new chain covering the whole of `buffer`.
    ///
    /// # Panics
    /// Panics if the buffer is empty; empty input records are rejected
    /// before any chain is built.
    pub fn new_chain(&mut self, buffer: BufferId, buffer_len: usize) -> SegmentId {
        assert!(buffer_len > 0, "cannot build a chain over an empty buffer");
        self.alloc(Segment {
            buffer,
            start: 0,
            end: buffer_len - 1,
            next: None,
        })
    }

    fn alloc(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId(self.segments.len() as u32);
        self.segments.push(segment);
        id
    }

    /// Access a segment.
    ///
    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.0 as usize]
    }

    /// Number of segments allocated so far, across all chains.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Divide the segment `id` so that a segment begins exactly at `pos`.
    ///
    /// When `pos` is the segment's own start this is a no-op returning `id`;
    /// otherwise the segment shrinks to `[start, pos-1]`, a new segment
    /// covering `[pos, old_end]` is spliced in immediately after it, and the
    /// new segment's id is returned. No buffer bytes move either way.
    ///
    /// # Panics
    /// Panics if `pos` is outside the segment's live range; that is a defect
    /// in the caller, not a recoverable condition.
    pub fn split(&mut self, id: SegmentId, pos: usize) -> SegmentId {
        let seg = self.get(id);
        assert!(
            seg.contains(pos),
            "split position {pos} outside live range [{}, {}]",
            seg.start,
            seg.end
        );

        if pos == seg.start {
            // already split here
            return id;
        }

        let (buffer, end, next) = (seg.buffer, seg.end, seg.next);
        let tail = self.alloc(Segment {
            buffer,
            start: pos,
            end,
            next,
        });
        let seg = self.get_mut(id);
        seg.end = pos - 1;
        seg.next = Some(tail);
        tail
    }

    /// Logically insert the whole of `buffer` at `pos` inside segment `id`,
    /// returning the segment that follows the inserted content.
    ///
    /// The usual case splits at `pos` and splices a segment covering the
    /// buffer between the two pieces. When `pos` equals the segment's own
    /// start, `split` performs no division, so the node is instead retired
    /// in place to serve as a stable link anchor for any id that still
    /// points at it, and a fresh node carries its content onward behind the
    /// insertion.
    ///
    /// # Panics
    /// Panics if `pos` is outside the segment's live range, or if the
    /// buffer is empty.
    pub fn insert_sequence(
        &mut self,
        id: SegmentId,
        pos: usize,
        buffer: BufferId,
        store: &BufferStore,
    ) -> SegmentId {
        let buffer_len = store.get(buffer).len();
        assert!(buffer_len > 0, "cannot insert an empty buffer");

        let tail = self.split(id, pos);
        let inserted = self.alloc(Segment {
            buffer,
            start: 0,
            end: buffer_len - 1,
            next: None,
        });

        if tail == id {
            // Split was a no-op. Move the content onto a fresh node behind
            // the insertion and keep `id` in the chain as an empty anchor.
            let seg = self.get(id);
            let (buffer, start, end, next) = (seg.buffer, seg.start, seg.end, seg.next);
            let carried = self.alloc(Segment {
                buffer,
                start,
                end,
                next,
            });
            let seg = self.get_mut(id);
            seg.retire();
            seg.next = Some(inserted);
            self.get_mut(inserted).next = Some(carried);
            carried
        } else {
            self.get_mut(id).next = Some(inserted);
            self.get_mut(inserted).next = Some(tail);
            tail
        }
    }

    /// Logically remove `len` bases starting at `pos` inside segment `id`.
    ///
    /// Splits at `pos`, then consumes visibility forward: a segment fully
    /// covered by the deletion is retired, and the excess carries into the
    /// next segment starting at its own start (retired segments along the
    /// way contribute nothing). Returns the first live segment after the
    /// deleted region, or `None` when the deletion ran past the end of the
    /// chain — running off the end is bounded, not an error.
    ///
    /// No buffer bytes are erased; deleted content merely stops being
    /// reachable through any live segment.
    ///
    /// # Panics
    /// Panics if `pos` is outside the segment's live range.
    pub fn delete_section(&mut self, id: SegmentId, pos: usize, len: usize) -> Option<SegmentId> {
        let seg = self.get(id);
        assert!(
            seg.contains(pos),
            "delete position {pos} outside live range [{}, {}]",
            seg.start,
            seg.end
        );

        let mut target = self.split(id, pos);
        let mut remaining = len;
        loop {
            let seg = self.get_mut(target);
            let available = seg.len();
            if remaining < available {
                seg.start += remaining;
                return Some(target);
            }
            remaining -= available;
            let next = seg.next;
            seg.retire();
            match next {
                Some(n) => target = n,
                None => return None,
            }
        }
    }

    /// Whether the chain starting at `head` contains a cycle.
    ///
    /// Two cursors advance at different rates, starting one node apart; if
    /// they ever meet before the fast cursor exhausts the chain, there is a
    /// cycle. This is an internal correctness check only — a cycle means an
    /// edit violated an invariant, and the caller asserts on it rather than
    /// recovering.
    pub fn is_cyclic(&self, head: SegmentId) -> bool {
        let mut slow = head;
        let mut fast = match self.get(head).next {
            Some(n) => n,
            None => return false,
        };
        while slow != fast {
            let hop = match self.get(fast).next {
                Some(n) => n,
                None => return false,
            };
            fast = match self.get(hop).next {
                Some(n) => n,
                None => return false,
            };
            slow = match self.get(slow).next {
                Some(n) => n,
                None => return false,
            };
        }
        true
    }

    /// Concatenate the chain's live segments into the current logical text.
    ///
    /// `with_separators` inserts `->` after every live segment for
    /// inspecting chain structure.
    ///
    /// # Panics
    /// Panics if the chain contains a cycle: rendering a cyclic chain would
    /// emit corrupted output, so the defect is fatal.
    pub fn render(&self, head: SegmentId, store: &BufferStore, with_separators: bool) -> String {
        assert!(!self.is_cyclic(head), "segment chain contains a cycle");

        let mut out = String::new();
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            let seg = self.get(id);
            if !seg.is_retired() {
                let data = store.get(seg.buffer).as_slice();
                for &base in &data[seg.start..=seg.end] {
                    out.push(base.to_char());
                }
                if with_separators {
                    out.push_str("->");
                }
            }
            cursor = seg.next;
        }
        out
    }
}

//! Selection over document positions.

use crate::model::Position;

/// Anchor and head of the surface selection. The anchor is where a drag or
/// shift-movement started; the head is the caret. Equal ends mean a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// True for a plain caret
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Earlier end in document order
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Later end in document order
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Move the head, keeping the anchor
    pub fn extend_to(&mut self, pos: Position) {
        self.head = pos;
    }

    /// True when the selection spans more than one block
    pub fn is_multi_block(&self) -> bool {
        self.anchor.block != self.head.block
    }

    /// Per-block `(block, start offset, end offset)` ranges covered by the
    /// selection, given each block's length
    pub fn block_ranges(&self, block_len: impl Fn(usize) -> usize) -> Vec<(usize, usize, usize)> {
        let (start, end) = (self.start(), self.end());
        (start.block..=end.block)
            .map(|block| {
                let from = if block == start.block { start.offset } else { 0 };
                let to = if block == end.block {
                    end.offset
                } else {
                    block_len(block)
                };
                (block, from, to)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_drag_orders_ends() {
        let sel = Selection::new(Position::new(1, 2), Position::new(0, 4));
        assert_eq!(sel.start(), Position::new(0, 4));
        assert_eq!(sel.end(), Position::new(1, 2));
        assert!(sel.is_multi_block());
        assert!(!sel.is_empty());
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut sel = Selection::collapsed(Position::new(0, 3));
        sel.extend_to(Position::new(0, 1));
        assert_eq!(sel.anchor, Position::new(0, 3));
        assert_eq!(sel.start(), Position::new(0, 1));
    }

    #[test]
    fn test_block_ranges_inside_one_block() {
        let sel = Selection::new(Position::new(1, 2), Position::new(1, 6));
        assert_eq!(sel.block_ranges(|_| 99), vec![(1, 2, 6)]);
        assert!(!sel.is_multi_block());
    }

    #[test]
    fn test_block_ranges_across_blocks() {
        let sel = Selection::new(Position::new(2, 1), Position::new(0, 3));
        let ranges = sel.block_ranges(|b| b * 10 + 5);
        assert_eq!(ranges, vec![(0, 3, 5), (1, 0, 15), (2, 0, 1)]);
    }

    #[test]
    fn test_caret_gives_one_empty_range() {
        let sel = Selection::collapsed(Position::new(0, 4));
        assert_eq!(sel.block_ranges(|_| 10), vec![(0, 4, 4)]);
    }
}

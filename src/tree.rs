//! Search tree storage for the Monte-Carlo player.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::color::Color;

/// Index of a node in its [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One candidate first move and the statistics gathered for it.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsNode {
    pub board: Board,
    /// Colour to move on `board`.
    pub turn: Color,
    /// Single bit for the move that led here; 0 for the root.
    pub position: Bitboard,
    pub parent: Option<NodeId>,
    wins: [u64; 2],
}

impl MctsNode {
    pub fn new(board: Board, turn: Color, position: Bitboard, parent: Option<NodeId>) -> Self {
        MctsNode {
            board,
            turn,
            position,
            parent,
            wins: [0; 2],
        }
    }

    #[inline]
    pub fn wins(&self, color: Color) -> u64 {
        self.wins[color.index()]
    }

    /// Total decided playouts through this node.
    pub fn playouts(&self) -> u64 {
        self.wins[0] + self.wins[1]
    }

    /// `color`'s wins over one plus the opponent's wins.
    #[inline]
    pub fn win_odds(&self, color: Color) -> f64 {
        self.wins(color) as f64 / (self.wins(color.opposite()) as f64 + 1.0)
    }
}

/// Flat node storage. Parents are referenced by index.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<MctsNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, node: MctsNode) -> NodeId {
        debug_assert!(node.parent.is_none_or(|p| p.0 < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// The first node pushed.
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MctsNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Direct children of `parent`, in insertion order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (NodeId, &MctsNode)> {
        self.iter().filter(move |(_, n)| n.parent == Some(parent))
    }

    /// Record one win for `color` at `id` and every ancestor.
    pub fn mark_win(&mut self, id: NodeId, color: Color) {
        match color {
            Color::Dark => self.count_wins(id, 1, 0),
            Color::Light => self.count_wins(id, 0, 1),
        }
    }

    /// Add a batch of results at `id` and every ancestor.
    pub fn count_wins(&mut self, id: NodeId, dark: u64, light: u64) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.wins[Color::Dark.index()] += dark;
            node.wins[Color::Light.index()] += light;
            current = node.parent;
        }
    }

    /// Child of `parent` with the best odds for `color`. Ties keep the
    /// earliest child.
    pub fn best_child(&self, parent: NodeId, color: Color) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (id, node) in self.children(parent) {
            let odds = node.win_odds(color);
            if best.is_none_or(|(_, b)| odds > b) {
                best = Some((id, odds));
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> (NodeArena, NodeId, NodeId, NodeId) {
        let mut arena = NodeArena::new();
        let board = Board::standard();
        let root = arena.push(MctsNode::new(board, Color::Dark, 0, None));
        let a = arena.push(MctsNode::new(board, Color::Light, 1, Some(root)));
        let b = arena.push(MctsNode::new(board, Color::Light, 2, Some(root)));
        (arena, root, a, b)
    }

    #[test]
    fn test_mark_win_propagates() {
        let (mut arena, root, a, b) = arena();
        arena.mark_win(a, Color::Dark);
        arena.mark_win(b, Color::Light);
        arena.mark_win(b, Color::Light);

        assert_eq!(arena.get(a).wins(Color::Dark), 1);
        assert_eq!(arena.get(b).wins(Color::Light), 2);
        assert_eq!(arena.get(root).wins(Color::Dark), 1);
        assert_eq!(arena.get(root).wins(Color::Light), 2);
        assert_eq!(arena.get(root).playouts(), 3);
    }

    #[test]
    fn test_count_wins_batches() {
        let (mut arena, root, a, _) = arena();
        arena.count_wins(a, 5, 7);
        assert_eq!(arena.get(a).wins(Color::Dark), 5);
        assert_eq!(arena.get(a).wins(Color::Light), 7);
        assert_eq!(arena.get(root).playouts(), 12);
    }

    #[test]
    fn test_single_win_gives_positive_odds() {
        for color in Color::ALL {
            let (mut arena, _, a, _) = arena();
            assert_eq!(arena.get(a).win_odds(color), 0.0);
            arena.mark_win(a, color);
            assert!(arena.get(a).win_odds(color) > 0.0);
        }
    }

    #[test]
    fn test_win_odds_monotone() {
        let (mut arena, _, a, _) = arena();
        let mut last = arena.get(a).win_odds(Color::Dark);
        for _ in 0..5 {
            arena.mark_win(a, Color::Dark);
            let odds = arena.get(a).win_odds(Color::Dark);
            assert!(odds >= last);
            last = odds;
        }
        for _ in 0..5 {
            arena.mark_win(a, Color::Light);
            let odds = arena.get(a).win_odds(Color::Dark);
            assert!(odds <= last);
            last = odds;
        }
    }

    #[test]
    fn test_best_child_prefers_first_on_tie() {
        let (mut arena, root, a, b) = arena();
        assert_eq!(arena.best_child(root, Color::Dark), Some(a));

        arena.count_wins(a, 2, 1);
        arena.count_wins(b, 2, 1);
        assert_eq!(arena.best_child(root, Color::Dark), Some(a));

        arena.mark_win(b, Color::Dark);
        assert_eq!(arena.best_child(root, Color::Dark), Some(b));
        assert_eq!(arena.best_child(root, Color::Light), Some(a));
    }

    #[test]
    fn test_children_order() {
        let (arena, root, a, b) = arena();
        let ids: Vec<NodeId> = arena.children(root).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(arena.children(a).count(), 0);
        assert_eq!(arena.len(), 3);
        assert_eq!(root.index(), 0);
        assert_eq!(arena.root(), Some(root));
        assert_eq!(NodeArena::new().root(), None);
    }
}

//! Synthetic game trees for exercising the search without a real rules
//! implementation.

use std::cell::Cell;

use gambit_rules::{Color, MoveError, PieceKind, RulesEngine, Score};
use proptest::prelude::*;

use crate::eval::evaluate;

/// A node in a synthetic game tree.
#[derive(Debug, Clone)]
pub struct TestNode {
    /// Material score from White's perspective, surfaced through pawn counts.
    pub score: Score,
    /// Marks the node as checkmate for the side to move there.
    pub checkmate: bool,
    /// Child nodes; an empty list means the game is over here.
    pub children: Vec<TestNode>,
}

impl TestNode {
    pub fn leaf(score: Score) -> Self {
        TestNode {
            score,
            checkmate: false,
            children: Vec::new(),
        }
    }

    pub fn mate() -> Self {
        TestNode {
            score: 0,
            checkmate: true,
            children: Vec::new(),
        }
    }

    pub fn branch(score: Score, children: Vec<TestNode>) -> Self {
        TestNode {
            score,
            checkmate: false,
            children,
        }
    }
}

/// Rules engine over a [`TestNode`] tree.
///
/// A position is a path of child indices from the root and a move is the
/// next index. The side to move alternates from `root_side` with path
/// depth. Every `apply` call is counted so tests can compare node visits
/// between pruned and unpruned searches.
pub struct TreeRules {
    root: TestNode,
    root_side: Color,
    applied: Cell<u64>,
}

/// Path from the root of a [`TreeRules`] tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePosition {
    path: Vec<usize>,
}

impl TreeRules {
    pub fn new(root: TestNode, root_side: Color) -> Self {
        TreeRules {
            root,
            root_side,
            applied: Cell::new(0),
        }
    }

    pub fn root(&self) -> TreePosition {
        TreePosition { path: Vec::new() }
    }

    pub fn applied(&self) -> u64 {
        self.applied.get()
    }

    pub fn reset_applied(&self) {
        self.applied.set(0);
    }

    fn node(&self, path: &[usize]) -> &TestNode {
        let mut node = &self.root;
        for &index in path {
            node = &node.children[index];
        }
        node
    }
}

impl RulesEngine for TreeRules {
    type Position = TreePosition;
    type Move = usize;

    fn side_to_move(&self, position: &TreePosition) -> Color {
        if position.path.len() % 2 == 0 {
            self.root_side
        } else {
            self.root_side.opposite()
        }
    }

    fn is_game_over(&self, position: &TreePosition) -> bool {
        let node = self.node(&position.path);
        node.checkmate || node.children.is_empty()
    }

    fn is_checkmate(&self, position: &TreePosition) -> bool {
        self.node(&position.path).checkmate
    }

    fn legal_moves(&self, position: &TreePosition) -> Vec<usize> {
        (0..self.node(&position.path).children.len()).collect()
    }

    fn apply(&self, position: &TreePosition, mv: &usize) -> TreePosition {
        self.applied.set(self.applied.get() + 1);
        let mut path = position.path.clone();
        path.push(*mv);
        TreePosition { path }
    }

    fn piece_count(&self, position: &TreePosition, kind: PieceKind, color: Color) -> u32 {
        if kind != PieceKind::Pawn {
            return 0;
        }
        let score = self.node(&position.path).score;
        match color {
            Color::White => score.max(0) as u32,
            Color::Black => (-score).max(0) as u32,
        }
    }

    fn to_fen(&self, position: &TreePosition) -> String {
        let segments: Vec<String> = position.path.iter().map(|i| i.to_string()).collect();
        format!("tree/{}", segments.join("."))
    }

    fn parse_move(&self, position: &TreePosition, uci: &str) -> Result<usize, MoveError> {
        let index: usize = uci
            .parse()
            .map_err(|_| MoveError::InvalidFormat(uci.to_string()))?;
        if index < self.node(&position.path).children.len() {
            Ok(index)
        } else {
            Err(MoveError::Illegal(uci.to_string()))
        }
    }

    fn move_to_uci(&self, mv: &usize) -> String {
        mv.to_string()
    }
}

/// Plain minimax without pruning, as the reference result for alpha-beta.
pub fn minimax_reference<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    depth: u8,
    maximizing: bool,
    engine_color: Color,
) -> Score {
    if depth == 0 || rules.is_game_over(position) {
        let raw = evaluate(rules, position);
        return match engine_color {
            Color::White => raw,
            Color::Black => -raw,
        };
    }

    let scores = rules.legal_moves(position).into_iter().map(|mv| {
        let child = rules.apply(position, &mv);
        minimax_reference(rules, &child, depth - 1, !maximizing, engine_color)
    });
    if maximizing {
        scores.max().unwrap()
    } else {
        scores.min().unwrap()
    }
}

/// Random game trees with small material swings and occasional mates.
pub fn tree_strategy() -> impl Strategy<Value = TestNode> {
    let leaf = prop_oneof![
        4 => (-40i32..=40).prop_map(TestNode::leaf),
        1 => Just(TestNode::mate()),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        ((-40i32..=40), prop::collection::vec(inner, 1..4))
            .prop_map(|(score, children)| TestNode::branch(score, children))
    })
}

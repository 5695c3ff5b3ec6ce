use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{CancelToken, Strategy};
use crate::board::{Board, Position};
use crate::solver::budget::SearchBudget;

struct Node {
    parent: Option<Weak<RefCell<Node>>>,
    board: Board,
    children: Vec<Rc<RefCell<Node>>>,
    visits: u32,
    reward: f64,
    untried: Vec<Position>,
}

impl Node {
    fn new(board: Board, parent: Option<Weak<RefCell<Node>>>) -> Rc<RefCell<Node>> {
        let untried = board.legal_moves();
        Rc::new(RefCell::new(Node { parent, board, children: Vec::new(), visits: 0, reward: 0.0, untried }))
    }
}

/// Monte-Carlo tree search. Each iteration selects a leaf by UCB1, expands
/// one untried move, runs a random playout, and backpropagates the reward.
/// Uses a seeded PRNG so runs are reproducible; this is the one strategy
/// whose answer is not purely a deterministic function of the initial
/// board.
pub struct Mcts;

impl Strategy for Mcts {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board> {
        if initial.is_solved() {
            return Some(initial.clone());
        }

        let deadline = Instant::now() + budget.timeout;
        let mut rng = StdRng::seed_from_u64(budget.mcts_seed);
        let root = Node::new(initial.clone(), None);

        while Instant::now() < deadline && !cancel.is_cancelled() {
            let leaf = select(&root);
            let sim_node = expand(&leaf, &mut rng).unwrap_or(leaf);
            let (reward, solved) = simulate(&sim_node.borrow().board, budget.max_steps, &mut rng);

            if let Some(board) = solved {
                return Some(board);
            }
            backpropagate(&sim_node, reward);
        }

        most_visited_child_board(&root)
    }
}

/// Descends from the root by UCB1 while the current node has no untried
/// moves left and does have children; stops at the first node with
/// expansion work remaining (or a childless leaf).
fn select(root: &Rc<RefCell<Node>>) -> Rc<RefCell<Node>> {
    let mut current = Rc::clone(root);
    loop {
        let (has_untried, has_children) = {
            let node = current.borrow();
            (!node.untried.is_empty(), !node.children.is_empty())
        };
        if has_untried || !has_children {
            return current;
        }
        let parent_visits = current.borrow().visits;
        let children = current.borrow().children.clone();
        let next = children
            .into_iter()
            .max_by(|a, b| ucb1(a, parent_visits).partial_cmp(&ucb1(b, parent_visits)).unwrap())
            .expect("has_children checked above");
        current = next;
    }
}

fn ucb1(node: &Rc<RefCell<Node>>, parent_visits: u32) -> f64 {
    const EPSILON: f64 = 1e-9;
    let n = node.borrow();
    let visits = n.visits as f64 + EPSILON;
    let exploitation = n.reward / visits;
    let exploration = (2.0 * (parent_visits as f64 + 1.0).ln() / visits).sqrt();
    exploitation + exploration
}

/// Pops one untried move uniformly at random and applies it on a fresh board
/// copy. If the click is a no-op, no child is created.
fn expand(node: &Rc<RefCell<Node>>, rng: &mut StdRng) -> Option<Rc<RefCell<Node>>> {
    let pos = {
        let mut n = node.borrow_mut();
        if n.untried.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..n.untried.len());
        n.untried.remove(idx)
    };

    let mut board = node.borrow().board.clone();
    if !board.click(pos.row, pos.col) {
        return None;
    }

    let child = Node::new(board, Some(Rc::downgrade(node)));
    node.borrow_mut().children.push(Rc::clone(&child));
    Some(child)
}

/// Random playout for up to `max_steps` plies, stopping early on a solve or
/// a dead end (no legal moves). Reward is `1` if solved, else
/// `1 / (1 + incorrect_cells)`.
fn simulate(board: &Board, max_steps: u32, rng: &mut StdRng) -> (f64, Option<Board>) {
    let mut current = board.clone();
    if current.is_solved() {
        return (1.0, Some(current));
    }

    for _ in 0..max_steps {
        let moves = current.legal_moves();
        if moves.is_empty() {
            break;
        }
        let pos = moves[rng.gen_range(0..moves.len())];
        current.click(pos.row, pos.col);
        if current.is_solved() {
            return (1.0, Some(current));
        }
    }

    let reward = 1.0 / (1.0 + current.incorrect_cell_count() as f64);
    (reward, None)
}

fn backpropagate(node: &Rc<RefCell<Node>>, reward: f64) {
    let mut current = Some(Rc::clone(node));
    while let Some(n) = current {
        {
            let mut nb = n.borrow_mut();
            nb.visits += 1;
            nb.reward += reward;
        }
        current = n.borrow().parent.as_ref().and_then(Weak::upgrade);
    }
}

fn most_visited_child_board(root: &Rc<RefCell<Node>>) -> Option<Board> {
    root.borrow().children.iter().max_by_key(|c| c.borrow().visits).map(|c| c.borrow().board.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Color, Direction, Modifier};
    use std::time::Duration;

    #[test]
    fn solves_single_arrow_board() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::StaticArrow(Direction::Right)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        let budget = SearchBudget { timeout: Duration::from_millis(500), ..SearchBudget::default() };
        let solved = Mcts.solve(&board, &budget, &CancelToken::new()).unwrap();
        assert!(solved.is_solved());
    }

    #[test]
    fn seed_is_reproducible() {
        let mut cells = vec![Cell::new(Color::Dark, Modifier::Empty); 9];
        cells[4] = Cell::new(Color::Dark, Modifier::Bomb);
        let board = Board::new(3, 3, cells).unwrap();
        let budget = SearchBudget { timeout: Duration::from_millis(200), mcts_seed: 42, ..SearchBudget::default() };

        let first = Mcts.solve(&board, &budget, &CancelToken::new());
        let second = Mcts.solve(&board, &budget, &CancelToken::new());
        assert_eq!(first.map(|b| b.moves().notate()), second.map(|b| b.moves().notate()));
    }

    #[test]
    fn already_solved_board_returns_immediately() {
        let cells = vec![Cell::new(Color::None, Modifier::Wall)];
        let board = Board::new(1, 1, cells).unwrap();
        let budget = SearchBudget { timeout: Duration::from_millis(10), ..SearchBudget::default() };
        let solved = Mcts.solve(&board, &budget, &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().len(), 0);
    }
}

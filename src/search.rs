//! 入れ替え手順の木探索。幅優先・反復深化・貪欲最良優先・A* の 4 種類。

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use anyhow::bail;
use itertools::Itertools as _;
use log::{debug, info};

use crate::action::SwapHistory;
use crate::board::Board;
use crate::frontier::PriorityQueue;
use crate::node::Node;

/// 探索方式。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strategy {
    /// 幅優先 (木探索)。
    Bfs,

    /// 反復深化深さ優先 (木探索)。
    Iddfs,

    /// 貪欲最良優先 (グラフ探索)。評価値は `quota - score`。
    Greedy,

    /// A* (グラフ探索)。評価値は `|quota - score| * cost`。
    AStar,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::Bfs, Self::Iddfs, Self::Greedy, Self::AStar];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Iddfs => "iddfs",
            Self::Greedy => "greedy",
            Self::AStar => "astar",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        match Self::ALL.into_iter().find(|strategy| strategy.name() == s) {
            Some(strategy) => Ok(strategy),
            None => bail!("unknown strategy: {s:?} (expected one of bfs, iddfs, greedy, astar)"),
        }
    }
}

/// 探索の統計情報。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// 子ノードを列挙したノード数。
    pub expanded: usize,

    pub generated: usize,

    /// explored 集合によって捨てたノード数。
    pub duplicates: usize,
}

/// 探索結果。目標スコアに届かなければ、見つけた中で最高スコアのノードを持つ。
#[derive(Clone, Debug)]
pub struct Solution {
    node: Rc<Node>,
    reached_quota: bool,
    stats: SearchStats,
}

impl Solution {
    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }

    pub fn swaps(&self) -> &SwapHistory {
        self.node.state().swaps()
    }

    pub fn score(&self) -> u32 {
        self.node.score()
    }

    pub fn reached_quota(&self) -> bool {
        self.reached_quota
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// 入れ替え手順を 1 行 1 手で表示する。
impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.swaps().fmt(f)
    }
}

/// 探索木。ルートノードは初期盤面のマッチを消した状態から始まる。
#[derive(Debug)]
pub struct Tree {
    root: Rc<Node>,
}

impl Tree {
    pub fn new(board: Board) -> Self {
        Self {
            root: Node::new_root(board),
        }
    }

    pub fn root(&self) -> &Rc<Node> {
        &self.root
    }

    pub fn solve(&self, strategy: Strategy) -> Solution {
        info!(
            "{strategy}: start (quota={} max_swaps={} root_score={})",
            self.root.state().quota(),
            self.root.state().max_swaps(),
            self.root.score()
        );

        let solution = match strategy {
            Strategy::Bfs => self.bfs(),
            Strategy::Iddfs => self.iddfs(),
            Strategy::Greedy => self.greedy(),
            Strategy::AStar => self.astar(),
        };

        let SearchStats {
            expanded,
            generated,
            duplicates,
        } = solution.stats();
        info!(
            "{strategy}: score={} swaps={} reached_quota={} expanded={expanded} generated={generated} duplicates={duplicates}",
            solution.score(),
            solution.swaps().len(),
            solution.reached_quota(),
        );

        solution
    }

    /// 幅優先探索。
    pub fn bfs(&self) -> Solution {
        let mut search = Search::new(&self.root);
        let mut frontier = VecDeque::from([Rc::clone(&self.root)]);

        while let Some(node) = frontier.pop_front() {
            search.visit(&node);
            if node.reached_quota() {
                return search.found(node);
            }
            if node.is_budget_exhausted() {
                continue;
            }
            frontier.extend(search.expand(&node));
        }

        search.exhausted()
    }

    /// 反復深化深さ優先探索。
    ///
    /// 深さ制限 0 から `max_swaps` まで順に深さ制限付き探索を行い、
    /// ちょうど制限の深さで目標スコアに達したノードを最初に見つけた時点で終える。
    pub fn iddfs(&self) -> Solution {
        let mut search = Search::new(&self.root);

        for depth in 0..=self.root.state().max_swaps() {
            if let Some(goal) = search.depth_limited(&self.root, depth) {
                return search.found(goal);
            }
            info!(
                "Depth {depth}: expanded={} generated={} best_score={}",
                search.stats.expanded,
                search.stats.generated,
                search.best.score()
            );
        }

        search.exhausted()
    }

    /// 貪欲最良優先探索。
    pub fn greedy(&self) -> Solution {
        let quota = i64::from(self.root.state().quota());
        self.best_first(move |node: &Rc<Node>| quota - i64::from(node.score()))
    }

    /// A* 探索。
    pub fn astar(&self) -> Solution {
        let quota = self.root.state().quota();
        self.best_first(move |node: &Rc<Node>| astar_key(quota, node.score(), node.cost()))
    }

    /// 評価値 `key` が小さい順にノードを取り出すグラフ探索。
    fn best_first<K, F>(&self, key: F) -> Solution
    where
        K: Ord,
        F: Fn(&Rc<Node>) -> K,
    {
        let mut search = Search::new(&self.root);
        let mut frontier = PriorityQueue::new(key, vec![Rc::clone(&self.root)]);
        let mut explored = HashSet::new();

        while let Some(node) = frontier.dequeue() {
            if !explored.insert(Rc::clone(&node)) {
                search.stats.duplicates += 1;
                continue;
            }

            search.visit(&node);
            if node.reached_quota() {
                return search.found(node);
            }
            if node.is_budget_exhausted() {
                continue;
            }
            frontier.extend(search.expand(&node));
        }

        search.exhausted()
    }
}

/// A* の評価値 `|quota - score| * cost`。u32 同士の積なので u64 に収まる。
fn astar_key(quota: u32, score: u32, cost: u32) -> u64 {
    u64::from(quota.abs_diff(score)) * u64::from(cost)
}

/// 各探索方式が共有する状態。最高スコアのノードと統計情報を持つ。
#[derive(Debug)]
struct Search {
    /// 最高スコアのノード。同点なら先に訪れたもの。
    best: Rc<Node>,

    stats: SearchStats,
}

impl Search {
    fn new(root: &Rc<Node>) -> Self {
        Self {
            best: Rc::clone(root),
            stats: SearchStats::default(),
        }
    }

    fn visit(&mut self, node: &Rc<Node>) {
        if node.score() > self.best.score() {
            debug!("Best {}: cost={}", node.score(), node.cost());
            self.best = Rc::clone(node);
        }
    }

    /// `node` の子ノードを有効手の順に全て生成する。
    fn expand(&mut self, node: &Rc<Node>) -> Vec<Rc<Node>> {
        let children: Vec<_> = node
            .state()
            .valid_moves()
            .into_iter()
            .map(|swap| Node::new_child(node, swap))
            .collect();

        self.stats.expanded += 1;
        self.stats.generated += children.len();

        children
    }

    /// 残り深さ `depth` の深さ制限付き探索。深さ 0 のノードのみを目標判定する。
    fn depth_limited(&mut self, node: &Rc<Node>, depth: u32) -> Option<Rc<Node>> {
        self.visit(node);

        if depth == 0 {
            return node.reached_quota().then(|| Rc::clone(node));
        }

        self.stats.expanded += 1;
        for swap in node.state().valid_moves() {
            let child = Node::new_child(node, swap);
            self.stats.generated += 1;
            if let Some(goal) = self.depth_limited(&child, depth - 1) {
                return Some(goal);
            }
        }

        None
    }

    fn found(self, node: Rc<Node>) -> Solution {
        debug!("Found {}: {}", node.score(), node.state().swaps().iter().join(" "));

        Solution {
            node,
            reached_quota: true,
            stats: self.stats,
        }
    }

    fn exhausted(self) -> Solution {
        debug!("Exhausted: best_score={}", self.best.score());

        Solution {
            node: self.best,
            reached_quota: false,
            stats: self.stats,
        }
    }
}

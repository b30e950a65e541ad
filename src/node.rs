use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::action::{Swap, SwapHistory};
use crate::board::Board;

/// 探索木のノード。
///
/// 生成後は変更しない。親へのリンクは共有の読み取り専用参照。
#[derive(Debug)]
pub struct Node {
    state: Board,

    /// 親からこのノードを得た入れ替え。ルートノードの場合 `None`。
    action: Option<Swap>,

    parent: Option<Rc<Node>>,

    /// ここまでの入れ替え回数。
    cost: u32,
}

impl Node {
    /// ルートノードを作る。初期盤面のマッチはここで消しておく。
    pub fn new_root(board: Board) -> Rc<Self> {
        let mut state = board;
        state.settle();

        Rc::new(Self {
            state,
            action: None,
            parent: None,
            cost: 0,
        })
    }

    /// `parent` の盤面を複製し、`swap` を適用した子ノードを作る。
    pub fn new_child(parent: &Rc<Self>, swap: Swap) -> Rc<Self> {
        let mut state = parent.state.clone();
        state.apply_swap(swap);

        Rc::new(Self {
            state,
            action: Some(swap),
            parent: Some(Rc::clone(parent)),
            cost: parent.cost + 1,
        })
    }

    pub fn state(&self) -> &Board {
        &self.state
    }

    pub fn action(&self) -> Option<Swap> {
        self.action
    }

    pub fn parent(&self) -> Option<&Rc<Node>> {
        self.parent.as_ref()
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn reached_quota(&self) -> bool {
        self.state.reached_quota()
    }

    /// これ以上入れ替えられないかどうかを返す。
    pub fn is_budget_exhausted(&self) -> bool {
        self.cost >= self.state.max_swaps()
    }

    /// 親へのリンクをたどって手順を復元する。
    pub fn path(&self) -> SwapHistory {
        let mut actions = vec![];
        let mut node = self;
        while let Some(action) = node.action {
            actions.push(action);
            match &node.parent {
                Some(parent) => node = parent.as_ref(),
                None => break,
            }
        }

        actions.into_iter().rev().collect()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}

//! 入れ替え型 3 マッチパズル用ソルバーライブラリ。
//!
//! 隣接 2 マスの入れ替えで 3 個以上そろえて消し、落下・補充による連鎖を決定的にシミュレートする。
//! 目標スコアに達する入れ替え手順を 4 種類の木探索で求める。

mod action;
mod board;
mod device;
mod frontier;
mod node;
mod param;
mod search;
mod square;

#[cfg(test)]
mod fixture;

pub use self::action::*;
pub use self::board::*;
pub use self::device::*;
pub use self::frontier::*;
pub use self::node::*;
pub use self::param::*;
pub use self::search::*;
pub use self::square::*;

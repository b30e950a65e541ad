//! テスト用の問題。

use indoc::indoc;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};

use crate::board::Board;
use crate::device::Device;
use crate::param::PuzzleParam;

/// 初期マッチなし。有効手は `(2, 2),(2, 3)` のみで、3 個消える。
pub(crate) const ONE_MOVE: &str = indoc! {"
    3
    5
    3
    3
    4
    1
    0
    2 3 1
    1 2 3
    2 3 1
    1 1 2
"};

/// 1 行目 (pool 直下) が初期マッチ。
pub(crate) const INITIAL_MATCH: &str = indoc! {"
    3
    5
    3
    3
    4
    1
    0
    2 3 1
    1 1 1
    2 3 2
    3 1 3
"};

/// 有効手 2 つがどちらも同じ盤面 (スコア 3) に行き着く。最大入れ替え 1 回、目標は到達不能。
pub(crate) const TWO_WAYS: &str = indoc! {"
    1000
    1
    3
    3
    4
    1
    0
    3 1 2
    1 1 2
    1 3 1
    2 2 3
"};

/// `ONE_MOVE` のスカラー値を差し替えた問題テキスト。
pub(crate) fn one_move_with(quota: u32, max_swaps: u32) -> String {
    let rows: Vec<_> = ONE_MOVE.lines().skip(PuzzleParam::LINE_COUNT).collect();
    format!("{quota}\n{max_swaps}\n3\n3\n4\n1\n0\n{}", rows.join("\n"))
}

/// 乱数で埋めた盤面 (連鎖処理前)。
pub(crate) fn random_board_with(seed: u64, param: PuzzleParam) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let cells = (0..param.width * param.height)
        .map(|_| Device::new(rng.gen_range(1..=param.device_type_count)))
        .collect();

    Board::new(param, cells).unwrap()
}

/// 目標スコア 1000 (到達不能)、最大入れ替え 2 回のランダム盤面。
pub(crate) fn random_board(
    seed: u64,
    width: usize,
    height: usize,
    pool_height: usize,
    device_type_count: u8,
) -> Board {
    random_board_with(
        seed,
        PuzzleParam {
            quota: 1000,
            max_swaps: 2,
            device_type_count,
            width,
            height,
            pool_height,
            bonus_rules: 0,
        },
    )
}

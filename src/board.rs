use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use anyhow::{ensure, Context as _};
use arrayvec::ArrayVec;
use itertools::Itertools as _;
use log::warn;

use crate::action::{Swap, SwapHistory};
use crate::device::{CellDisplay, Device};
use crate::param::PuzzleParam;
use crate::square::Square;

/// マッチとみなす最小の連長。
pub const MATCH_LEN_MIN: usize = 3;

/// 盤面 (探索ノードの状態)。
///
/// 盤面の同一性はマスの内容とスコアのみで決まる。入れ替え履歴は比較しない。
#[derive(Clone, Debug)]
pub struct Board {
    param: PuzzleParam,

    /// 行優先。`None` は空マス。
    cells: Vec<Option<Device>>,

    /// 開始時から消したデバイスの総数。
    score: u32,

    swaps: SwapHistory,

    /// 現在の連鎖ステップで最上段に補充した個数。
    refills: u32,
}

/// マッチ判定の対象となる 1 本の列。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Line {
    /// 行全体。
    Row(usize),

    /// pool より下の部分のみ。
    Column(usize),
}

impl Line {
    /// 列内インデックス `i` に対応するマスを返す。
    fn square(self, i: usize) -> Square {
        match self {
            Self::Row(y) => Square::new(i, y),
            Self::Column(x) => Square::new(x, i),
        }
    }
}

impl Board {
    /// `param` と行優先のマス列から盤面を作る。連鎖処理は行わない。
    pub fn new(param: PuzzleParam, cells: Vec<Option<Device>>) -> anyhow::Result<Self> {
        param.validate()?;

        let len = param.width * param.height;
        ensure!(
            cells.len() == len,
            "cell count mismatch: expected {len}, got {}",
            cells.len()
        );
        if let Some(device) = cells
            .iter()
            .flatten()
            .find(|device| device.label() > param.device_type_count)
        {
            anyhow::bail!(
                "device label {device} out of range 1..={}",
                param.device_type_count
            );
        }

        Ok(Self {
            param,
            cells,
            score: 0,
            swaps: SwapHistory::new(),
            refills: 0,
        })
    }

    /// 空白区切りの行テキスト `rows` から盤面を作る。
    pub fn from_rows<'a, I>(param: PuzzleParam, rows: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        param.validate()?;

        let mut cells = Vec::with_capacity(param.width * param.height);
        let mut row_count = 0;
        for (y, row) in rows.into_iter().enumerate() {
            ensure!(y < param.height, "too many rows: expected {}", param.height);
            let tokens: Vec<_> = row.split_whitespace().collect();
            ensure!(
                tokens.len() == param.width,
                "row {y}: expected {} devices, got {}",
                param.width,
                tokens.len()
            );
            for (x, token) in tokens.into_iter().enumerate() {
                let cell = Device::parse_cell(token, param.device_type_count)
                    .with_context(|| format!("row {y}, column {x}"))?;
                cells.push(cell);
            }
            row_count += 1;
        }
        ensure!(
            row_count == param.height,
            "too few rows: expected {}, got {row_count}",
            param.height
        );

        Self::new(param, cells)
    }

    pub fn param(&self) -> &PuzzleParam {
        &self.param
    }

    pub fn width(&self) -> usize {
        self.param.width
    }

    pub fn height(&self) -> usize {
        self.param.height
    }

    pub fn pool_height(&self) -> usize {
        self.param.pool_height
    }

    pub fn quota(&self) -> u32 {
        self.param.quota
    }

    pub fn max_swaps(&self) -> u32 {
        self.param.max_swaps
    }

    pub fn device_type_count(&self) -> u8 {
        self.param.device_type_count
    }

    pub fn bonus_rules(&self) -> u32 {
        self.param.bonus_rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 目標スコアに達したかどうかを返す。
    pub fn reached_quota(&self) -> bool {
        self.score >= self.param.quota
    }

    pub fn swaps(&self) -> &SwapHistory {
        &self.swaps
    }

    pub fn get(&self, sq: Square) -> Option<Device> {
        self.cells[self.index(sq)]
    }

    fn set(&mut self, sq: Square, cell: Option<Device>) {
        let i = self.index(sq);
        self.cells[i] = cell;
    }

    fn index(&self, sq: Square) -> usize {
        debug_assert!(sq.x < self.width() && sq.y < self.height());
        self.param.width * sq.y + sq.x
    }

    /// 全マスを行優先で列挙する。
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Option<Device>> + '_ {
        self.cells.iter().copied()
    }

    /// 2 マスの内容を入れ替える。隣接判定などは行わない。
    pub fn swap(&mut self, a: Square, b: Square) {
        let (i, j) = (self.index(a), self.index(b));
        self.cells.swap(i, j);
    }

    /// `swap` を実行して履歴に記録し、その周辺のマッチから連鎖処理を行う。
    pub fn apply_swap(&mut self, swap: Swap) {
        self.swap(swap.src, swap.dst);
        self.swaps.push(swap);

        let matches = self.matches_near(swap.src, swap.dst);
        self.remove_and_cascade(matches);
    }

    /// 盤面全体のマッチを消し、連鎖が止まるまで処理する (探索開始前の初期化)。
    pub fn settle(&mut self) {
        let matches = self.all_matches();
        self.remove_and_cascade(matches);
    }

    /// 入れ替えた 2 マス `a`, `b` 付近のマッチを返す。
    ///
    /// 横入れ替えなら共通の行と 2 本の列、縦入れ替えなら 2 本の行と共通の列を調べる。
    /// 各列について最初に見つかった連のみを返し、行と列の両方に属するマスは重複して現れる。
    pub fn matches_near(&self, a: Square, b: Square) -> Vec<Square> {
        Self::lines_near(a, b)
            .into_iter()
            .flat_map(|line| self.line_match(line))
            .collect()
    }

    fn has_match_near(&self, a: Square, b: Square) -> bool {
        Self::lines_near(a, b)
            .into_iter()
            .any(|line| self.line_run(line).is_some())
    }

    fn lines_near(a: Square, b: Square) -> ArrayVec<Line, 3> {
        let mut lines = ArrayVec::new();
        if a.x != b.x {
            lines.push(Line::Row(a.y));
            lines.push(Line::Column(a.x));
            lines.push(Line::Column(b.x));
        } else {
            lines.push(Line::Row(a.y));
            lines.push(Line::Row(b.y));
            lines.push(Line::Column(a.x));
        }
        lines
    }

    /// pool より下の全ての行、全ての列のマッチを返す (行が先)。
    pub fn all_matches(&self) -> Vec<Square> {
        let rows = (self.pool_height()..self.height()).map(Line::Row);
        let cols = (0..self.width()).map(Line::Column);

        rows.chain(cols)
            .flat_map(|line| self.line_match(line))
            .collect()
    }

    fn line_match(&self, line: Line) -> impl Iterator<Item = Square> {
        self.line_run(line)
            .into_iter()
            .flatten()
            .map(move |i| line.square(i))
    }

    /// `line` 上の最初の連の範囲を返す (盤面上の座標で)。
    fn line_run(&self, line: Line) -> Option<Range<usize>> {
        match line {
            Line::Row(y) => first_run((0..self.width()).map(|x| self.get(Square::new(x, y)))),
            Line::Column(x) => {
                let pool_height = self.pool_height();
                first_run((pool_height..self.height()).map(|y| self.get(Square::new(x, y))))
                    .map(|run| run.start + pool_height..run.end + pool_height)
            }
        }
    }

    /// `matches` を消して落下・補充させ、新たなマッチがなくなるまで繰り返す。
    ///
    /// スコアは `matches` の要素数だけ加算される (重複要素も数える)。
    /// 連鎖途中の盤面が以前と一致した場合は無限に繰り返すことになるので、そこで打ち切る。
    pub fn remove_and_cascade(&mut self, matches: Vec<Square>) {
        let mut matches = matches;
        let mut seen = HashSet::new();

        loop {
            self.refills = 0;
            if matches.is_empty() {
                return;
            }

            for &sq in &matches {
                self.score += 1;
                self.set(sq, None);
            }
            while self.simulate_falling() {}

            if !seen.insert(self.cells.clone()) {
                warn!("cascade cycle detected, stopping: score={}", self.score);
                self.refills = 0;
                return;
            }

            matches = self.all_matches();
        }
    }

    /// 上の行から順に空マスを埋める。空マスがあったかどうかを返す。
    ///
    /// 空マスは上のデバイスを順に引き下ろして最上段まで移動し、最上段で補充式により埋まる。
    pub fn simulate_falling(&mut self) -> bool {
        let mut falling = false;

        for y in 0..self.height() {
            for x in 0..self.width() {
                let sq = Square::new(x, y);
                if self.get(sq).is_none() {
                    falling = true;
                    self.fill(sq);
                }
            }
        }

        falling
    }

    fn fill(&mut self, sq: Square) {
        let mut sq = sq;
        while let Some(sq_up) = sq.up() {
            self.swap(sq, sq_up);
            sq = sq_up;
        }

        self.refills += 1;
        let device = self.new_device(sq.x);
        self.set(sq, Some(device));
    }

    /// 最上段の列 `x` に補充するデバイス。
    ///
    /// `(2 段目の列 x のラベル + x + 補充個数) mod 種類数 + 1`。
    /// 2 段目が存在しないか空マスの場合、そのラベルは 0 とみなす。
    fn new_device(&self, x: usize) -> Device {
        let base = if self.height() > 1 {
            self.get(Square::new(x, 1))
                .map_or(0, |device| u64::from(device.label()))
        } else {
            0
        };
        let n = u64::from(self.device_type_count());
        let label = (base + x as u64 + u64::from(self.refills)) % n + 1;

        Device::from_label_unchecked(label as u8)
    }

    /// マッチを生む入れ替えを全て返す。
    ///
    /// 横の入れ替えを (行, 列) 順に、次に縦の入れ替えを同様に列挙する。pool 内は対象外。
    pub fn valid_moves(&self) -> Vec<Swap> {
        let width = self.width();
        let height = self.height();
        let pool_height = self.pool_height();

        let horizontals = (pool_height..height).flat_map(move |y| {
            (0..width.saturating_sub(1)).map(move |x| {
                let sq = Square::new(x, y);
                Swap::new(sq, sq.right())
            })
        });
        let verticals = (pool_height..height.saturating_sub(1)).flat_map(move |y| {
            (0..width).map(move |x| {
                let sq = Square::new(x, y);
                Swap::new(sq, sq.down())
            })
        });

        let mut probe = self.clone();
        let mut moves = vec![];
        for swap in horizontals.chain(verticals) {
            probe.swap(swap.src, swap.dst);
            if probe.has_match_near(swap.src, swap.dst) {
                moves.push(swap);
            }
            probe.swap(swap.src, swap.dst);
        }

        moves
    }
}

/// 最初の「同じデバイスが `MATCH_LEN_MIN` 個以上連続する極大区間」を返す。空マスは連にならない。
fn first_run<I>(cells: I) -> Option<Range<usize>>
where
    I: IntoIterator<Item = Option<Device>>,
{
    let mut start = 0;
    for (len, cell) in cells.into_iter().dedup_with_count() {
        if cell.is_some() && len >= MATCH_LEN_MIN {
            return Some(start..start + len);
        }
        start += len;
    }

    None
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.score == other.score
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
        self.score.hash(state);
    }
}

impl std::str::FromStr for Board {
    type Err = anyhow::Error;

    /// 問題テキスト (スカラー 7 行 + 盤面 `height` 行) をパースする。末尾の空行は無視する。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<_> = s.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let split = PuzzleParam::LINE_COUNT.min(lines.len());
        let (head, rows) = lines.split_at(split);
        let param = PuzzleParam::parse_lines(head.iter().copied())?;

        Self::from_rows(param, rows.iter().copied())
    }
}

/// 行ごとに空白区切りで表示する。pool と盤面の間に区切り線を入れる。
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let width = self.width();
        let rows = self.cells.chunks(width).enumerate().map(|(y, row)| {
            let row = row.iter().map(|&cell| CellDisplay(cell)).join(" ");
            if y == self.pool_height() {
                format!("{}\n{row}", "-".repeat(2 * width - 1))
            } else {
                row
            }
        });

        write!(f, "{}", rows.format("\n"))
    }
}

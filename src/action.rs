use itertools::Itertools as _;

use crate::square::Square;

/// 隣接 2 マスの入れ替え。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Swap {
    pub src: Square,
    pub dst: Square,
}

impl Swap {
    pub const fn new(src: Square, dst: Square) -> Self {
        Self { src, dst }
    }

    /// 横方向の入れ替えかどうかを返す。
    pub fn is_horizontal(self) -> bool {
        self.src.x != self.dst.x
    }
}

impl From<(Square, Square)> for Swap {
    fn from((src, dst): (Square, Square)) -> Self {
        Self::new(src, dst)
    }
}

/// `"(x1, y1),(x2, y2)"` 形式。
impl std::fmt::Display for Swap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{}", self.src, self.dst)
    }
}

/// 実際に行った入れ替えの手順。
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SwapHistory(Vec<Swap>);

impl SwapHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, swap: Swap) {
        self.0.push(swap);
    }

    pub fn as_slice(&self) -> &[Swap] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swap> {
        self.0.iter()
    }
}

impl FromIterator<Swap> for SwapHistory {
    fn from_iter<I: IntoIterator<Item = Swap>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SwapHistory {
    type Item = &'a Swap;
    type IntoIter = std::slice::Iter<'a, Swap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 1 行 1 手の改行区切り。
impl std::fmt::Display for SwapHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_display() {
        let swap = Swap::new(Square::new(1, 0), Square::new(2, 0));
        assert_eq!(swap.to_string(), "(1, 0),(2, 0)");
        assert!(swap.is_horizontal());
        assert!(!Swap::new(Square::new(1, 0), Square::new(1, 1)).is_horizontal());
    }

    #[test]
    fn test_history_display() {
        assert_eq!(SwapHistory::new().to_string(), "");

        let history: SwapHistory = [
            Swap::new(Square::new(2, 2), Square::new(2, 3)),
            Swap::new(Square::new(0, 2), Square::new(1, 2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(history.len(), 2);
        assert_eq!(history.to_string(), "(2, 2),(2, 3)\n(0, 2),(1, 2)");
    }
}

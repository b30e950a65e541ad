/// 盤面上のマス。`(x, y)` = (列, 行) で、どちらも 0-based。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Square {
    pub x: usize,
    pub y: usize,
}

impl Square {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// 右隣のマスを返す (範囲チェックはしない)。
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    /// 下隣のマスを返す (範囲チェックはしない)。
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// 上隣のマスを返す。最上段なら `None`。
    pub fn up(self) -> Option<Self> {
        self.y.checked_sub(1).map(|y| Self::new(self.x, y))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let sq = Square::new(2, 3);
        assert_eq!(sq.right(), Square::new(3, 3));
        assert_eq!(sq.down(), Square::new(2, 4));
        assert_eq!(sq.up(), Some(Square::new(2, 2)));
        assert_eq!(Square::new(5, 0).up(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Square::new(0, 7).to_string(), "(0, 7)");
    }
}

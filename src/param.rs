use anyhow::{ensure, Context as _};

use crate::device::DEVICE_TYPE_MAX;

/// 問題ファイル先頭のスカラー値 7 個。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PuzzleParam {
    /// 目標スコア。
    pub quota: u32,

    /// 1 経路あたりの最大入れ替え回数。
    pub max_swaps: u32,

    /// デバイス種類数 (1..=9)。補充式の法になる。
    pub device_type_count: u8,

    pub width: usize,
    pub height: usize,

    /// 上端の pool 行数。この範囲はマッチ判定の対象外。
    pub pool_height: usize,

    /// ボーナスルール番号。読み込むだけで使わない。
    pub bonus_rules: u32,
}

impl PuzzleParam {
    /// 行数。
    pub const LINE_COUNT: usize = 7;

    /// 先頭 7 行をパースする。各行に整数を 1 個だけ書く。
    pub fn parse_lines<'a, I>(lines: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lines = lines.into_iter();
        let mut next = |name: &str| {
            lines
                .next()
                .with_context(|| format!("missing field: {name}"))
                .map(str::trim)
        };

        let quota = next("quota")?;
        let max_swaps = next("max_swaps")?;
        let device_type_count = next("num_device_types")?;
        let width = next("width")?;
        let height = next("height")?;
        let pool_height = next("pool_height")?;
        let bonus_rules = next("bonus_rules")?;

        macro_rules! parse_field {
            ($ty:ty, $name:literal, $s:expr) => {{
                let s = $s;
                parse_int::parse::<$ty>(s)
                    .with_context(|| format!("invalid {}: {s:?}", $name))?
            }};
        }

        let param = Self {
            quota: parse_field!(u32, "quota", quota),
            max_swaps: parse_field!(u32, "max_swaps", max_swaps),
            device_type_count: parse_field!(u8, "num_device_types", device_type_count),
            width: parse_field!(usize, "width", width),
            height: parse_field!(usize, "height", height),
            pool_height: parse_field!(usize, "pool_height", pool_height),
            bonus_rules: parse_field!(u32, "bonus_rules", bonus_rules),
        };
        param.validate()?;

        Ok(param)
    }

    /// 値の整合性を検査する。
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (1..=DEVICE_TYPE_MAX).contains(&self.device_type_count),
            "num_device_types must be in 1..={DEVICE_TYPE_MAX}: {}",
            self.device_type_count
        );
        ensure!(self.width > 0, "width must be positive");
        ensure!(self.height > 0, "height must be positive");
        ensure!(
            self.pool_height <= self.height,
            "pool_height ({}) exceeds height ({})",
            self.pool_height,
            self.height
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let param = PuzzleParam::parse_lines(["3", "5", "4", "0x3", " 4 ", "1", "0"]).unwrap();
        assert_eq!(
            param,
            PuzzleParam {
                quota: 3,
                max_swaps: 5,
                device_type_count: 4,
                width: 3,
                height: 4,
                pool_height: 1,
                bonus_rules: 0,
            }
        );
    }

    #[test]
    fn test_parse_lines_malformed() {
        // 行不足
        assert!(PuzzleParam::parse_lines(["3", "5", "4", "3", "4", "1"]).is_err());
        // 非数値
        assert!(PuzzleParam::parse_lines(["3", "five", "4", "3", "4", "1", "0"]).is_err());
        assert!(PuzzleParam::parse_lines(["3", "5", "4", "3", "4", "1", ""]).is_err());
    }

    #[test]
    fn test_validate() {
        let parse = |lines: [&str; 7]| PuzzleParam::parse_lines(lines);

        assert!(parse(["3", "5", "9", "3", "4", "1", "0"]).is_ok());
        assert!(parse(["3", "5", "10", "3", "4", "1", "0"]).is_err());
        assert!(parse(["3", "5", "0", "3", "4", "1", "0"]).is_err());
        assert!(parse(["3", "5", "4", "0", "4", "1", "0"]).is_err());
        assert!(parse(["3", "5", "4", "3", "0", "0", "0"]).is_err());
        assert!(parse(["3", "5", "4", "3", "4", "4", "0"]).is_ok());
        assert!(parse(["3", "5", "4", "3", "4", "5", "0"]).is_err());
    }
}

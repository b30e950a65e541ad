use std::num::NonZeroU8;

use anyhow::{anyhow, ensure};

/// デバイス種類数の上限。ラベルが 1 文字で表せる範囲。
pub const DEVICE_TYPE_MAX: u8 = 9;

/// 盤面上のデバイス (ラベル 1..=9)。
///
/// マスは `Option<Device>` で表し、`None` が空マス (`E`)。
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Device(NonZeroU8);

impl Device {
    /// ラベル `label` のデバイスを返す。範囲外なら `None`。
    pub fn new(label: u8) -> Option<Self> {
        (label <= DEVICE_TYPE_MAX)
            .then(|| NonZeroU8::new(label))
            .flatten()
            .map(Self)
    }

    pub fn label(self) -> u8 {
        self.0.get()
    }

    /// ラベル `label` のデバイスを返す。`label` は 1..=9 でなければならない。
    pub(crate) fn from_label_unchecked(label: u8) -> Self {
        debug_assert!((1..=DEVICE_TYPE_MAX).contains(&label));
        Self(NonZeroU8::new(label).unwrap_or(NonZeroU8::MIN))
    }

    /// 1 マス分のトークンをパースする。`E` は空マス。
    pub fn parse_cell(s: &str, device_type_count: u8) -> anyhow::Result<Option<Self>> {
        if s == "E" {
            return Ok(None);
        }

        let label: u8 = s.parse().map_err(|_| anyhow!("invalid device: {s:?}"))?;
        ensure!(
            (1..=device_type_count).contains(&label),
            "device label {label} out of range 1..={device_type_count}"
        );

        Ok(Self::new(label))
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// マスを 1 文字で表示する (空マスは `E`)。
pub(crate) struct CellDisplay(pub Option<Device>);

impl std::fmt::Display for CellDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.0 {
            Some(device) => device.fmt(f),
            None => f.write_str("E"),
        }
    }
}

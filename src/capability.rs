//! 编译期选择按钮启用的功能：点击、长按或两者。
//!
//! 状态机直接分支于关联常量，未启用的一半由编译器消除，不会在每次轮询时判断。

mod sealed {
    pub trait Sealed {}
}

pub trait Capability: sealed::Sealed {
    /// 结束的点击序列上报为 [`PressKind::Press`](crate::PressKind::Press)。
    const PRESS: bool;
    /// 长按上报为 [`PressKind::Hold`](crate::PressKind::Hold)。
    const HOLD: bool;
}

/// 仅点击；从不检查长按窗口。
#[derive(Debug, Clone, Copy, Default)]
pub struct PressOnly;

/// 仅长按；点击序列被丢弃。
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldOnly;

/// 点击与长按。
#[derive(Debug, Clone, Copy, Default)]
pub struct PressAndHold;

impl sealed::Sealed for PressOnly {}
impl sealed::Sealed for HoldOnly {}
impl sealed::Sealed for PressAndHold {}

impl Capability for PressOnly {
    const PRESS: bool = true;
    const HOLD: bool = false;
}

impl Capability for HoldOnly {
    const PRESS: bool = false;
    const HOLD: bool = true;
}

impl Capability for PressAndHold {
    const PRESS: bool = true;
    const HOLD: bool = true;
}

use embassy_time::Instant;

/// 单调递增、允许回绕的毫秒时钟。
///
/// 状态机只用 `wrapping_sub` 计算两次读数之差，
/// 只要单个时间间隔不超过 `u32` 范围的一半，时钟溢出回绕后依然正确。
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// 基于 embassy 时间驱动的 [`Clock`]。
///
/// 64 位计数被截断为 `u32` 毫秒，约 49.7 天回绕一次。
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

/// 回绕时钟上从 `since` 到 `now` 经过的毫秒数。
#[inline]
pub(crate) fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

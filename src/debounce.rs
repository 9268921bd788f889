use crate::clock::elapsed;

/// 原始电平的消抖滤波器。
///
/// 新的原始电平必须保持不变至少一个稳定时间，才会被确认为稳定电平。
/// 这里的电平已按有效电平换算：`true` 表示按下。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    last_raw: bool,
    last_raw_change: u32,
    steady: bool,
    steady_since: u32,
}

impl Debouncer {
    /// 从 `now` 起稳定在 `level` 的滤波器。
    pub fn new(level: bool, now: u32) -> Self {
        Self {
            last_raw: level,
            last_raw_change: now,
            steady: level,
            steady_since: now,
        }
    }

    /// 输入一个原始采样。稳定电平发生变化时返回 `true`。
    pub fn sample(&mut self, raw: bool, now: u32, settle_ms: u32) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_raw_change = now;
            return false;
        }

        if raw != self.steady && elapsed(now, self.last_raw_change) >= settle_ms {
            self.steady = raw;
            self.steady_since = now;
            #[cfg(feature = "defmt")]
            defmt::trace!("steady level -> active={} at {=u32}ms", raw, now);
            return true;
        }

        false
    }

    pub fn steady(&self) -> bool {
        self.steady
    }

    /// 当前稳定电平被确认的时刻。
    pub fn steady_since(&self) -> u32 {
        self.steady_since
    }
}

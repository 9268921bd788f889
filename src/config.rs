use embassy_time::Duration;

use crate::gpio::ActiveLevel;

/// 所有配置的时间窗口必须小于 `u32` 毫秒时钟范围的一半，
/// 回绕减法才能正确比较时间戳。
pub const MAX_WINDOW_MS: u64 = (u32::MAX / 2) as u64;

/// 定义按钮事件逻辑的时间与电平参数。
///
/// 所有窗口的精度受调用方轮询周期限制：短于两次 `poll` 间隔的窗口
/// 无法可靠检测，库不会对此做任何补偿。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// 消抖稳定时间。
    ///
    /// 原始电平需保持不变达到此时长，才会被确认为稳定电平。
    pub settle_time: Duration,

    /// 按下时的有效电平。
    pub active_level: ActiveLevel,

    /// 多击的时间窗口。
    ///
    /// 释放后在此窗口内再次按下，计入同一序列；
    /// 超过此窗口仍未按下，则以已完成的点击次数结束序列。
    pub press_window: Duration,

    /// 触发长按所需的持续按下时长。
    pub hold_window: Duration,

    /// 最大连击次数，达到后序列立即结束。
    pub max_clicks: u8,

    /// 长按状态下重复触发的周期。
    pub retrigger_interval: Duration,
}

impl Default for ButtonConfig {
    /// 提供一套合理的默认配置。
    ///
    /// - 消抖: 15ms
    /// - 有效电平: 低电平
    /// - 多击窗口: 200ms
    /// - 长按阈值: 300ms
    /// - 最大连击: 3
    /// - 长按连发周期: 100ms
    fn default() -> Self {
        Self {
            settle_time: Duration::from_millis(15),
            active_level: ActiveLevel::Low,
            press_window: Duration::from_millis(200),
            hold_window: Duration::from_millis(300),
            max_clicks: 3,
            retrigger_interval: Duration::from_millis(100),
        }
    }
}

impl ButtonConfig {
    /// 校验配置，并转换为状态机使用的毫秒形式。
    pub fn validate(&self) -> Result<Timing, ConfigError> {
        let settle_ms = window_ms(self.settle_time, ConfigError::ZeroSettleTime)?;
        let press_window_ms = window_ms(self.press_window, ConfigError::ZeroPressWindow)?;
        let hold_window_ms = window_ms(self.hold_window, ConfigError::ZeroHoldWindow)?;
        let retrigger_ms =
            window_ms(self.retrigger_interval, ConfigError::ZeroRetriggerInterval)?;

        if self.max_clicks == 0 {
            return Err(ConfigError::ZeroMaxClicks);
        }
        if hold_window_ms < settle_ms {
            return Err(ConfigError::HoldShorterThanSettle);
        }

        Ok(Timing {
            settle_ms,
            press_window_ms,
            hold_window_ms,
            retrigger_ms,
            max_clicks: self.max_clicks,
        })
    }
}

fn window_ms(window: Duration, zero: ConfigError) -> Result<u32, ConfigError> {
    let ms = window.as_millis();
    if ms == 0 {
        return Err(zero);
    }
    if ms > MAX_WINDOW_MS {
        return Err(ConfigError::WindowTooLong);
    }
    // 上面已限制在 MAX_WINDOW_MS 以内。
    Ok(ms as u32)
}

/// 校验后的配置，单位为轮询时钟的毫秒。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub settle_ms: u32,
    pub press_window_ms: u32,
    pub hold_window_ms: u32,
    pub retrigger_ms: u32,
    pub max_clicks: u8,
}

/// 被拒绝的按钮配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroSettleTime,
    ZeroPressWindow,
    ZeroHoldWindow,
    ZeroRetriggerInterval,
    ZeroMaxClicks,
    /// 长按阈值不能短于消抖稳定时间。
    HoldShorterThanSettle,
    /// 时间窗口超过毫秒时钟范围的一半。
    WindowTooLong,
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroSettleTime => write!(f, "settle time must be positive"),
            Self::ZeroPressWindow => write!(f, "press window must be positive"),
            Self::ZeroHoldWindow => write!(f, "hold window must be positive"),
            Self::ZeroRetriggerInterval => write!(f, "retrigger interval must be positive"),
            Self::ZeroMaxClicks => write!(f, "max clicks must be at least 1"),
            Self::HoldShorterThanSettle => {
                write!(f, "hold window is shorter than the settle time")
            }
            Self::WindowTooLong => {
                write!(f, "window exceeds {} ms", MAX_WINDOW_MS)
            }
        }
    }
}

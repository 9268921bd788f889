#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod capability;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod engine;
pub mod event;
pub mod gpio;

pub use capability::{Capability, HoldOnly, PressAndHold, PressOnly};
pub use clock::{Clock, EmbassyClock};
pub use config::*;
pub use event::{PressEvent, PressKind, TriggerState};

use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;

use crate::{
    debounce::Debouncer,
    engine::{Engine, RunState},
    gpio::{ActiveLevel, GpioLine},
};

/// 通过轮询把单个按键引脚分类为点击与长按。
///
/// 以稳定的周期调用 [`Button::poll`]，例如每个控制循环一次。
/// `poll` 从不阻塞；两次轮询之间，返回的 [`PressEvent`]
/// （也可通过 [`Button::event`] 获取）描述发生了什么。
///
/// `M` 选择产生哪些事件，见 [`capability`]。
pub struct Button<P: InputPin, C: Clock, M: Capability = PressAndHold> {
    line: GpioLine<P>,
    clock: C,
    config: ButtonConfig,
    timing: Timing,
    debouncer: Debouncer,
    engine: Engine<M>,
}

impl<P: InputPin, C: Clock, M: Capability> Button<P, C, M> {
    /// 创建一个处于释放状态的按钮。
    pub fn new(pin: P, clock: C, config: ButtonConfig) -> Result<Self, ConfigError> {
        let timing = config.validate()?;
        let now = clock.now_ms();
        Ok(Self {
            line: GpioLine::new(pin, config.active_level.inactive_high()),
            clock,
            config,
            timing,
            debouncer: Debouncer::new(false, now),
            engine: Engine::new(),
        })
    }

    /// 采样一次引脚并推进分类。
    pub fn poll(&mut self) -> PressEvent {
        let raw = self.line.read_active(self.config.active_level);
        let now = self.clock.now_ms();
        self.debouncer.sample(raw, now, self.timing.settle_ms);
        self.engine.step(
            self.debouncer.steady(),
            self.debouncer.steady_since(),
            now,
            &self.timing,
        )
    }

    /// 每隔 `poll_period` 轮询一次，直到点击序列结束或长按触发。
    pub async fn next_event(&mut self, poll_period: Duration) -> PressEvent {
        loop {
            let event = self.poll();
            if event.is_firing() {
                return event;
            }
            Timer::after(poll_period).await;
        }
    }

    /// 上一次轮询的结果。
    pub fn event(&self) -> PressEvent {
        self.engine.event()
    }

    /// 上一次轮询结束的点击次数，否则为 0。
    pub fn clicks(&self) -> u8 {
        self.engine.event().clicks()
    }

    /// 仅在长按首次触发的那次轮询返回长按序号。
    pub fn hold_once(&self) -> u8 {
        self.engine.event().hold_once()
    }

    /// 长按每次触发或连发时返回长按序号。
    pub fn hold_repeat(&self) -> u8 {
        self.engine.event().hold_repeat()
    }

    /// 进行中长按的序号，不论触发阶段。
    pub fn hold_amount(&self) -> u8 {
        self.engine.event().hold_amount()
    }

    /// 下一次长按连发改为等待 `delay`，而不是连发周期。
    /// 只生效一次，之后恢复配置的周期。
    pub fn set_next_retrigger_delay(&mut self, delay: Duration) -> Result<(), ConfigError> {
        let delay_ms = delay.as_millis();
        if delay_ms == 0 {
            return Err(ConfigError::ZeroRetriggerInterval);
        }
        if delay_ms > MAX_WINDOW_MS {
            return Err(ConfigError::WindowTooLong);
        }
        self.engine.set_retrigger_override(delay_ms as u32);
        Ok(())
    }

    /// 消抖后的电平；`true` 表示按下。
    pub fn steady_level(&self) -> bool {
        self.debouncer.steady()
    }

    /// 绕过消抖直接读取引脚。`true` 表示按下。
    pub fn read_raw(&mut self) -> bool {
        self.line.read_active(self.config.active_level)
    }

    pub fn is_active(&self) -> bool {
        self.debouncer.steady()
    }

    /// 已释放且没有进行中的序列。
    pub fn is_idle(&self) -> bool {
        !self.debouncer.steady() && self.engine.state() == RunState::Idle
    }

    /// 有进行中的点击或长按序列。
    pub fn is_waiting(&self) -> bool {
        self.engine.state() != RunState::Idle
    }

    /// 当前序列中已触发过长按。
    pub fn was_held(&self) -> bool {
        matches!(self.engine.state(), RunState::Active { hold_fired: true, .. })
    }

    pub fn run_state(&self) -> RunState {
        self.engine.state()
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// 替换整个配置。出错时保留原配置。
    pub fn set_config(&mut self, new_config: ButtonConfig) -> Result<(), ConfigError> {
        self.timing = new_config.validate()?;
        self.config = new_config;
        Ok(())
    }

    pub fn set_settle_time(&mut self, settle_time: Duration) -> Result<(), ConfigError> {
        self.update_config(|c| c.settle_time = settle_time)
    }

    /// 修改有效电平。之后按键视为释放状态。
    pub fn set_active_level(&mut self, active_level: ActiveLevel) -> Result<(), ConfigError> {
        self.update_config(|c| c.active_level = active_level)?;
        self.reset();
        Ok(())
    }

    pub fn set_press_window(&mut self, press_window: Duration) -> Result<(), ConfigError> {
        self.update_config(|c| c.press_window = press_window)
    }

    pub fn set_hold_window(&mut self, hold_window: Duration) -> Result<(), ConfigError> {
        self.update_config(|c| c.hold_window = hold_window)
    }

    pub fn set_max_clicks(&mut self, max_clicks: u8) -> Result<(), ConfigError> {
        self.update_config(|c| c.max_clicks = max_clicks)
    }

    pub fn set_retrigger_interval(&mut self, interval: Duration) -> Result<(), ConfigError> {
        self.update_config(|c| c.retrigger_interval = interval)
    }

    fn update_config(&mut self, f: impl FnOnce(&mut ButtonConfig)) -> Result<(), ConfigError> {
        let mut config = self.config;
        f(&mut config);
        self.set_config(config)
    }

    /// 重置按钮状态到初始空闲状态，丢弃进行中的序列。
    pub fn reset(&mut self) {
        self.debouncer = Debouncer::new(false, self.clock.now_ms());
        self.engine.reset();
    }

    pub fn input(&self) -> &P {
        self.line.pin()
    }

    pub fn input_mut(&mut self) -> &mut P {
        self.line.pin_mut()
    }

    /// 取回引脚和时钟。
    pub fn release(self) -> (P, C) {
        (self.line.into_inner(), self.clock)
    }
}

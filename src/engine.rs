use core::marker::PhantomData;

use crate::{
    capability::Capability,
    clock::elapsed,
    config::Timing,
    event::{PressEvent, TriggerState},
};

/// 当前点击/长按序列的进度。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// 没有进行中的序列，按键处于释放状态。
    Idle,
    /// 按键按下中；本序列已完成 `clicks` 次点击。
    Active { clicks: u8, hold_fired: bool },
    /// 两次按下之间的释放阶段，已完成 `clicks` 次点击。
    Gap { clicks: u8 },
}

/// 由消抖后的稳定电平驱动的状态机：多击计数、长按检测与长按连发。
#[derive(Debug, Clone)]
pub struct Engine<M: Capability> {
    state: RunState,
    event: PressEvent,
    retrigger_override: Option<u32>,
    _capability: PhantomData<M>,
}

impl<M: Capability> Default for Engine<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Capability> Engine<M> {
    pub const fn new() -> Self {
        Self {
            state: RunState::Idle,
            event: PressEvent::indeterminate(),
            retrigger_override: None,
            _capability: PhantomData,
        }
    }

    /// 推进一次轮询。
    ///
    /// `active` 为稳定电平，`steady_since` 为该电平确认的时刻；
    /// 多击窗口和长按窗口都从这一时刻开始计算。
    pub fn step(&mut self, active: bool, steady_since: u32, now: u32, timing: &Timing) -> PressEvent {
        match (self.state, active) {
            (RunState::Idle, false) => self.event = PressEvent::indeterminate(),
            (RunState::Idle, true) => {
                self.state = RunState::Active {
                    clicks: 0,
                    hold_fired: false,
                };
                self.event = PressEvent::indeterminate();
            }

            (RunState::Active { hold_fired: true, .. }, true) => self.retrigger(now, timing),
            (RunState::Active { clicks, hold_fired: false }, true) => {
                if M::HOLD && elapsed(now, steady_since) > timing.hold_window_ms {
                    let amount = clicks.saturating_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::debug!("hold {=u8} fired at {=u32}ms", amount, now);
                    self.state = RunState::Active {
                        clicks,
                        hold_fired: true,
                    };
                    self.event = PressEvent::hold(amount, now);
                } else {
                    self.event = PressEvent::indeterminate();
                }
            }
            (RunState::Active { hold_fired: true, .. }, false) => {
                // 长按过的序列不再计为点击，即使恰好达到点击上限。
                self.finish(PressEvent::indeterminate());
            }
            (RunState::Active { clicks, hold_fired: false }, false) => {
                let completed = clicks.saturating_add(1);
                if completed >= timing.max_clicks {
                    // 只有同时启用点击与长按时，达到上限才立即结束为点击事件。
                    if M::PRESS && M::HOLD {
                        self.finish(PressEvent::press(timing.max_clicks, now));
                    } else {
                        self.finish(PressEvent::indeterminate());
                    }
                } else {
                    self.state = RunState::Gap { clicks: completed };
                    self.event = PressEvent::indeterminate();
                }
            }

            (RunState::Gap { clicks }, true) => {
                self.state = RunState::Active {
                    clicks,
                    hold_fired: false,
                };
                self.event = PressEvent::indeterminate();
            }
            (RunState::Gap { clicks }, false) => {
                if elapsed(now, steady_since) > timing.press_window_ms {
                    if M::PRESS {
                        self.finish(PressEvent::press(clicks, now));
                    } else {
                        self.finish(PressEvent::indeterminate());
                    }
                } else {
                    self.event = PressEvent::indeterminate();
                }
            }
        }

        self.event
    }

    fn retrigger(&mut self, now: u32, timing: &Timing) {
        match self.event.trigger_state() {
            TriggerState::FiredOnce => self.event.await_retrigger(now),
            TriggerState::AwaitingRetrigger => {
                let delay = self.retrigger_override.unwrap_or(timing.retrigger_ms);
                if elapsed(now, self.event.event_time()) >= delay {
                    self.retrigger_override = None;
                    self.event.refire(now);
                    #[cfg(feature = "defmt")]
                    defmt::trace!(
                        "hold {=u8} refired ({=u16}) at {=u32}ms",
                        self.event.amount(),
                        self.event.fire_count(),
                        now
                    );
                }
            }
            TriggerState::Untriggered => {}
        }
    }

    fn finish(&mut self, event: PressEvent) {
        #[cfg(feature = "defmt")]
        if !event.is_indeterminate() {
            defmt::debug!("run finished: {}", event);
        }
        self.state = RunState::Idle;
        self.event = event;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn event(&self) -> PressEvent {
        self.event
    }

    /// 仅替换下一次连发的等待时间，之后恢复为配置的连发周期。
    pub fn set_retrigger_override(&mut self, delay_ms: u32) {
        self.retrigger_override = Some(delay_ms);
    }

    pub fn retrigger_override(&self) -> Option<u32> {
        self.retrigger_override
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

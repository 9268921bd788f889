/// 最近一次轮询的分类结果。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressKind {
    /// 尚未确定，或序列已被丢弃。
    #[default]
    Indeterminate,
    /// 一个 `amount` 次点击的序列结束。
    Press,
    /// 序列中第 `amount` 次按下正在长按。
    Hold,
}

/// 长按的触发阶段。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Untriggered,
    /// 本次轮询触发了长按。
    FiredOnce,
    /// 已触发过，正在等待连发延时。
    AwaitingRetrigger,
}

/// 上一次轮询的结果。
///
/// 未确定的事件总是数量为 0 且处于 [`TriggerState::Untriggered`]。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressEvent {
    kind: PressKind,
    amount: u8,
    event_time: u32,
    trigger_state: TriggerState,
    fire_count: u16,
}

impl PressEvent {
    pub(crate) const fn indeterminate() -> Self {
        Self {
            kind: PressKind::Indeterminate,
            amount: 0,
            event_time: 0,
            trigger_state: TriggerState::Untriggered,
            fire_count: 0,
        }
    }

    pub(crate) const fn press(amount: u8, now: u32) -> Self {
        Self {
            kind: PressKind::Press,
            amount,
            event_time: now,
            trigger_state: TriggerState::Untriggered,
            fire_count: 0,
        }
    }

    pub(crate) const fn hold(amount: u8, now: u32) -> Self {
        Self {
            kind: PressKind::Hold,
            amount,
            event_time: now,
            trigger_state: TriggerState::FiredOnce,
            fire_count: 1,
        }
    }

    /// 已触发的长按进入等待阶段，以 `now` 为计时起点。
    pub(crate) fn await_retrigger(&mut self, now: u32) {
        self.trigger_state = TriggerState::AwaitingRetrigger;
        self.event_time = now;
    }

    pub(crate) fn refire(&mut self, now: u32) {
        self.trigger_state = TriggerState::FiredOnce;
        self.event_time = now;
        self.fire_count = self.fire_count.saturating_add(1);
    }

    pub fn kind(&self) -> PressKind {
        self.kind
    }

    /// 点击事件的次数或长按的序号；未确定时为 0。
    pub fn amount(&self) -> u8 {
        self.amount
    }

    /// 点击事件为结束时刻；长按为最近一次触发时刻，
    /// 等待连发时则为连发延时的起点。
    pub fn event_time(&self) -> u32 {
        self.event_time
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger_state
    }

    /// 当前长按已触发的次数，包括第一次。
    pub fn fire_count(&self) -> u16 {
        self.fire_count
    }

    pub fn is(&self, kind: PressKind, amount: u8) -> bool {
        self.kind == kind && self.amount == amount
    }

    pub fn is_indeterminate(&self) -> bool {
        self.kind == PressKind::Indeterminate
    }

    /// 本次轮询是否产生了需要处理的事件：结束的点击序列，或触发的长按。
    pub fn is_firing(&self) -> bool {
        match self.kind {
            PressKind::Press => true,
            PressKind::Hold => self.trigger_state == TriggerState::FiredOnce,
            PressKind::Indeterminate => false,
        }
    }

    /// 本次轮询结束的点击次数，否则为 0。
    pub fn clicks(&self) -> u8 {
        match self.kind {
            PressKind::Press => self.amount,
            _ => 0,
        }
    }

    /// 仅在长按第一次触发时返回其序号，否则为 0。
    pub fn hold_once(&self) -> u8 {
        if self.kind == PressKind::Hold
            && self.trigger_state == TriggerState::FiredOnce
            && self.fire_count == 1
        {
            self.amount
        } else {
            0
        }
    }

    /// 长按每次触发（含连发）时返回其序号，否则为 0。
    ///
    /// 每次轮询后读取即可按连发周期得到重复事件。
    pub fn hold_repeat(&self) -> u8 {
        if self.kind == PressKind::Hold && self.trigger_state == TriggerState::FiredOnce {
            self.amount
        } else {
            0
        }
    }

    /// 不论触发阶段，返回长按序号，否则为 0。
    pub fn hold_amount(&self) -> u8 {
        match self.kind {
            PressKind::Hold => self.amount,
            _ => 0,
        }
    }
}

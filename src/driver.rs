use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    pubsub::{PubSubChannel, Publisher, Subscriber},
};
use embassy_time::{Duration, Ticker};
use embedded_hal::digital::InputPin;

use crate::{capability::Capability, clock::Clock, event::PressEvent, Button};

pub type PressEventChannel<const MSG_CAP: usize, const SUBS: usize, const PUBS: usize> =
    PubSubChannel<CriticalSectionRawMutex, PressEvent, MSG_CAP, SUBS, PUBS>;
pub type PressEventSubscriber<
    'a,
    const MSG_CAP: usize,
    const SUBS: usize,
    const PUBS: usize,
> = Subscriber<'a, CriticalSectionRawMutex, PressEvent, MSG_CAP, SUBS, PUBS>;
type PressEventPublisher<'a, const MSG_CAP: usize, const SUBS: usize, const PUBS: usize> =
    Publisher<'a, CriticalSectionRawMutex, PressEvent, MSG_CAP, SUBS, PUBS>;

/// 【后台驱动器】拥有一个 [`Button`]，按固定周期轮询，
/// 并发布每个触发事件（结束的点击序列、长按触发与连发）。
pub struct PollingDriver<
    'a,
    P: InputPin,
    C: Clock,
    M: Capability,
    const MSG_CAP: usize,
    const SUBS: usize,
    const PUBS: usize,
> {
    button: Button<P, C, M>,
    period: Duration,
    publisher: PressEventPublisher<'a, MSG_CAP, SUBS, PUBS>,
}

impl<
        'a,
        P: InputPin,
        C: Clock,
        M: Capability,
        const MSG_CAP: usize,
        const SUBS: usize,
        const PUBS: usize,
    > PollingDriver<'a, P, C, M, MSG_CAP, SUBS, PUBS>
{
    /// 创建一个向 `channel` 发布事件的驱动。
    ///
    /// `period` 为轮询周期，它决定了按钮配置中所有时间窗口的精度。
    ///
    /// 通道没有空闲的发布者名额时返回 `None`。
    pub fn new(
        button: Button<P, C, M>,
        period: Duration,
        channel: &'a PressEventChannel<MSG_CAP, SUBS, PUBS>,
    ) -> Option<Self> {
        let publisher = channel.publisher().ok()?;
        Some(Self {
            button,
            period,
            publisher,
        })
    }

    pub fn button(&self) -> &Button<P, C, M> {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut Button<P, C, M> {
        &mut self.button
    }

    /// 轮询一次，如有触发则发布。返回本次事件。
    ///
    /// 订阅者处理过慢时丢弃其最旧的消息，而不是阻塞轮询循环。
    pub fn poll_once(&mut self) -> PressEvent {
        let event = self.button.poll();
        if event.is_firing() {
            #[cfg(feature = "defmt")]
            defmt::trace!("publishing {}", event);
            self.publisher.publish_immediate(event);
        }
        event
    }

    pub async fn run(mut self) -> ! {
        let mut ticker = Ticker::every(self.period);
        loop {
            self.poll_once();
            ticker.next().await;
        }
    }
}

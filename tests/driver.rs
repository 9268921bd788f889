use core::convert::Infallible;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use embassy_polled_button::{
    driver::{PollingDriver, PressEventChannel},
    gpio::ActiveLevel,
    Button, ButtonConfig, EmbassyClock, PressAndHold, PressKind, TriggerState,
};
use embassy_time::{Duration, Timer};

// --- 模拟硬件 ---

#[derive(Clone)]
struct MockPin {
    high: Arc<AtomicBool>,
}

impl MockPin {
    fn new() -> Self {
        Self {
            high: Arc::new(AtomicBool::new(true)),
        }
    }

    fn set_pressed(&self, pressed: bool) {
        // 低电平有效。
        self.high.store(!pressed, Ordering::SeqCst);
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.load(Ordering::SeqCst))
    }
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.load(Ordering::SeqCst))
    }
}

fn config() -> ButtonConfig {
    ButtonConfig {
        settle_time: Duration::from_millis(20),
        active_level: ActiveLevel::Low,
        press_window: Duration::from_millis(250),
        hold_window: Duration::from_millis(500),
        max_clicks: 3,
        retrigger_interval: Duration::from_millis(150),
    }
}

const POLL: Duration = Duration::from_millis(5);

async fn double_click_then_hold(pin: MockPin) {
    Timer::after(Duration::from_millis(100)).await;

    for _ in 0..2 {
        pin.set_pressed(true);
        Timer::after(Duration::from_millis(80)).await;
        pin.set_pressed(false);
        Timer::after(Duration::from_millis(80)).await;
    }
    Timer::after(Duration::from_millis(400)).await;

    pin.set_pressed(true);
    Timer::after(Duration::from_millis(800)).await;
    pin.set_pressed(false);
}

#[tokio::test]
async fn next_event_reports_click_run_then_hold() {
    let pin = MockPin::new();
    let mut button =
        Button::<_, _, PressAndHold>::new(pin.clone(), EmbassyClock, config()).unwrap();

    let validator = async {
        let event = embassy_time::with_timeout(Duration::from_secs(2), button.next_event(POLL))
            .await
            .expect("timed out waiting for the double click");
        assert!(event.is(PressKind::Press, 2));

        let event = embassy_time::with_timeout(Duration::from_secs(2), button.next_event(POLL))
            .await
            .expect("timed out waiting for the hold");
        assert!(event.is(PressKind::Hold, 1));
        assert_eq!(event.trigger_state(), TriggerState::FiredOnce);
        assert_eq!(event.fire_count(), 1);
    };

    tokio::join!(double_click_then_hold(pin.clone()), validator);
}

#[tokio::test]
async fn driver_publishes_firing_events() {
    static CHANNEL: PressEventChannel<8, 2, 1> = PressEventChannel::<8, 2, 1>::new();

    let pin = MockPin::new();
    let button = Button::<_, _, PressAndHold>::new(pin.clone(), EmbassyClock, config()).unwrap();
    let driver = PollingDriver::new(button, POLL, &CHANNEL).unwrap();
    let mut subscriber = CHANNEL.subscriber().unwrap();

    let driver_task = tokio::spawn(driver.run());
    let input_task = tokio::spawn(double_click_then_hold(pin));

    let first = embassy_time::with_timeout(Duration::from_secs(2), subscriber.next_message_pure())
        .await
        .expect("timed out waiting for the double click");
    assert!(first.is(PressKind::Press, 2));

    let hold = embassy_time::with_timeout(Duration::from_secs(2), subscriber.next_message_pure())
        .await
        .expect("timed out waiting for the hold");
    assert!(hold.is(PressKind::Hold, 1));
    assert_eq!(hold.fire_count(), 1);

    // 按住 800ms，长按阈值 500ms：至少连发一次。
    let refire = embassy_time::with_timeout(Duration::from_secs(2), subscriber.next_message_pure())
        .await
        .expect("timed out waiting for the refire");
    assert!(refire.is(PressKind::Hold, 1));
    assert!(refire.fire_count() >= 2);

    input_task.await.unwrap();
    driver_task.abort();
}

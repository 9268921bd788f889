use embedded_hal::digital::InputPin;

/// 定义按钮按下时的有效电平。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// 低电平有效（例如，使用上拉电阻，按下时引脚接地）。
    Low,
    /// 高电平有效（例如，使用下拉电阻，按下时引脚接VCC）。
    High,
}

/// 每次轮询读取一次的输入引脚。
///
/// 对状态机而言读取永不失败：底层引脚报错时，沿用上一次成功读取的电平。
pub struct GpioLine<P: InputPin> {
    pin: P,
    last_high: bool,
}

impl<P: InputPin> GpioLine<P> {
    /// 封装 `pin`。首次成功读取之前返回 `initial_high`。
    pub fn new(pin: P, initial_high: bool) -> Self {
        Self {
            pin,
            last_high: initial_high,
        }
    }

    /// 读取引脚电平；`true` 表示高电平。
    pub fn read_high(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => self.last_high = high,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("pin read failed, keeping level high={}", self.last_high);
            }
        }
        self.last_high
    }

    /// 读取引脚并判断是否处于 `active_level`。
    pub fn read_active(&mut self, active_level: ActiveLevel) -> bool {
        let high = self.read_high();
        match active_level {
            ActiveLevel::Low => !high,
            ActiveLevel::High => high,
        }
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// 取回引脚。
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl ActiveLevel {
    /// 按钮释放时的电平（`true` 为高电平）。
    pub fn inactive_high(self) -> bool {
        matches!(self, ActiveLevel::Low)
    }
}

//! Controller configuration.

/// Tunables for the polling loop and input decoding.
///
/// [`ControllerConfig::default()`] matches the reference hardware: a
/// four-pulse-per-detent encoder, an active-high button and a 1 kHz loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Polling loop rate in Hz. Default: 1000.
    pub tick_hz: u32,
    /// Quadrature pulses per mechanical detent. Default: 4.
    pub pulses_per_detent: i32,
    /// `true` if the button line reads high while pressed. Default: `true`.
    pub button_active_high: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_hz: 1000,
            pulses_per_detent: 4,
            button_active_high: true,
        }
    }
}

impl ControllerConfig {
    /// Convert the configured tick rate to a period in microseconds.
    ///
    /// Formula: `1_000_000 / tick_hz`, with a rate of 0 treated as 1 Hz.
    pub fn tick_period_us(&self) -> u64 {
        1_000_000 / u64::from(self.tick_hz.max(1))
    }

    /// Map a raw button line level to "pressed".
    pub fn button_pressed(&self, level: bool) -> bool {
        level == self.button_active_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let c = ControllerConfig::default();
        assert_eq!(c.tick_hz, 1000);
        assert_eq!(c.pulses_per_detent, 4);
        assert!(c.button_active_high);
    }

    #[test]
    fn tick_period_1khz() {
        assert_eq!(ControllerConfig::default().tick_period_us(), 1000);
    }

    #[test]
    fn tick_period_zero_rate() {
        let c = ControllerConfig {
            tick_hz: 0,
            ..ControllerConfig::default()
        };
        assert_eq!(c.tick_period_us(), 1_000_000);
    }

    #[test]
    fn active_low_button() {
        let c = ControllerConfig {
            button_active_high: false,
            ..ControllerConfig::default()
        };
        assert!(c.button_pressed(false));
        assert!(!c.button_pressed(true));
    }
}

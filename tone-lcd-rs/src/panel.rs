//! The tone controller screen as a single unit.
//!
//! [`TonePanel`] owns the LCD driver, the [`Screen`] buffer and the layout,
//! so the firmware loop only has to call [`TonePanel::start()`] once and
//! [`TonePanel::refresh()`] after every tick.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use tone_control::{TickOutcome, ToneController};

use crate::driver::Hd44780;
use crate::error::LcdError;
use crate::layout::{LcdConfig, Screen, GRAPH_BLOCK, GRAPH_BLOCK_PATTERN};
use crate::render::{render_initial, render_tick};

/// LCD driver plus the screen it shows.
pub struct TonePanel<P, D> {
    lcd: Hd44780<P, D>,
    screen: Screen,
    config: LcdConfig,
}

impl<P, D> TonePanel<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Wrap an uninitialised driver. No pins are touched until
    /// [`start()`](Self::start).
    pub fn new(lcd: Hd44780<P, D>, config: LcdConfig) -> Self {
        Self {
            lcd,
            screen: Screen::new(),
            config,
        }
    }

    /// Initialise the display, upload the bar-graph glyph and draw the
    /// full layout for `controller`'s current state.
    ///
    /// # Errors
    ///
    /// Any [`LcdError`] from the driver. `start()` may be called again
    /// after a failure; if only the final flush failed the panel counts as
    /// started and the next [`refresh()`](Self::refresh) resends every row.
    pub async fn start(&mut self, controller: &mut ToneController) -> Result<(), LcdError<P::Error>> {
        self.lcd.init().await?;
        self.lcd.create_glyph(GRAPH_BLOCK, &GRAPH_BLOCK_PATTERN).await?;

        self.screen = Screen::new();
        render_initial(&mut self.screen, controller, &self.config);
        if let Err(e) = self.lcd.flush(&mut self.screen).await {
            self.screen.mark_all_dirty();
            return Err(e);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("LCD initialised");

        Ok(())
    }

    /// Draw what the last tick changed and send the dirty rows.
    ///
    /// A tick that changed nothing produces no pin traffic.
    ///
    /// # Errors
    ///
    /// [`LcdError::NotInitialized`] before a successful
    /// [`start()`](Self::start), otherwise pin errors from the flush. After
    /// a failed flush every row is marked for resend on the next refresh.
    pub async fn refresh(
        &mut self,
        controller: &mut ToneController,
        outcome: &TickOutcome,
    ) -> Result<(), LcdError<P::Error>> {
        render_tick(&mut self.screen, controller, outcome, &self.config);
        if !self.screen.is_dirty() {
            return Ok(());
        }

        let result = self.lcd.flush(&mut self.screen).await;
        if result.is_err() {
            self.screen.mark_all_dirty();
        }
        result
    }

    /// Returns `true` once the display has been initialised by
    /// [`start()`](Self::start).
    pub fn is_started(&self) -> bool {
        self.lcd.is_initialized()
    }

    /// Current screen contents.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Layout geometry in use.
    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    /// Release the driver.
    pub fn release(self) -> Hd44780<P, D> {
        self.lcd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::bus_expect::{done, Expect};
    use crate::layout::ROWS;
    use crate::render::draw_graph;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, Transaction as PinTransaction};
    use tone_control::tone_state::{Channel, Direction};
    use tone_control::{ControllerConfig, InputEvent};

    /// The screen a freshly started panel shows.
    fn initial_screen() -> Screen {
        let mut screen = Screen::new();
        let mut controller = ToneController::new(ControllerConfig::default());
        render_initial(&mut screen, &mut controller, &LcdConfig::default());
        screen
    }

    /// Expectations for a full `start()`.
    fn expect_start(screen: &Screen) -> Expect {
        let mut expect = Expect::default();
        expect.init().glyph(GRAPH_BLOCK, &GRAPH_BLOCK_PATTERN);
        for row in 0..ROWS {
            expect.row(row, screen.row(row).unwrap());
        }
        expect
    }

    fn idle_panel() -> TonePanel<PinMock, NoopDelay> {
        let none: [PinTransaction; 0] = [];
        let pin = || PinMock::new(&none);
        let lcd = Hd44780::new(pin(), pin(), [pin(), pin(), pin(), pin()], NoopDelay::new());
        TonePanel::new(lcd, LcdConfig::default())
    }

    fn finish(panel: TonePanel<PinMock, NoopDelay>) {
        let (mut rs, mut en, data, _) = panel.release().release();
        rs.done();
        en.done();
        for mut pin in data {
            pin.done();
        }
    }

    #[test]
    fn refresh_before_start_is_rejected() {
        let mut panel = idle_panel();
        let mut controller = ToneController::new(ControllerConfig::default());
        controller.apply(InputEvent::Increment);

        let result = block_on(panel.refresh(&mut controller, &TickOutcome::default()));
        assert_eq!(result, Err(LcdError::NotInitialized));
        // The failed flush leaves everything queued for the next attempt.
        assert!(panel.screen().is_dirty());
        finish(panel);
    }

    #[test]
    fn refresh_renders_into_screen() {
        let mut panel = idle_panel();
        let mut controller = ToneController::new(ControllerConfig::default());
        controller.apply(InputEvent::CycleSelection);

        let _ = block_on(panel.refresh(&mut controller, &TickOutcome::default()));
        assert_eq!(&panel.screen().row_text(1).as_str()[3..4], ">");
        assert!(!controller.cursor().selection_changed);
        finish(panel);
    }

    #[test]
    fn start_draws_full_layout() {
        let mut panel = TonePanel::new(expect_start(&initial_screen()).build(), LcdConfig::default());
        let mut controller = ToneController::new(ControllerConfig::default());
        assert!(!panel.is_started());

        block_on(panel.start(&mut controller)).unwrap();
        assert!(panel.is_started());
        assert!(!panel.screen().is_dirty());
        assert_eq!(panel.screen().row_text(0).as_str(), "VOL>|##            |");

        // Nothing changed: no pin traffic beyond the start sequence.
        block_on(panel.refresh(&mut controller, &TickOutcome::default())).unwrap();
        done(panel.release());
    }

    #[test]
    fn refresh_after_start_sends_only_changed_row() {
        let mut expected = initial_screen();
        let mut expect = expect_start(&expected);
        draw_graph(&mut expected, &LcdConfig::default(), Channel::Bass, -200);
        expect.row(2, expected.row(2).unwrap());

        let mut panel = TonePanel::new(expect.build(), LcdConfig::default());
        let mut controller = ToneController::new(ControllerConfig::default());
        block_on(panel.start(&mut controller)).unwrap();

        controller.store_mut().step(Channel::Bass, Direction::Down);
        block_on(panel.refresh(&mut controller, &TickOutcome::default())).unwrap();
        assert_eq!(panel.screen().row_text(2).as_str(), "BAS |#######       |");
        done(panel.release());
    }
}

//! tone-controller-hw
//!
//! TDA7313 volume / tone controller firmware for the Raspberry Pi Pico 2.
//! Wires the three library crates into a fixed-rate polling loop:
//!
//! 1. The encoder task decodes every A/B edge and accumulates quadrature
//!    pulses in a shared atomic counter.
//! 2. Each tick the main loop samples that counter and the button line and
//!    hands them to [`ToneController::tick()`].
//! 3. At most one changed register byte per tick is written to the TDA7313.
//! 4. The LCD panel redraws what changed and flushes dirty rows.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicI32, Ordering};

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::select;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use tda7313_driver::{InitSequence, Tda7313, DEFAULT_ADDRESS};
use tone_control::input::QuadratureDecoder;
use tone_control::tone_state::Channel;
use tone_control::{ControllerConfig, InputSample, ToneController};
use tone_lcd::{Hd44780, LcdConfig, TonePanel};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Running quadrature pulse count. Written only by the encoder task, read
/// once per tick by the main loop.
static ENCODER_PULSES: AtomicI32 = AtomicI32::new(0);

/// Ticks between attempts to bring up an LCD that failed to start.
const LCD_RETRY_TICKS: u32 = 1000;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Edge-driven quadrature decoding.
///
/// Wakes on any edge of either channel and feeds the new A/B levels to the
/// decoder. Invalid transitions (both lines changed) decode to 0.
#[embassy_executor::task]
async fn encoder_task(mut pin_a: Input<'static>, mut pin_b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(pin_a.is_high(), pin_b.is_high());
    loop {
        select(pin_a.wait_for_any_edge(), pin_b.wait_for_any_edge()).await;

        let delta = decoder.update(pin_a.is_high(), pin_b.is_high());
        if delta != 0 {
            ENCODER_PULSES.fetch_add(i32::from(delta), Ordering::Relaxed);
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("tone-controller-hw starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // I2C_SDA → GP20  (p.PIN_20)  TDA7313
    // I2C_SCL → GP21  (p.PIN_21)
    // LCD_RS  → GP2,  LCD_E → GP3,  LCD_D4..D7 → GP4..GP7
    // BUTTON  → GP8   active-high, pull-down enabled
    // ENC_A   → GP10, ENC_B → GP11  pull-up enabled
    // ———————————————————————————————————————————————————————————————————————

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let mut tda = Tda7313::new(i2c, DEFAULT_ADDRESS);

    let lcd = Hd44780::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        [
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
        ],
        Delay,
    );
    let mut panel = TonePanel::new(lcd, LcdConfig::default());

    let button = Input::new(p.PIN_8, Pull::Down);
    let encoder_a = Input::new(p.PIN_10, Pull::Up);
    let encoder_b = Input::new(p.PIN_11, Pull::Up);

    let config = ControllerConfig::default();
    let mut controller = ToneController::new(config);

    // —— Startup ————————————————————————————————————————————————————————————

    // The chip powers up in an undefined state; send every register so it
    // matches the store defaults shown on the LCD.
    let bytes = controller.store().register_bytes();
    let sequence = InitSequence::new(
        bytes[Channel::Bass.index()],
        bytes[Channel::Treble.index()],
        bytes[Channel::Volume.index()],
    );
    match tda.init(&sequence).await {
        Ok(()) => info!("TDA7313 initialised"),
        Err(e) if e.is_absent() => error!("TDA7313 not responding at {=u8:#x}", DEFAULT_ADDRESS),
        Err(e) => error!("TDA7313 init failed: {}", e),
    }

    // Without a display the loop still drives the audio path; the start is
    // retried from the loop.
    if let Err(e) = panel.start(&mut controller).await {
        error!("LCD init failed: {}", e);
    }
    let mut lcd_retry_countdown = LCD_RETRY_TICKS;

    unwrap!(spawner.spawn(encoder_task(encoder_a, encoder_b)));

    // —— Polling loop ———————————————————————————————————————————————————————

    let mut ticker = Ticker::every(Duration::from_micros(config.tick_period_us()));
    loop {
        ticker.next().await;

        let sample = InputSample {
            encoder_pulses: ENCODER_PULSES.load(Ordering::Relaxed),
            button_level: button.is_high(),
        };
        let outcome = controller.tick(sample);

        if let Some(update) = outcome.transmit {
            if let Err(e) = tda.send_byte(update.byte).await {
                // The store has already moved on; the next change on this
                // channel resends a fresh byte.
                warn!("TDA7313 write failed ({}): {}", update.channel, e);
            }
        }

        if panel.is_started() {
            if let Err(e) = panel.refresh(&mut controller, &outcome).await {
                warn!("LCD refresh failed: {}", e);
            }
        } else {
            lcd_retry_countdown -= 1;
            if lcd_retry_countdown == 0 {
                lcd_retry_countdown = LCD_RETRY_TICKS;
                match panel.start(&mut controller).await {
                    Ok(()) => info!("LCD started on retry"),
                    Err(e) => warn!("LCD retry failed: {}", e),
                }
            }
        }
    }
}

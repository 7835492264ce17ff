//! High-level interface for the TDA7313.

use embedded_hal_async::i2c::I2c;

use crate::error::Tda7313Error;
use crate::registers::{AudioSwitch, InitSequence, Speaker};

/// Async driver for a TDA7313 on an I2C bus.
///
/// The chip cannot be read back, so the driver keeps no register cache:
/// callers own the state and hand over finished register bytes.
///
/// # Example
///
/// ```no_run
/// use tda7313_driver::{InitSequence, Speaker, Tda7313, DEFAULT_ADDRESS};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut tda = Tda7313::new(i2c, DEFAULT_ADDRESS);
/// tda.init(&InitSequence::new(0x6F, 0x7F, 0x20)).await.unwrap();
///
/// // Bring the front outputs up to 0 dB.
/// tda.set_speaker(Speaker::LeftFront, 0).await.unwrap();
/// tda.set_speaker(Speaker::RightFront, 0).await.unwrap();
/// # }
/// ```
pub struct Tda7313<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Tda7313<I2C>
where
    I2C: I2c,
{
    /// Create a new driver. No I2C traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (always 0x44 for this part)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Release the underlying I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Write the power-on register set in one transaction.
    ///
    /// # Errors
    /// * [`Tda7313Error::I2c`] if the chip does not acknowledge
    pub async fn init(&mut self, sequence: &InitSequence) -> Result<(), Tda7313Error<I2C::Error>> {
        let bytes = sequence.to_bytes();
        self.i2c.write(self.address, &bytes).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("TDA7313 init: {=[u8]:#x}", &bytes[..]);

        Ok(())
    }

    /// Write a single register byte.
    ///
    /// This is the path used for every volume and tone change. The byte is
    /// sent as-is; its high bits select the register.
    ///
    /// # Errors
    /// * [`Tda7313Error::I2c`] on communication failure
    pub async fn send_byte(&mut self, byte: u8) -> Result<(), Tda7313Error<I2C::Error>> {
        self.i2c.write(self.address, &[byte]).await?;
        Ok(())
    }

    /// Select input, gain and loudness.
    pub async fn set_audio_switch(&mut self, switch: AudioSwitch) -> Result<(), Tda7313Error<I2C::Error>> {
        self.send_byte(switch.to_byte()).await
    }

    /// Set one speaker attenuator in 1.25 dB steps.
    ///
    /// # Errors
    /// * [`Tda7313Error::InvalidAttenuation`] if `steps > 31`
    /// * [`Tda7313Error::I2c`] on communication failure
    pub async fn set_speaker(&mut self, speaker: Speaker, steps: u8) -> Result<(), Tda7313Error<I2C::Error>> {
        let byte = speaker.byte(steps).ok_or(Tda7313Error::InvalidAttenuation(steps))?;
        self.send_byte(byte).await
    }
}

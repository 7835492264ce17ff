//! Error types for the TDA7313 driver.

use core::fmt;

use embedded_hal_async::i2c::{Error as I2cError, ErrorKind, NoAcknowledgeSource};

/// Errors that can occur when writing to the TDA7313.
#[derive(Debug, PartialEq, Eq)]
pub enum Tda7313Error<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// Speaker attenuation steps above [`SPEAKER_MUTE`](crate::SPEAKER_MUTE).
    /// Carries the rejected step count.
    InvalidAttenuation(u8),
}

impl<E: I2cError> Tda7313Error<E> {
    /// Returns `true` if the chip did not acknowledge its address.
    ///
    /// The TDA7313 has no readable registers, so a missing address ACK is
    /// the only sign that it is unpowered or not fitted.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            Tda7313Error::I2c(e) if matches!(
                e.kind(),
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown)
            )
        )
    }
}

impl<E> From<E> for Tda7313Error<E> {
    fn from(error: E) -> Self {
        Tda7313Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Tda7313Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tda7313Error::I2c(e) => write!(f, "TDA7313 write failed: {:?}", e),
            Tda7313Error::InvalidAttenuation(steps) => {
                write!(f, "Speaker attenuation {} out of range (0-31, 31 = mute)", steps)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Tda7313Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Tda7313Error::I2c(e) => defmt::write!(f, "TDA7313 write failed: {}", e),
            Tda7313Error::InvalidAttenuation(steps) => {
                defmt::write!(f, "Speaker attenuation {=u8} out of range", steps)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_nack_means_absent() {
        let err: Tda7313Error<ErrorKind> =
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address).into();
        assert!(err.is_absent());
    }

    #[test]
    fn other_errors_are_not_absence() {
        let bus: Tda7313Error<ErrorKind> = ErrorKind::ArbitrationLoss.into();
        assert!(!bus.is_absent());
        assert!(!Tda7313Error::<ErrorKind>::InvalidAttenuation(40).is_absent());
    }

    #[test]
    fn display_names_rejected_steps() {
        let err = Tda7313Error::<ErrorKind>::InvalidAttenuation(40);
        assert_eq!(
            err.to_string(),
            "Speaker attenuation 40 out of range (0-31, 31 = mute)"
        );
    }
}

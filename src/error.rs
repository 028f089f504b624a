//! Error definitions for INA219 driver.

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed (including a NACK on the presence probe).
    I2c(I2cError),
    /// Sensor configuration cannot produce a usable current divisor.
    InvalidConfig,
    /// Current was requested before a calibration word was written.
    NotCalibrated,
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::InvalidConfig => write!(f, "invalid sensor configuration"),
            Error::NotCalibrated => write!(f, "current read before calibration"),
        }
    }
}

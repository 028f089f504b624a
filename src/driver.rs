//! INA219 driver.
//! Blocking I2C helpers; the async version mirrors this API behind the `async` feature.

use crate::data_types::{
    AdcSetting, BusVoltage, BusVoltageRange, OperatingMode, SensorConfig, ShuntGain,
};
use crate::error::Error;
use crate::registers::{
    addr, bus_voltage_mv, config_word, current_divisor, current_ma, BusVoltageBits, ConfigBits,
    DEFAULT_CALIBRATION, DEFAULT_I2C_ADDRESS,
};

const BUS_RANGE: BusVoltageRange = BusVoltageRange::V32;
const BUS_ADC: AdcSetting = AdcSetting::Bits12;
const SHUNT_ADC: AdcSetting = AdcSetting::Samples128;
const MODE: OperatingMode = OperatingMode::ShuntAndBusContinuous;

/// INA219 current/bus voltage monitor.
pub struct Ina219<I2C> {
    i2c: I2C,
    address: u8,
    config: SensorConfig,
    calibration: u16,
    // Zero until a calibration word has been written.
    current_divisor: u16,
}

impl<I2C> Ina219<I2C> {
    /// Create a new driver instance with the default I2C address (0x40) and default scaling.
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, DEFAULT_I2C_ADDRESS, SensorConfig::default())
    }

    /// Create a new driver instance with a custom I2C address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self::with_config(i2c, address, SensorConfig::default())
    }

    /// Create a new driver instance with a custom address and scaling.
    pub fn with_config(i2c: I2C, address: u8, config: SensorConfig) -> Self {
        Self {
            i2c,
            address,
            config,
            calibration: 0,
            current_divisor: 0,
        }
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Scaling used to pick the gain and convert current counts.
    pub fn config(&self) -> SensorConfig {
        self.config
    }

    /// Calibration word last accepted by the chip, `None` before the first
    /// calibration and after a reset.
    pub fn calibration(&self) -> Option<u16> {
        (self.current_divisor != 0).then_some(self.calibration)
    }

    /// Release the underlying bus.
    pub fn free(self) -> I2C {
        self.i2c
    }

    /// CONFIG word written alongside every calibration.
    pub fn measurement_config(&self) -> u16 {
        config_word(
            BUS_RANGE,
            ShuntGain::for_max_shunt_mv(self.config.max_shunt_mv),
            BUS_ADC,
            SHUNT_ADC,
            MODE,
        )
    }

    fn checked_divisor<E>(&self) -> Result<u16, Error<E>> {
        current_divisor(self.config.current_lsb_ua).ok_or(Error::InvalidConfig)
    }

    /// Record a calibration word once the CALIBRATION write went through.
    fn commit_calibration(&mut self, value: u16, divisor: u16) {
        self.calibration = value;
        self.current_divisor = divisor;
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ina219 @{=u8:#x}: calibration={=u16} divisor={=u16} gain_full_scale={=u16}mV",
            self.address,
            value,
            divisor,
            ShuntGain::for_max_shunt_mv(self.config.max_shunt_mv).full_scale_mv()
        );
    }

    fn divisor<E>(&self) -> Result<u16, Error<E>> {
        match self.current_divisor {
            0 => Err(Error::NotCalibrated),
            div => Ok(div),
        }
    }

    fn clear_calibration(&mut self) {
        self.calibration = 0;
        self.current_divisor = 0;
    }
}

fn decode_bus_voltage(raw: u16) -> BusVoltage {
    let flags = BusVoltageBits::from_bits_truncate(raw);
    BusVoltage {
        millivolts: bus_voltage_mv(raw),
        conversion_ready: flags.contains(BusVoltageBits::CNVR),
        math_overflow: flags.contains(BusVoltageBits::OVF),
    }
}

impl<I2C> Ina219<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Check that a device acknowledges the configured address (zero-length write).
    pub fn probe(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[]).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("ina219 @{=u8:#x}: no ACK on probe", self.address);
            Error::I2c(e)
        })
    }

    /// Probe the device, then apply the default calibration (4096).
    /// Leaves the chip sampling shunt and bus continuously (12-bit bus, 12-bit/128x shunt).
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.probe()?;
        self.set_calibration(DEFAULT_CALIBRATION)
    }

    /// Write the calibration word, then the measurement CONFIG word.
    pub fn set_calibration(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        let divisor = self.checked_divisor()?;
        self.write_reg16(addr::CALIBRATION, value)?;
        self.commit_calibration(value, divisor);
        let config = self.measurement_config();
        self.write_reg16(addr::CONFIG, config)
    }

    /// Bus voltage in millivolts (4 mV resolution).
    pub fn read_bus_voltage_mv(&mut self) -> Result<u16, Error<I2C::Error>> {
        Ok(self.read_bus_voltage()?.millivolts)
    }

    /// Bus voltage with the conversion-ready and overflow flags.
    pub fn read_bus_voltage(&mut self) -> Result<BusVoltage, Error<I2C::Error>> {
        let raw = self.read_reg16(addr::BUS_VOLTAGE)?;
        Ok(decode_bus_voltage(raw))
    }

    /// Current in milliamps. Rewrites the calibration word first since some
    /// parts lose it after a brown-out or reset.
    pub fn read_current_ma(&mut self) -> Result<i32, Error<I2C::Error>> {
        let divisor = self.divisor()?;
        self.write_reg16(addr::CALIBRATION, self.calibration)?;
        let raw = self.read_reg16(addr::CURRENT)? as i16;
        #[cfg(feature = "defmt")]
        defmt::trace!("ina219 @{=u8:#x}: current raw={=i16}", self.address, raw);
        Ok(current_ma(raw, divisor))
    }

    /// Reset all registers to power-on defaults. Calibration must be applied again afterwards.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg16(addr::CONFIG, ConfigBits::RST.bits())?;
        self.clear_calibration();
        Ok(())
    }

    /// Read CONFIG register raw bits.
    pub fn read_config(&mut self) -> Result<ConfigBits, Error<I2C::Error>> {
        let val = self.read_reg16(addr::CONFIG)?;
        Ok(ConfigBits::from_bits_truncate(val))
    }

    fn write_reg16(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, hi, lo])
            .map_err(Error::I2c)
    }

    fn read_reg16(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(u16::from_be_bytes(buf))
    }
}

#[cfg(feature = "async")]
impl<I2C> Ina219<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`probe`](Self::probe).
    pub async fn probe_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[]).await.map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("ina219 @{=u8:#x}: no ACK on probe", self.address);
            Error::I2c(e)
        })
    }

    /// Async version of [`init`](Self::init).
    pub async fn init_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.probe_async().await?;
        self.set_calibration_async(DEFAULT_CALIBRATION).await
    }

    pub async fn set_calibration_async(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        let divisor = self.checked_divisor()?;
        self.write_reg16_async(addr::CALIBRATION, value).await?;
        self.commit_calibration(value, divisor);
        let config = self.measurement_config();
        self.write_reg16_async(addr::CONFIG, config).await
    }

    pub async fn read_bus_voltage_mv_async(&mut self) -> Result<u16, Error<I2C::Error>> {
        Ok(self.read_bus_voltage_async().await?.millivolts)
    }

    pub async fn read_bus_voltage_async(&mut self) -> Result<BusVoltage, Error<I2C::Error>> {
        let raw = self.read_reg16_async(addr::BUS_VOLTAGE).await?;
        Ok(decode_bus_voltage(raw))
    }

    pub async fn read_current_ma_async(&mut self) -> Result<i32, Error<I2C::Error>> {
        let divisor = self.divisor()?;
        self.write_reg16_async(addr::CALIBRATION, self.calibration).await?;
        let raw = self.read_reg16_async(addr::CURRENT).await? as i16;
        #[cfg(feature = "defmt")]
        defmt::trace!("ina219 @{=u8:#x}: current raw={=i16}", self.address, raw);
        Ok(current_ma(raw, divisor))
    }

    pub async fn reset_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg16_async(addr::CONFIG, ConfigBits::RST.bits()).await?;
        self.clear_calibration();
        Ok(())
    }

    pub async fn read_config_async(&mut self) -> Result<ConfigBits, Error<I2C::Error>> {
        let val = self.read_reg16_async(addr::CONFIG).await?;
        Ok(ConfigBits::from_bits_truncate(val))
    }

    async fn write_reg16_async(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, hi, lo])
            .await
            .map_err(Error::I2c)
    }

    async fn read_reg16_async(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(u16::from_be_bytes(buf))
    }
}

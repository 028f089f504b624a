//! Register map and constants for INA219.
//! Addresses and bit positions follow the datasheet register description (section 8.6).

use crate::data_types::{AdcSetting, BusVoltageRange, OperatingMode, ShuntGain};

/// Default I2C address (A0 = A1 = GND).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x40;

/// Calibration word applied by `init`.
pub const DEFAULT_CALIBRATION: u16 = 4096;

/// Register addresses (8-bit pointer values).
pub mod addr {
    /// Configuration (reset, range, gain, ADC settings, mode)
    pub const CONFIG: u8 = 0x00;
    /// Shunt voltage (10 µV LSB). Not read by this driver.
    pub const SHUNT_VOLTAGE: u8 = 0x01;
    /// Bus voltage (4 mV LSB in bits 15..3, CNVR/OVF flags in bits 1..0)
    pub const BUS_VOLTAGE: u8 = 0x02;
    /// Power (20 × current LSB). Not read by this driver.
    pub const POWER: u8 = 0x03;
    /// Current, signed, scaled by the calibration register
    pub const CURRENT: u8 = 0x04;
    /// Calibration
    pub const CALIBRATION: u8 = 0x05;
}

/// Bus voltage LSB after dropping the three flag bits.
pub const BUS_VOLTAGE_LSB_MV: u16 = 4;

/// Microamps per milliamp, numerator of the current divisor.
pub const UA_PER_MA: u16 = 1000;

/// PGA gain field inside CONFIG (bits 12-11).
pub const GAIN_MASK: u16 = 0x1800;
/// Bus ADC resolution/averaging field inside CONFIG (bits 10-7).
pub const BUS_ADC_MASK: u16 = 0x0780;
/// Shunt ADC resolution/averaging field inside CONFIG (bits 6-3).
pub const SHUNT_ADC_MASK: u16 = 0x0078;
/// Operating mode field inside CONFIG (bits 2-0).
pub const MODE_MASK: u16 = 0x0007;

pub(crate) const BUS_ADC_SHIFT: u16 = 7;
pub(crate) const SHUNT_ADC_SHIFT: u16 = 3;

bitflags::bitflags! {
    /// CONFIG register bits (0x00).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ConfigBits: u16 {
        /// Bit 15: Reset to power-on defaults (self-clearing).
        const RST   = 1 << 15;
        // Bit 14 reserved.
        /// Bit 13: Bus voltage range (0 = 16 V, 1 = 32 V).
        const BRNG  = 1 << 13;
        /// Bits 12-11: PGA gain.
        const PG1   = 1 << 12;
        const PG0   = 1 << 11;
        /// Bits 10-7: Bus ADC resolution/averaging.
        const BADC4 = 1 << 10;
        const BADC3 = 1 << 9;
        const BADC2 = 1 << 8;
        const BADC1 = 1 << 7;
        /// Bits 6-3: Shunt ADC resolution/averaging.
        const SADC4 = 1 << 6;
        const SADC3 = 1 << 5;
        const SADC2 = 1 << 4;
        const SADC1 = 1 << 3;
        /// Bits 2-0: Operating mode.
        const MODE3 = 1 << 2;
        const MODE2 = 1 << 1;
        const MODE1 = 1 << 0;
    }

    /// Flag bits of the BUS_VOLTAGE register (0x02).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct BusVoltageBits: u16 {
        // Bit 2 unused.
        /// Bit 1: Conversion ready.
        const CNVR = 1 << 1;
        /// Bit 0: Math overflow (current/power out of range).
        const OVF  = 1 << 0;
    }
}

/// Convert raw BUS_VOLTAGE contents to millivolts: drop the flag bits, scale by 4 mV.
pub fn bus_voltage_mv(raw: u16) -> u16 {
    (raw >> 3) << 2
}

/// Divisor turning CURRENT counts into milliamps for a given current LSB (µA).
/// `None` when the LSB is zero or coarser than 1 mA.
pub fn current_divisor(current_lsb_ua: u16) -> Option<u16> {
    if current_lsb_ua == 0 {
        return None;
    }
    match UA_PER_MA / current_lsb_ua {
        0 => None,
        div => Some(div),
    }
}

/// Convert a signed CURRENT reading to milliamps (truncates toward zero).
pub fn current_ma(raw: i16, divisor: u16) -> i32 {
    i32::from(raw) / i32::from(divisor)
}

/// Combine typed settings into a CONFIG word.
pub fn config_word(
    range: BusVoltageRange,
    gain: ShuntGain,
    bus_adc: AdcSetting,
    shunt_adc: AdcSetting,
    mode: OperatingMode,
) -> u16 {
    range.bits()
        | gain.bits()
        | (u16::from(bus_adc.code()) << BUS_ADC_SHIFT)
        | (u16::from(shunt_adc.code()) << SHUNT_ADC_SHIFT)
        | u16::from(mode.code())
}

/// Extract the PGA gain field from a CONFIG word.
pub fn decode_gain(bits: &ConfigBits) -> ShuntGain {
    match bits.bits() & GAIN_MASK {
        0x0000 => ShuntGain::Div1_40mV,
        0x0800 => ShuntGain::Div2_80mV,
        0x1000 => ShuntGain::Div4_160mV,
        _ => ShuntGain::Div8_320mV,
    }
}

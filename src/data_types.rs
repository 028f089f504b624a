//! Data types for INA219 driver.

/// Bus voltage full-scale range (BRNG).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BusVoltageRange {
    V16,
    V32,
}

impl BusVoltageRange {
    /// Field value already positioned inside CONFIG.
    pub const fn bits(self) -> u16 {
        match self {
            BusVoltageRange::V16 => 0x0000,
            BusVoltageRange::V32 => 0x2000,
        }
    }
}

/// PGA gain and the shunt voltage range it allows.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShuntGain {
    /// Gain 1, ±40 mV.
    Div1_40mV,
    /// Gain /2, ±80 mV.
    Div2_80mV,
    /// Gain /4, ±160 mV.
    Div4_160mV,
    /// Gain /8, ±320 mV (power-on default).
    Div8_320mV,
}

impl ShuntGain {
    /// Field value already positioned inside CONFIG.
    pub const fn bits(self) -> u16 {
        match self {
            ShuntGain::Div1_40mV => 0x0000,
            ShuntGain::Div2_80mV => 0x0800,
            ShuntGain::Div4_160mV => 0x1000,
            ShuntGain::Div8_320mV => 0x1800,
        }
    }

    /// Smallest range that still covers the expected maximum shunt voltage.
    pub const fn for_max_shunt_mv(max_shunt_mv: u16) -> Self {
        if max_shunt_mv > 160 {
            ShuntGain::Div8_320mV
        } else if max_shunt_mv > 80 {
            ShuntGain::Div4_160mV
        } else if max_shunt_mv > 40 {
            ShuntGain::Div2_80mV
        } else {
            ShuntGain::Div1_40mV
        }
    }

    /// Full-scale shunt voltage for this gain.
    pub const fn full_scale_mv(self) -> u16 {
        match self {
            ShuntGain::Div1_40mV => 40,
            ShuntGain::Div2_80mV => 80,
            ShuntGain::Div4_160mV => 160,
            ShuntGain::Div8_320mV => 320,
        }
    }
}

/// ADC resolution / averaging (BADC and SADC share the same 4-bit encoding).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdcSetting {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
    Samples2,
    Samples4,
    Samples8,
    Samples16,
    Samples32,
    Samples64,
    Samples128,
}

impl AdcSetting {
    /// 4-bit field code before shifting into BADC (bit 7) or SADC (bit 3).
    pub const fn code(self) -> u8 {
        match self {
            AdcSetting::Bits9 => 0x0,
            AdcSetting::Bits10 => 0x1,
            AdcSetting::Bits11 => 0x2,
            AdcSetting::Bits12 => 0x3,
            AdcSetting::Samples2 => 0x9,
            AdcSetting::Samples4 => 0xA,
            AdcSetting::Samples8 => 0xB,
            AdcSetting::Samples16 => 0xC,
            AdcSetting::Samples32 => 0xD,
            AdcSetting::Samples64 => 0xE,
            AdcSetting::Samples128 => 0xF,
        }
    }
}

/// Operating mode (MODE[3:1]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperatingMode {
    PowerDown,
    ShuntTriggered,
    BusTriggered,
    ShuntAndBusTriggered,
    AdcOff,
    ShuntContinuous,
    BusContinuous,
    ShuntAndBusContinuous,
}

impl OperatingMode {
    pub const fn code(self) -> u8 {
        match self {
            OperatingMode::PowerDown => 0,
            OperatingMode::ShuntTriggered => 1,
            OperatingMode::BusTriggered => 2,
            OperatingMode::ShuntAndBusTriggered => 3,
            OperatingMode::AdcOff => 4,
            OperatingMode::ShuntContinuous => 5,
            OperatingMode::BusContinuous => 6,
            OperatingMode::ShuntAndBusContinuous => 7,
        }
    }
}

/// Measurement scaling chosen by the board designer.
///
/// `max_shunt_mv` picks the PGA gain on every calibration; `current_lsb_ua`
/// fixes how many microamps one CURRENT count represents and must match the
/// calibration word written to the chip.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SensorConfig {
    /// Expected maximum voltage across the shunt (mV).
    pub max_shunt_mv: u16,
    /// Current register LSB (µA). Must be between 1 and 1000.
    pub current_lsb_ua: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_shunt_mv: 320,
            current_lsb_ua: 100,
        }
    }
}

/// Decoded BUS_VOLTAGE register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BusVoltage {
    pub millivolts: u16,
    /// A conversion completed since the last POWER read.
    pub conversion_ready: bool,
    /// Power or current calculation overflowed.
    pub math_overflow: bool,
}

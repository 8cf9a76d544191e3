/// Registers described in the data sheet for this device.
/// Every register is 16 bits wide and transferred LSB first.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    ALS_CONF = 0x00,     // gain, integration time, persistence, interrupt, shutdown
    ALS_WH = 0x01,       // ALS high threshold window setting
    ALS_WL = 0x02,       // ALS low threshold window setting
    POWER_SAVING = 0x03, // power saving mode and refresh time
    ALS = 0x04,          // ALS output data
    WHITE = 0x05,        // WHITE output data
    ALS_INT = 0x06,      // ALS interrupt status
    ID = 0x07,           // device ID: s/b 0xC481 at address 0x10
}

/// Fields from ALS_CONF Register (0x00)
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(u16)]
pub enum ConfRegField {
    /// ALS gain: 00 = x1, 01 = x2, 10 = x1/8, 11 = x1/4
    ALS_GAIN = 0b11 << 11,
    /// ALS integration time. 1100 = 25ms
    ALS_IT = 0b1111 << 6,
    /// ALS persistence protect number
    ALS_PERS = 0b11 << 4,
    /// ALS interrupt enable
    ALS_INT_EN = 1 << 1,
    /// ALS shut down: 0 = power on, 1 = shut down
    ALS_SD = 1,
}

impl ConfRegField {
    pub const fn mask(self) -> u16 {
        self as u16
    }

    const fn shift(self) -> u32 {
        self.mask().trailing_zeros()
    }
}

/// Gain x1/8 in the ALS_GAIN field
const GAIN_1_8: u16 = 0b10;
/// 25ms in the ALS_IT field
const IT_25MS: u16 = 0b1100;

/// Lux per count at gain x1/8 and 25ms integration time,
/// from the "Designing the VEML7700 Into an Application" note, page 5
pub const DEFAULT_LUX_PER_COUNT: f32 = 2.1504;

/// Expected low byte of the ID register
pub const DEVICE_ID_CODE: u8 = 0x81;

/// A configuration word for the ALS_CONF register,
/// paired with the resolution (lux per count) that word produces.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    bits: u16,
    lux_per_count: f32,
}

impl Config {
    /// Gain x1/8, 25ms integration, persistence 1, interrupts off, powered on.
    /// This gives the widest reading range (0 - 140k lux).
    pub const DEFAULT: Config = Config {
        bits: (GAIN_1_8 << ConfRegField::ALS_GAIN.shift())
            | (IT_25MS << ConfRegField::ALS_IT.shift()),
        lux_per_count: DEFAULT_LUX_PER_COUNT,
    };

    /// A raw configuration word. The caller supplies the lux-per-count
    /// resolution that matches the gain and integration time in `bits`.
    pub const fn new(bits: u16, lux_per_count: f32) -> Self {
        Self {
            bits,
            lux_per_count,
        }
    }

    pub const fn bits(&self) -> u16 {
        self.bits
    }

    pub const fn lux_per_count(&self) -> f32 {
        self.lux_per_count
    }

    /// Read one field of the configuration word, shifted down to bit 0
    pub const fn field(&self, field: ConfRegField) -> u16 {
        (self.bits & field.mask()) >> field.shift()
    }

    pub const fn is_shut_down(&self) -> bool {
        self.bits & ConfRegField::ALS_SD.mask() != 0
    }

    /// The register write for this config: register address, then LSB, MSB
    pub fn to_write_block(&self) -> [u8; 3] {
        let [lsb, msb] = self.bits.to_le_bytes();
        [Register::ALS_CONF as u8, lsb, msb]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Contents of the ID register
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(pub u16);

impl DeviceId {
    /// Slave address option code: 0xC4 for address 0x10, 0xD4 for 0x48
    pub fn address_option_code(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn id_code(&self) -> u8 {
        self.0 as u8
    }
}

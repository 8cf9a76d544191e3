#![cfg_attr(not(test), no_std)]

//! Driver for the Vishay VEML7700 ambient light sensor,
//! built on the embedded-hal blocking I2C traits.
//!
//! Call `init` before reading light values: the sensor must be configured
//! before its counts can be converted to lux.

use embedded_hal as hal;
use log::{debug, info, trace};

mod definitions;
pub use definitions::*;

/// Errors in this crate
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<CommE> {
    /// The underlying I2C transaction failed
    Comm(CommE),

    /// A light reading was requested before the sensor was configured
    NotInitialized,

    /// The ID register did not contain the expected device ID code
    UnexpectedDeviceId(u16),
}

type LuxType = f32;

/// Linear estimate above which the high-range correction applies
pub const CORRECTION_THRESHOLD_LUX: LuxType = 1000.0;

/// Readings are not reliable above this value at the default gain and integration time
pub const MAX_LUX: LuxType = 140_000.0;

/// Correction polynomial coefficients, highest order first
const CORRECTION_COEFFS: [f64; 4] = [6.0135e-13, -9.3924e-9, 8.1488e-5, 1.0023];

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    Uninitialized,
    Active,
}

#[derive(Debug)]
pub struct Veml7700<I2C> {
    i2c_port: I2C,
    /// Configuration currently written to the sensor (or pending, before init)
    config: Config,
    state: State,
}

impl<I2C, CommE> Veml7700<I2C>
where
    I2C: hal::blocking::i2c::Write<Error = CommE> + hal::blocking::i2c::WriteRead<Error = CommE>,
    CommE: core::fmt::Debug,
{
    pub const DEVICE_ADDRESS: u8 = 0x10;

    /// Create a driver that will apply `config` at `init`
    pub fn new(i2c_port: I2C, config: Config) -> Self {
        Self {
            i2c_port,
            config,
            state: State::Uninitialized,
        }
    }

    pub fn default(i2c_port: I2C) -> Self {
        Self::new(i2c_port, Config::DEFAULT)
    }

    /// Release the I2C port
    pub fn destroy(self) -> I2C {
        self.i2c_port
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.state == State::Active
    }

    /// Write the configuration this driver was created with and
    /// start ambient light sensing.
    pub fn init(&mut self) -> Result<(), Error<CommE>> {
        self.configure(self.config)?;
        info!("VEML7700 initialized, config 0x{:04X}", self.config.bits());
        Ok(())
    }

    /// Write a new configuration word. The lux resolution follows the
    /// new config only once the write has succeeded.
    pub fn configure(&mut self, config: Config) -> Result<(), Error<CommE>> {
        self.i2c_port
            .write(Self::DEVICE_ADDRESS, &config.to_write_block())
            .map_err(Error::Comm)?;
        self.config = config;
        self.state = State::Active;
        Ok(())
    }

    /// Read the ALS channel and convert to lux, applying the
    /// high-range correction and clamping at `MAX_LUX`.
    pub fn read_lux(&mut self) -> Result<LuxType, Error<CommE>> {
        let raw = self.read_raw_als()?;
        let lux = als_lux_from_raw(raw, self.config.lux_per_count());
        debug!("ALS light: {} lux", lux);
        Ok(lux)
    }

    /// Read the WHITE channel and convert to lux.
    /// Only the linear conversion applies to this channel.
    pub fn read_white_lux(&mut self) -> Result<LuxType, Error<CommE>> {
        let raw = self.read_raw_white()?;
        let lux = raw_to_lux(raw, self.config.lux_per_count());
        debug!("White light: {} lux", lux);
        Ok(lux)
    }

    pub fn read_raw_als(&mut self) -> Result<u16, Error<CommE>> {
        self.ensure_active()?;
        let raw = self.read_register(Register::ALS)?;
        trace!("raw ALS data: 0x{:04X}", raw);
        Ok(raw)
    }

    pub fn read_raw_white(&mut self) -> Result<u16, Error<CommE>> {
        self.ensure_active()?;
        let raw = self.read_register(Register::WHITE)?;
        trace!("raw white data: 0x{:04X}", raw);
        Ok(raw)
    }

    /// Read the ID register. This does not depend on configuration
    /// and may be called before `init`.
    pub fn read_device_id(&mut self) -> Result<u16, Error<CommE>> {
        let id = self.read_register(Register::ID)?;
        debug!("VEML7700 device ID: 0x{:04X}", id);
        Ok(id)
    }

    /// Read the ID register and check the device ID code
    pub fn verify_device_id(&mut self) -> Result<DeviceId, Error<CommE>> {
        let id = DeviceId(self.read_device_id()?);
        if id.id_code() != DEVICE_ID_CODE {
            return Err(Error::UnexpectedDeviceId(id.0));
        }
        Ok(id)
    }

    fn ensure_active(&self) -> Result<(), Error<CommE>> {
        match self.state {
            State::Active => Ok(()),
            State::Uninitialized => Err(Error::NotInitialized),
        }
    }

    /// Read one 16-bit register, which the device sends LSB first
    fn read_register(&mut self, register: Register) -> Result<u16, Error<CommE>> {
        let mut buf = [0u8; 2];
        self.i2c_port
            .write_read(Self::DEVICE_ADDRESS, &[register as u8], &mut buf)
            .map_err(Error::Comm)?;
        Ok(u16::from_le_bytes(buf))
    }
}

/// Linear conversion of raw counts to lux
pub fn raw_to_lux(raw: u16, lux_per_count: f32) -> LuxType {
    raw as LuxType * lux_per_count
}

/// Non-linearity correction for readings above 1000 lux, from the
/// "Designing the VEML7700 Into an Application" note, page 5.
/// The result is clamped to `MAX_LUX`.
pub fn correct_high_range(lux: LuxType) -> LuxType {
    let x = lux as f64;
    let corrected = CORRECTION_COEFFS
        .iter()
        .fold(0.0f64, |acc, coeff| acc * x + coeff)
        * x;
    let corrected = corrected as LuxType;
    if corrected > MAX_LUX {
        MAX_LUX
    } else {
        corrected
    }
}

/// Full ALS conversion: linear, then corrected when above the threshold
pub fn als_lux_from_raw(raw: u16, lux_per_count: f32) -> LuxType {
    let lux = raw_to_lux(raw, lux_per_count);
    if lux > CORRECTION_THRESHOLD_LUX {
        correct_high_range(lux)
    } else {
        lux
    }
}

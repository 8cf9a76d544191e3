// Polls a VEML7700 on a Linux I2C bus, such as a Raspberry Pi's /dev/i2c-1.
// Run with RUST_LOG=info (or debug, to see the raw counts).

use embedded_hal::blocking::delay::DelayMs;
use linux_embedded_hal as hal;
use log::{error, info};
use veml7700_core::Veml7700;

const I2C_BUS: &str = "/dev/i2c-1";

fn main() {
    env_logger::init();

    let i2c_port = match hal::I2cdev::new(I2C_BUS) {
        Ok(port) => port,
        Err(e) => {
            error!("unable to open {}: {:?}", I2C_BUS, e);
            return;
        }
    };
    let mut delay_source = hal::Delay;

    let mut als = Veml7700::default(i2c_port);

    match als.verify_device_id() {
        Ok(id) => info!(
            "found VEML7700, address option 0x{:02X}, id 0x{:02X}",
            id.address_option_code(),
            id.id_code()
        ),
        Err(e) => error!("device ID check failed: {:?}", e),
    }

    if let Err(e) = als.init() {
        error!("failed to write configuration: {:?}", e);
        return;
    }

    loop {
        match als.read_lux() {
            Ok(lux) => info!("ALS light: {:.2} lux", lux),
            Err(e) => error!("error reading ALS light: {:?}", e),
        }

        match als.read_white_lux() {
            Ok(lux) => info!("White light: {:.2} lux", lux),
            Err(e) => error!("error reading white light: {:?}", e),
        }

        delay_source.delay_ms(4000u32);
    }
}

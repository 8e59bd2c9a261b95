use clap::Parser;
use ds18b20::Ds18b20;
use embedded_hal::delay::DelayNs;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, Delay};
use onewire_gpio::{GpioOneWire, OpenDrainPin};

mod delay;
use delay::SpinDelay;

/// Read a DS18B20 on a GPIO line once a second
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the GPIO character device
    #[arg(short, long, default_value = "/dev/gpiochip0")]
    chip: String,
    /// Offset of the 1-Wire data line on the chip
    #[arg(short, long)]
    line: u32,
}

const READ_INTERVAL_MS: u32 = 1000;

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    // Request the data line as open drain, released
    let mut chip = Chip::new(&args.chip).expect("Failed to open GPIO chip");
    let handle = chip
        .get_line(args.line)
        .expect("Failed to get GPIO line")
        .request(
            LineRequestFlags::OUTPUT | LineRequestFlags::OPEN_DRAIN,
            1,
            "ds18b20-linux",
        )
        .expect("Failed to request GPIO line");
    let pin = CdevPin::new(handle).expect("Failed to create GPIO pin");
    // Time slots need microsecond waits, the sleeping delay only paces the loop
    let mut bus = GpioOneWire::new(OpenDrainPin::new(pin), SpinDelay::new());
    if let Err(e) = bus.init() {
        log::error!("Sensor initialization failed: {e:?}");
        std::process::exit(1);
    }
    log::info!("Sensor initialized successfully");
    let mut sensor = Ds18b20::new();
    let mut delay = Delay;
    loop {
        match sensor.read_temperature(&mut bus, &mut delay) {
            Ok(temp) => log::info!("Temperature: {temp}°C"),
            Err(e) => log::warn!("No valid reading ({:?}): {e:?}", sensor.state()),
        }
        delay.delay_ms(READ_INTERVAL_MS);
    }
}

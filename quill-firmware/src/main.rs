//! Quill - Keyboard Display Firmware
//!
//! Main firmware binary for RP2040-based keyboard controllers with an
//! attached ILI9341 status panel. Brings up the panel over SPI, registers
//! the display assets, draws the startup chrome, and spawns the input and
//! UI tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quill_core::menu::KeyCode;

mod channels;
mod menu;
mod panel;
mod state;
mod tasks;

use panel::Panel;
use tasks::keys::KeyPin;

/// Command buffer for the SPI display interface (must live forever)
static DISPLAY_BUF: StaticCell<[u8; 512]> = StaticCell::new();

const PRODUCT: &str = "Quill Dactyl 4x6";

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quill firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // SPI1 to the ILI9341 (SKR Pico-style wiring: CLK=GPIO10, MOSI=GPIO11)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 32_000_000;
    let bus = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);

    let cs = Output::new(p.PIN_13, Level::High);
    let dc = Output::new(p.PIN_14, Level::Low);
    let rst = Output::new(p.PIN_15, Level::High);

    let device = ExclusiveDevice::new_no_delay(bus, cs).unwrap();
    let buf = DISPLAY_BUF.init([0u8; 512]);
    let di = SpiInterface::new(device, dc, buf);

    let target = Builder::new(ILI9341Rgb565, di)
        .reset_pin(rst)
        .display_size(240, 320)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .init(&mut Delay)
        .unwrap();

    info!("ILI9341 initialized");

    let mut display = Panel::new(target);
    display.draw_chrome(PRODUCT);

    // Direct-pin navigation keys, active low
    let keys = [
        KeyPin::new(Input::new(p.PIN_2, Pull::Up), KeyCode::DisplayMenu),
        KeyPin::new(Input::new(p.PIN_3, Pull::Up), KeyCode::Escape),
        KeyPin::new(Input::new(p.PIN_4, Pull::Up), KeyCode::Enter),
        KeyPin::new(Input::new(p.PIN_5, Pull::Up), KeyCode::Up),
        KeyPin::new(Input::new(p.PIN_6, Pull::Up), KeyCode::Down),
        KeyPin::new(Input::new(p.PIN_7, Pull::Up), KeyCode::Left),
        KeyPin::new(Input::new(p.PIN_8, Pull::Up), KeyCode::Right),
    ];

    spawner.spawn(tasks::keys::keys_task(keys)).unwrap();
    spawner.spawn(tasks::ui::ui_task(display)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

//! mochi-hw-interface
//!
//! Firmware for the Raspberry Pi Pico 2 W that plays bitmap animations on
//! an SSD1306 OLED and hosts a Wi-Fi access point with a control page:
//!
//! 1. The radio powers up (it also drives the on-board LED).
//! 2. The OLED is initialised on I2C0. If it does not answer, the firmware
//!    halts and blinks the LED.
//! 3. A splash screen, the idle animation and the network details are
//!    shown while the access point comes up.
//! 4. The main loop serves one HTTP request at a time and advances the
//!    animation whenever a frame is due.
//!
//! The CYW43 firmware blobs are not part of this repository. Copy
//! `43439A0.bin` and `43439A0_clm.bin` from the `cyw43-firmware/` directory
//! of the embassy-rs/embassy repository into `cyw43-firmware/` next to this
//! crate's Cargo.toml before building.

#![no_std]
#![no_main]

mod config;
mod net;
mod server;

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio::{self, Pio};
use embassy_time::Timer;
use heapless::String;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use mochi::assets::ANIMATIONS;
use mochi::{present, Player, Registry};
use mochi_oled_display_rs::{render_network_info, render_splash, DisplayConfig, NetworkInfo, OledDriver};
use mochi_web_rs::{render_control_page, CommandSurface, PAGE_CAPACITY, ROUTES};

use crate::config::{NetworkConfig, I2C_FREQUENCY_HZ};
use crate::server::now_ms;

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

// ---------------------------------------------------------------------------
// Static storage and diagnostics
// ---------------------------------------------------------------------------

/// The control page, rendered once at boot and served for every `/`.
static CONTROL_PAGE: StaticCell<String<PAGE_CAPACITY>> = StaticCell::new();

#[cfg(feature = "serial-debug")]
type Diag = mochi::DefmtDiagnostics;
#[cfg(not(feature = "serial-debug"))]
type Diag = mochi::NoopDiagnostics;

type OledI2c = I2c<'static, I2C0, i2c::Async>;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Mochi Web Control starting");

    let display_config = DisplayConfig::default();
    let network_config = NetworkConfig::default();
    let mut diagnostics = Diag::default();

    // —— Radio ——————————————————————————————————————————————————————————————

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );
    let (net_device, mut control) = net::start_radio(&spawner, pwr, spi).await;

    // —— Display ————————————————————————————————————————————————————————————

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c: OledI2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c_config,
    );

    let mut oled = OledDriver::new(i2c, display_config.i2c_address);
    if let Err(e) = oled.init().await {
        error!("SSD1306 init failed: {}", e);
        net::halt_and_blink(&mut control).await;
    }
    info!("OLED initialized");

    let registry = match Registry::new(&ANIMATIONS) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Invalid animation table: {}", e);
            net::halt_and_blink(&mut control).await;
        }
    };

    if let Err(e) = oled.show(|d| render_splash(d, &display_config)).await {
        warn!("Splash screen failed: {}", e);
    }
    Timer::after_millis(display_config.splash_hold_ms).await;

    // —— Access point ———————————————————————————————————————————————————————

    let stack =
        net::start_access_point(&spawner, net_device, &mut control, &network_config).await;

    let address = network_config.address_text();
    info!("WiFi: {}", network_config.ssid);
    info!("Password: {}", network_config.passphrase);
    info!("IP: {}", address.as_str());
    for route in ROUTES {
        info!("  route {}", route);
    }
    info!("{} animations loaded", registry.len());
    for (id, anim) in registry.iter().enumerate() {
        info!(
            "  [{}] {}: {} frames, {} ms loop",
            id,
            anim.name,
            anim.frame_count(),
            anim.loop_duration_ms()
        );
    }

    let page = CONTROL_PAGE.init(String::new());
    if render_control_page(page, &registry).is_err() {
        error!("Control page truncated at {} bytes", PAGE_CAPACITY);
    }
    let page: &'static String<PAGE_CAPACITY> = page;

    // —— Boot screens ———————————————————————————————————————————————————————

    let mut player = Player::new(registry, now_ms());
    let frame = player.reset_to_idle(now_ms(), &mut diagnostics);
    present(&mut oled, &frame, &mut diagnostics).await;
    Timer::after_millis(display_config.boot_pause_ms).await;

    let info = NetworkInfo {
        ssid: network_config.ssid,
        passphrase: network_config.passphrase,
        address: address.as_str(),
    };
    if let Err(e) = oled
        .show(|d| render_network_info(d, &info, &display_config))
        .await
    {
        warn!("Network screen failed: {}", e);
    }
    Timer::after_millis(display_config.info_hold_ms).await;

    let frame = player.reset_to_idle(now_ms(), &mut diagnostics);
    present(&mut oled, &frame, &mut diagnostics).await;

    // —— Main loop ——————————————————————————————————————————————————————————

    info!("Ready");
    server::serve(
        stack,
        &network_config,
        CommandSurface::new(page.as_str()),
        &mut player,
        &mut oled,
        &mut diagnostics,
    )
    .await
}

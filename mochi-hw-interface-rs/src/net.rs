//! CYW43 radio and IP stack bring-up.
//!
//! The radio runner, the network stack runner and the DHCP server are the
//! only spawned tasks. None of them touches playback state.

use core::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use cyw43::Control;
use cyw43_pio::PioSpi;
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use edge_dhcp::io::{self as dhcp_io, DEFAULT_SERVER_PORT};
use edge_dhcp::server::{Server, ServerOptions};
use edge_nal::UdpBind;
use edge_nal_embassy::{Udp, UdpBuffers};
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;

use crate::config::{NetworkConfig, DHCP_MAX_LEASES, DHCP_RESTART_MS, FATAL_BLINK_MS, LED_GPIO};

/// SPI link to the CYW43 over PIO0.
pub type RadioSpi = PioSpi<'static, PIO0, 0, DMA_CH0>;

static RADIO_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

#[embassy_executor::task]
async fn cyw43_task(runner: cyw43::Runner<'static, Output<'static>, RadioSpi>) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Lease addresses on the access point network, with `address` as server
/// and gateway.
#[embassy_executor::task]
async fn dhcp_task(stack: Stack<'static>, address: [u8; 4]) {
    let ip = Ipv4Addr::from(address);
    let buffers = UdpBuffers::<1, 1024, 1024, 2>::new();
    let udp = Udp::new(stack, &buffers);
    let bind_to = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_SERVER_PORT));
    let mut socket = match udp.bind(bind_to).await {
        Ok(socket) => socket,
        Err(e) => {
            error!("DHCP bind failed: {}", Debug2Format(&e));
            return;
        }
    };
    info!("DHCP server on port {}", DEFAULT_SERVER_PORT);

    let mut packet = [0u8; 1500];
    let mut gateways = [Ipv4Addr::UNSPECIFIED];
    let mut server = Server::<_, DHCP_MAX_LEASES>::new_with_et(ip);
    loop {
        // Leases survive a restart; only the socket loop is re-entered.
        if let Err(e) = dhcp_io::server::run(
            &mut server,
            &ServerOptions::new(ip, Some(&mut gateways)),
            &mut socket,
            &mut packet,
        )
        .await
        {
            warn!("DHCP server error: {}", Debug2Format(&e));
        }
        Timer::after_millis(DHCP_RESTART_MS).await;
    }
}

/// Power the radio, load its firmware and spawn its runner.
///
/// The radio comes up before the display because the on-board LED used to
/// signal a fatal error is wired to it.
pub async fn start_radio(
    spawner: &Spawner,
    pwr: Output<'static>,
    spi: RadioSpi,
) -> (cyw43::NetDriver<'static>, Control<'static>) {
    // Firmware blobs from embassy-rs/embassy, cyw43-firmware/.
    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let state = RADIO_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    unwrap!(spawner.spawn(cyw43_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("Radio up");

    (net_device, control)
}

/// Start the IP stack on a static address, open the WPA2 access point and
/// spawn the DHCP server that hands clients an address in the same subnet.
pub async fn start_access_point(
    spawner: &Spawner,
    net_device: cyw43::NetDriver<'static>,
    control: &mut Control<'static>,
    config: &NetworkConfig,
) -> Stack<'static> {
    let [a, b, c, d] = config.address;
    let ip = StaticConfigV4 {
        address: Ipv4Cidr::new(Ipv4Address::new(a, b, c, d), config.prefix_len),
        gateway: None,
        dns_servers: Default::default(),
    };

    // Only seeds TCP sequence numbers and ephemeral ports.
    let seed = Instant::now().as_ticks() ^ 0x6d6f_6368_6921_0000;

    let (stack, runner) = embassy_net::new(
        net_device,
        embassy_net::Config::ipv4_static(ip),
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    unwrap!(spawner.spawn(net_task(runner)));

    control
        .start_ap_wpa2(config.ssid, config.passphrase, config.channel)
        .await;
    info!("Access point started on channel {}", config.channel);

    unwrap!(spawner.spawn(dhcp_task(stack, config.address)));

    stack
}

/// Halt forever, blinking the on-board LED.
pub async fn halt_and_blink(control: &mut Control<'static>) -> ! {
    error!("Halting");
    loop {
        control.gpio_set(LED_GPIO, true).await;
        Timer::after_millis(FATAL_BLINK_MS).await;
        control.gpio_set(LED_GPIO, false).await;
        Timer::after_millis(FATAL_BLINK_MS).await;
    }
}

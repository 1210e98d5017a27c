//! Compile-time board and network configuration.

use core::fmt::Write;

use heapless::String;

// —— Pin assignments ————————————————————————————————————————————————————————
// OLED_SDA → GP20  (p.PIN_20)   I2C0, SSD1306 at 0x3C
// OLED_SCL → GP21  (p.PIN_21)
// WL_ON    → GP23  (p.PIN_23)   CYW43 power
// WL_CS    → GP25  (p.PIN_25)   CYW43 SPI chip select
// WL_DIO   → GP24  (p.PIN_24)
// WL_CLK   → GP29  (p.PIN_29)
// LED      → CYW43 GPIO 0
// ———————————————————————————————————————————————————————————————————————————

/// I2C bus frequency for the OLED.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// CYW43 GPIO that drives the on-board LED.
pub const LED_GPIO: u8 = 0;

/// Half-period of the fatal-error blink.
pub const FATAL_BLINK_MS: u64 = 250;

/// Clients the DHCP server keeps leases for at once.
pub const DHCP_MAX_LEASES: usize = 8;

/// Pause before the DHCP server loop is restarted after an I/O error.
pub const DHCP_RESTART_MS: u64 = 500;

/// Access point and HTTP listener settings.
#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    /// Access point name. Default: `Mochi-Control`.
    pub ssid: &'static str,
    /// WPA2 passphrase. Default: `mochi123`.
    pub passphrase: &'static str,
    /// 2.4 GHz channel. Default: 6.
    pub channel: u8,
    /// Device address on the access point network. Default: 192.168.4.1.
    pub address: [u8; 4],
    /// Network prefix length. Default: 24.
    pub prefix_len: u8,
    /// HTTP listen port. Default: 80.
    pub port: u16,
    /// How long a connected client may stall before it is dropped.
    /// Default: 2000 ms.
    pub client_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: "Mochi-Control",
            passphrase: "mochi123",
            channel: 6,
            address: [192, 168, 4, 1],
            prefix_len: 24,
            port: 80,
            client_timeout_ms: 2000,
        }
    }
}

impl NetworkConfig {
    /// Dotted-quad form of [`address`](Self::address).
    pub fn address_text(&self) -> String<15> {
        let [a, b, c, d] = self.address;
        let mut text = String::new();
        // "255.255.255.255" is exactly 15 bytes.
        let _ = write!(text, "{}.{}.{}.{}", a, b, c, d);
        text
    }
}

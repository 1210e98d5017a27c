//! Core OLED driver wrapping the `ssd1306` crate in async buffered graphics mode.
//!
//! [`OledDriver`] manages the SSD1306 display lifecycle: construction without
//! I2C traffic, explicit async initialisation, frame buffer flush, and
//! whole-screen redraws used by the animation loop and the boot screens.

use display_interface::DisplayError;
use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use mochi::{FrameRef, RenderSink};
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async,
};

use crate::error::OledError;
use crate::screens::{draw_frame, frame_fits};

/// Concrete display type used internally by [`OledDriver`].
pub type Display<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// Async driver for an SSD1306 128×64 OLED display over I2C.
///
/// Wraps the [`ssd1306`] crate in `BufferedGraphicsMode`, providing a
/// high-level interface for initialisation, rendering, and flushing.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`]: constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`]: sends the SSD1306 initialisation sequence.
/// 3. [`OledDriver::show()`] or [`RenderSink::render()`]: redraw and flush.
///
/// # Example
///
/// ```no_run
/// use mochi_oled_display_rs::OledDriver;
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await.unwrap();
/// oled.clear_buffer();
/// oled.flush().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    /// The underlying ssd1306 display. `Some` after construction; provides
    /// the not-initialised guard for `flush()` and `display_mut()`.
    display: Option<Display<I2C>>,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver.
    ///
    /// No I2C traffic is generated. You **must** call [`init()`](Self::init)
    /// before any display operations.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access).
    /// * `address`: 7-bit I2C device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display =
            Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                .into_buffered_graphics_mode();

        Self {
            display: Some(display),
            initialized: false,
        }
    }

    /// Initialise the SSD1306 hardware.
    ///
    /// A panel that is missing or not answering on the bus is reported as
    /// [`OledError::InitializationFailed`]; the firmware treats that as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::InitializationFailed`] if the display does not
    /// respond to the initialisation sequence.
    pub async fn init(&mut self) -> Result<(), OledError> {
        if let Some(ref mut display) = self.display {
            display
                .init()
                .await
                .map_err(|_| OledError::InitializationFailed)?;
            self.initialized = true;
            Ok(())
        } else {
            Err(OledError::NotInitialized)
        }
    }

    /// Clear the in-memory frame buffer.
    ///
    /// Does **not** send any I2C traffic; the panel keeps its image until
    /// [`flush()`](Self::flush) is called. Safe to call before
    /// [`init()`](Self::init) (no-op in that case).
    pub fn clear_buffer(&mut self) {
        if let Some(ref mut display) = self.display {
            display.clear_buffer();
        }
    }

    /// Transfer the frame buffer to the display via I2C.
    ///
    /// At 400 kHz I2C this takes approximately 20 ms for a full 1024-byte
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] if [`init()`](Self::init) has
    /// not been called, or [`OledError::Display`] on a bus-level failure.
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        if let Some(ref mut display) = self.display {
            display.flush().await?;
            Ok(())
        } else {
            Err(OledError::NotInitialized)
        }
    }

    /// Returns a mutable reference to the underlying `ssd1306` display,
    /// allowing direct use of `embedded-graphics` [`DrawTarget`] APIs.
    ///
    /// Returns `None` if the driver has not been initialised.
    ///
    /// [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget
    pub fn display_mut(&mut self) -> Option<&mut Display<I2C>> {
        if self.initialized {
            self.display.as_mut()
        } else {
            None
        }
    }

    /// Check whether the display has been successfully initialised.
    ///
    /// No I2C traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Replace the whole screen: clear the buffer, run `draw`, flush.
    ///
    /// ```ignore
    /// oled.show(|d| render_splash(d, &config)).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] before [`init()`](Self::init),
    /// or the first drawing or bus error.
    pub async fn show<F>(&mut self, draw: F) -> Result<(), OledError>
    where
        F: FnOnce(&mut Display<I2C>) -> Result<(), DisplayError>,
    {
        self.clear_buffer();
        let display = self.display_mut().ok_or(OledError::NotInitialized)?;
        draw(display)?;
        self.flush().await
    }
}

impl<I2C> RenderSink for OledDriver<I2C>
where
    I2C: I2c,
{
    type Error = OledError;

    /// Paint `frame` at the origin and flush it to the panel.
    ///
    /// A frame whose bitmap does not match its geometry is rejected before
    /// anything is drawn, leaving the previous image on screen.
    async fn render(&mut self, frame: &FrameRef<'_>) -> Result<(), OledError> {
        if !frame_fits(frame) {
            return Err(OledError::BitmapSize);
        }
        self.show(|display| draw_frame(display, frame)).await
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    use super::*;

    /// Counts transactions; answers every one with a NACK when `silent`.
    struct Bus<'a> {
        transactions: &'a Cell<usize>,
        silent: bool,
    }

    impl ErrorType for Bus<'_> {
        type Error = ErrorKind;
    }

    impl I2c for Bus<'_> {
        async fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            self.transactions.set(self.transactions.get() + 1);
            if self.silent {
                Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
            } else {
                Ok(())
            }
        }
    }

    fn driver(transactions: &Cell<usize>, silent: bool) -> OledDriver<Bus<'_>> {
        OledDriver::new(
            Bus {
                transactions,
                silent,
            },
            0x3C,
        )
    }

    #[test]
    fn construction_and_clear_send_nothing() {
        let count = Cell::new(0);
        let mut oled = driver(&count, false);
        oled.clear_buffer();
        assert!(!oled.is_initialized());
        assert!(oled.display_mut().is_none());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn flush_before_init_is_rejected() {
        let count = Cell::new(0);
        let mut oled = driver(&count, false);
        assert!(matches!(
            block_on(oled.flush()),
            Err(OledError::NotInitialized)
        ));
        assert!(matches!(
            block_on(oled.show(|_| Ok(()))),
            Err(OledError::NotInitialized)
        ));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn init_on_silent_bus_fails() {
        let count = Cell::new(0);
        let mut oled = driver(&count, true);
        assert!(matches!(
            block_on(oled.init()),
            Err(OledError::InitializationFailed)
        ));
        assert!(!oled.is_initialized());
        assert!(count.get() > 0);
    }

    #[test]
    fn init_then_flush_reaches_the_panel() {
        let count = Cell::new(0);
        let mut oled = driver(&count, false);
        block_on(oled.init()).unwrap();
        assert!(oled.is_initialized());

        count.set(0);
        block_on(oled.flush()).unwrap();
        assert!(count.get() > 0);
    }

    #[test]
    fn render_rejects_mismatched_bitmap_without_traffic() {
        static SHORT: [u8; 3] = [0xFF; 3];
        let count = Cell::new(0);
        let mut oled = driver(&count, false);
        block_on(oled.init()).unwrap();
        count.set(0);

        let frame = FrameRef {
            animation_index: 0,
            frame_index: 0,
            bitmap: &SHORT,
            width: 16,
            height: 2,
        };
        assert!(matches!(
            block_on(oled.render(&frame)),
            Err(OledError::BitmapSize)
        ));
        assert_eq!(count.get(), 0);
    }
}

//! HTTP command surface for the Mochi animation player.
//!
//! The device serves a single control page and three plain-text endpoints
//! over one connection at a time. This crate owns everything between the
//! bytes read from a TCP socket and the bytes written back:
//!
//! - [`request`]: request-line parsing and query parameters.
//! - [`response`]: status codes, bodies and HTTP/1.1 serialization over
//!   any [`embedded_io_async::Write`].
//! - [`page`]: the HTML control page, rendered once at boot.
//! - [`surface`]: routing onto the [`mochi::Player`].
//!
//! # Example
//!
//! ```ignore
//! let surface = CommandSurface::new(page);
//! let response = match parse_request(&buf[..len]) {
//!     Ok(request) => surface.handle(&request, &mut player, &mut oled, now, &mut diag).await,
//!     Err(_) => Response::bad_request(),
//! };
//! write_response(&mut socket, &response).await?;
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: `defmt::Format` on error and status types.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod page;
pub mod request;
pub mod response;
pub mod surface;

pub use page::{render_control_page, PAGE_CAPACITY};
pub use request::{head_complete, parse_request, Request, RequestError, MAX_REQUEST_LEN};
pub use response::{write_response, Body, ContentType, Response, StatusCode};
pub use surface::{CommandSurface, Route, IDLE_REPLY, ROUTES};

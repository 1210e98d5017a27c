//! The playback loop and the HTTP listener.
//!
//! One connection is served at a time. While waiting for a client the loop
//! sleeps until either a connection arrives or the next frame is due, so
//! animations keep running with no client connected.

use core::pin::pin;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::{Duration, Instant, Timer};
use mochi::{present, Diagnostics, Player, RenderSink};
use mochi_web_rs::{
    head_complete, parse_request, write_response, CommandSurface, Response, MAX_REQUEST_LEN,
};

use crate::config::NetworkConfig;

/// Wrapping millisecond clock fed to the player.
pub fn now_ms() -> u32 {
    // Truncation is the wrap.
    Instant::now().as_millis() as u32
}

/// Advance the player and render the frame if one is due.
pub async fn tick<S, D>(player: &mut Player, sink: &mut S, diagnostics: &mut D)
where
    S: RenderSink,
    D: Diagnostics,
{
    if let Some(frame) = player.advance(now_ms(), diagnostics) {
        present(sink, &frame, diagnostics).await;
    }
}

/// Serve the command surface forever.
pub async fn serve<S, D>(
    stack: Stack<'static>,
    config: &NetworkConfig,
    surface: CommandSurface<'static>,
    player: &mut Player,
    sink: &mut S,
    diagnostics: &mut D,
) -> !
where
    S: RenderSink,
    D: Diagnostics,
{
    let mut rx_buffer = [0u8; 1536];
    let mut tx_buffer = [0u8; 2048];
    let mut request = [0u8; MAX_REQUEST_LEN];

    info!("Listening on port {}", config.port);

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_millis(config.client_timeout_ms)));

        let accepted = {
            let mut accept = pin!(socket.accept(config.port));
            loop {
                let wait = player.millis_until_next_frame(now_ms());
                match select(accept.as_mut(), Timer::after_millis(u64::from(wait))).await {
                    Either::First(result) => break result,
                    Either::Second(()) => tick(player, sink, diagnostics).await,
                }
            }
        };
        if let Err(e) = accepted {
            warn!("Accept failed: {:?}", e);
            continue;
        }
        debug!("Client connected: {:?}", socket.remote_endpoint());

        let len = match read_head(&mut socket, &mut request).await {
            Ok(len) => len,
            Err(e) => {
                warn!("Read failed: {:?}", e);
                socket.abort();
                let _ = socket.flush().await;
                continue;
            }
        };

        let response = match parse_request(&request[..len]) {
            Ok(req) => {
                debug!("{} {}", req.method, req.path);
                surface
                    .handle(&req, player, sink, now_ms(), diagnostics)
                    .await
            }
            Err(e) => {
                warn!("Bad request: {}", e);
                Response::bad_request()
            }
        };

        if let Err(e) = write_response(&mut socket, &response).await {
            warn!("Write failed: {:?}", e);
        }
        socket.close();
        let _ = socket.flush().await;

        tick(player, sink, diagnostics).await;
    }
}

/// Read until the request head is complete, the buffer is full or the
/// client closes its side.
async fn read_head(
    socket: &mut TcpSocket<'_>,
    buf: &mut [u8],
) -> Result<usize, embassy_net::tcp::Error> {
    let mut len = 0;
    while len < buf.len() {
        let n = socket.read(&mut buf[len..]).await?;
        if n == 0 {
            break;
        }
        len += n;
        if head_complete(&buf[..len]) {
            break;
        }
    }
    Ok(len)
}

//! Request routing onto the player.
//!
//! [`CommandSurface::handle`] is the only code outside the playback loop
//! that touches the [`Player`]. It runs to completion for one request:
//! selection, rendering of the new frame and building the response all
//! happen before it returns.

use core::fmt::Write as _;

use heapless::String;
use mochi::{present, Diagnostics, Player, RenderSink};

use crate::request::Request;
use crate::response::{Response, StatusCode};

/// The routes the device serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// `/`: the control page.
    Root,
    /// `/idle`: return to the idle animation.
    Idle,
    /// `/play?id=N`: switch to animation `N`.
    Play,
    /// `/status`: current animation and frame.
    Status,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Route::Root,
            "/idle" => Route::Idle,
            "/play" => Route::Play,
            "/status" => Route::Status,
            _ => Route::NotFound,
        }
    }
}

/// Paths listed in the boot log.
pub const ROUTES: [&str; 4] = ["/", "/idle", "/play?id=N", "/status"];

/// Body of every `/idle` response, whatever animation 0 is called.
pub const IDLE_REPLY: &str = "Idle";

/// HTTP handlers over the player and the render sink.
#[derive(Debug, Clone, Copy)]
pub struct CommandSurface<'p> {
    page: &'p str,
}

impl<'p> CommandSurface<'p> {
    /// `page` is the pre-rendered control page served at `/`.
    pub const fn new(page: &'p str) -> Self {
        Self { page }
    }

    /// Serve one request.
    ///
    /// `/idle` and a successful `/play` render the new animation's first
    /// frame through `sink` before the response is built; a failed render
    /// is reported to `diagnostics` and does not change the response.
    pub async fn handle<S, D>(
        &self,
        request: &Request<'_>,
        player: &mut Player,
        sink: &mut S,
        now: u32,
        diagnostics: &mut D,
    ) -> Response<'p>
    where
        S: RenderSink,
        D: Diagnostics + ?Sized,
    {
        match Route::from_path(request.path) {
            Route::Root => Response::html(self.page),
            Route::Idle => {
                let frame = player.reset_to_idle(now, diagnostics);
                present(sink, &frame, diagnostics).await;
                Response::plain(StatusCode::Ok, IDLE_REPLY)
            }
            Route::Play => {
                let Some(raw) = request.query_param("id") else {
                    return Response::plain(StatusCode::BadRequest, "Missing id parameter");
                };
                let Ok(id) = raw.parse::<usize>() else {
                    return invalid_id();
                };
                match player.select(id, now, diagnostics) {
                    Ok(frame) => {
                        present(sink, &frame, diagnostics).await;
                        Response::plain(StatusCode::Ok, player.status().name)
                    }
                    Err(_) => invalid_id(),
                }
            }
            Route::Status => {
                let mut text = String::new();
                // A 31-byte name and two 20-digit numbers fit in the body.
                let _ = write!(text, "{}", player.status());
                Response::text(text)
            }
            Route::NotFound => Response::not_found(),
        }
    }
}

fn invalid_id<'p>() -> Response<'p> {
    Response::plain(StatusCode::BadRequest, "Invalid animation id")
}

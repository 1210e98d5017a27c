//! The browser control page.
//!
//! The page lists every registered animation as a button and polls
//! `/status` every three seconds. It depends only on the registry, which
//! never changes at runtime, so the firmware renders it once at boot.

use core::fmt::{self, Write};

use mochi::Registry;

/// Buffer size that comfortably holds the page for a few dozen animations.
pub const PAGE_CAPACITY: usize = 8192;

const HEAD: &str = "<!DOCTYPE html>\
<html><head><meta charset='utf-8'>\
<meta name='viewport' content='width=device-width,initial-scale=1'>\
<title>Mochi Control</title><style>\
body{margin:0;padding:16px;font-family:system-ui,sans-serif;background:#111;color:#eee}\
main{max-width:560px;margin:0 auto}\
h1{text-align:center;color:#f55;margin:8px 0 20px}\
h2{font-size:1.1em;color:#f77;border-bottom:1px solid #533;padding-bottom:6px}\
#status{background:#2a1212;border:1px solid #733;border-radius:10px;padding:14px;\
text-align:center;font-size:1.2em;margin-bottom:16px}\
button{width:100%;padding:14px;border:0;border-radius:10px;color:#fff;\
font-size:1em;font-weight:bold;cursor:pointer}\
button:active{opacity:.7}\
.idle{background:#c22;margin-bottom:8px}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(130px,1fr));gap:10px}\
.grid button{background:#822}\
</style></head><body><main>\
<h1>Mochi Control</h1>\
<div id='status'>Connecting...</div>\
<button class='idle' onclick=\"send('/idle')\">Return to Idle</button>";

const TAIL: &str = "</div></main><script>\
function show(t){document.getElementById('status').textContent='Now playing: '+t}\
function send(u){fetch(u).then(r=>r.text()).then(show)}\
function poll(){fetch('/status').then(r=>r.text()).then(show).catch(()=>{})}\
poll();setInterval(poll,3000);\
</script></body></html>";

/// Write the control page for `registry` into `out`.
///
/// Animation names are HTML-escaped. Each animation gets a button that
/// requests `/play?id=N` for its registry index.
pub fn render_control_page<W: Write>(out: &mut W, registry: &Registry) -> fmt::Result {
    out.write_str(HEAD)?;
    write!(out, "<h2>Animations ({})</h2><div class='grid'>", registry.len())?;
    for (id, animation) in registry.iter().enumerate() {
        write!(out, "<button onclick=\"send('/play?id={}')\">", id)?;
        write_escaped(out, animation.name)?;
        out.write_str("</button>")?;
    }
    out.write_str(TAIL)
}

/// Write `text` with the HTML special characters replaced by entities.
pub fn write_escaped<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    let mut rest = text;
    while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
        out.write_str(&rest[..pos])?;
        let entity = match rest.as_bytes()[pos] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            _ => "&#39;",
        };
        out.write_str(entity)?;
        rest = &rest[pos + 1..];
    }
    out.write_str(rest)
}

#[cfg(test)]
mod tests {
    use std::string::String;

    use mochi::assets::ANIMATIONS;
    use mochi::AnimationDescriptor;

    use super::*;

    static PIXEL: [u8; 1] = [0x80];

    static ODD_NAMES: [AnimationDescriptor; 2] = [
        AnimationDescriptor {
            name: "Idle",
            width: 1,
            height: 1,
            frames: &[&PIXEL],
            durations: &[100],
        },
        AnimationDescriptor {
            name: "<Tom & 'Jerry'>",
            width: 1,
            height: 1,
            frames: &[&PIXEL],
            durations: &[100],
        },
    ];

    fn page(registry: &Registry) -> String {
        let mut out = String::new();
        render_control_page(&mut out, registry).unwrap();
        out
    }

    #[test]
    fn escapes_special_characters() {
        let mut out = String::new();
        write_escaped(&mut out, "a<b>&\"c'").unwrap();
        assert_eq!(out, "a&lt;b&gt;&amp;&quot;c&#39;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        let mut out = String::new();
        write_escaped(&mut out, "Sleepy").unwrap();
        assert_eq!(out, "Sleepy");
    }

    #[test]
    fn lists_every_built_in_animation() {
        let registry = Registry::new(&ANIMATIONS).unwrap();
        let html = page(&registry);
        assert!(html.contains("<h2>Animations (5)</h2>"));
        for (id, anim) in ANIMATIONS.iter().enumerate() {
            let button = std::format!("<button onclick=\"send('/play?id={}')\">{}</button>", id, anim.name);
            assert!(html.contains(&button), "missing {}", anim.name);
        }
        assert_eq!(html.matches("/play?id=").count(), ANIMATIONS.len());
    }

    #[test]
    fn has_idle_button_and_status_polling() {
        let html = page(&Registry::new(&ANIMATIONS).unwrap());
        assert!(html.contains("send('/idle')"));
        assert!(html.contains("id='status'"));
        assert!(html.contains("fetch('/status')"));
        assert!(html.contains("setInterval(poll,3000)"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn names_are_escaped_in_buttons() {
        let html = page(&Registry::new(&ODD_NAMES).unwrap());
        assert!(html.contains("&lt;Tom &amp; &#39;Jerry&#39;&gt;"));
        assert!(!html.contains("<Tom"));
    }

    #[test]
    fn fits_the_page_buffer() {
        let mut out: heapless::String<PAGE_CAPACITY> = heapless::String::new();
        render_control_page(&mut out, &Registry::new(&ANIMATIONS).unwrap()).unwrap();
        assert!(out.len() < PAGE_CAPACITY);
    }
}

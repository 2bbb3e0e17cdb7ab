//! Kinetic Sand entry point
//!
//! On the web the table runs in a `<canvas id="canvas">` driven by
//! `requestAnimationFrame`; the page may pass settings JSON in the canvas's
//! `data-settings` attribute. Natively it runs one pattern headless at 60 fps,
//! taking settings JSON from `KINETIC_SAND_SETTINGS`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_table {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use kinetic_sand::renderer::SandCanvas;
    use kinetic_sand::{Settings, Table};

    /// Frame delta assumed for the very first frame (ms)
    const FIRST_FRAME_MS: f64 = 16.0;

    /// Table instance plus frame timing
    struct Host {
        table: Table<SandCanvas>,
        last_time: f64,
    }

    impl Host {
        /// Fit the table to the window; the compositor resizes the canvas
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            self.table.on_resize(width, height);
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FIRST_FRAME_MS
            };
            self.last_time = time;

            self.table.advance(dt);
            self.table.render();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Kinetic Sand starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no <canvas id=\"canvas\">");
            return;
        };

        // Optional overrides supplied by the page
        let settings = Settings::from_supplied(canvas.get_attribute("data-settings").as_deref());
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let compositor =
            match SandCanvas::new(canvas.clone(), seed.wrapping_add(1), settings.ball_radius) {
                Ok(compositor) => compositor,
                Err(e) => {
                    log::error!("Sand canvas unavailable: {}", e);
                    return;
                }
            };
        let host = Rc::new(RefCell::new(Host {
            table: Table::new(settings, seed, compositor),
            last_time: 0.0,
        }));
        host.borrow_mut().fit_to_window();

        setup_input_handlers(&canvas, host.clone());
        request_animation_frame(host);

        log::info!("Kinetic Sand running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        // Press on the table restarts with a new pattern
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let x = event.offset_x() as f64;
                let y = event.offset_y() as f64;
                if host.borrow_mut().table.on_pointer_down(x, y) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().fit_to_window();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            host.borrow_mut().frame(time);
            request_animation_frame(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_table::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Kinetic Sand (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    run_headless_cycle();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Trace one full pattern at a steady 60 fps and report the result
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_cycle() {
    use kinetic_sand::renderer::NullCompositor;
    use kinetic_sand::{Settings, Table, TablePhase};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let settings = Settings::from_supplied(std::env::var("KINETIC_SAND_SETTINGS").ok().as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let mut table = Table::new(settings, seed, NullCompositor::default());
    table.on_resize(960.0, 960.0);

    let name = table.pattern_name();
    let mut frames: u64 = 0;
    let mut next_report = 0.1;
    while table.phase() == TablePhase::Tracing {
        table.advance(FRAME_MS);
        table.render();
        frames += 1;
        if table.state().progress() >= next_report {
            log::info!(
                "{}: {:.0}% after {:.1}s",
                name,
                table.state().progress() * 100.0,
                frames as f64 * FRAME_MS / 1000.0
            );
            next_report += 0.1;
        }
    }

    let compositor = table.compositor();
    println!(
        "{} traced in {:.1}s ({} frames, {} marks, {} composited)",
        name,
        frames as f64 * FRAME_MS / 1000.0,
        frames,
        compositor.marks,
        compositor.composed
    );
}

//! Heart Catch entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement};

    use heart_catch::assets::{AssetId, AssetState, web::load_image};
    use heart_catch::consts::CATCH_VIBRATE_MS;
    use heart_catch::game::LoopControl;
    use heart_catch::input::PointerKind;
    use heart_catch::renderer::{CanvasSurface, Surface};
    use heart_catch::sim::RoundPhase;
    use heart_catch::ui::HudUpdate;
    use heart_catch::{Game, Settings, Tuning, platform};

    /// Game plus the browser objects it draws into
    struct App {
        game: Game,
        surface: CanvasSurface,
        document: Document,
    }

    impl App {
        /// Copy changed HUD values into the DOM
        fn apply_hud(&self, hud: &HudUpdate) {
            if let Some(score) = hud.score {
                set_text(&self.document, "score", &score.to_string());
            }
            if let Some(time) = hud.time_left {
                set_text(&self.document, "time", &time.to_string());
            }
        }

        /// Show/hide the overlay for the current phase
        fn apply_overlay(&self) {
            let view = self.game.overlay();
            if let Some(el) = element::<HtmlElement>(&self.document, "overlay") {
                let display = if view.visible { "grid" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
            if view.visible {
                set_text(&self.document, "overlayTitle", &view.title);
                set_text(&self.document, "overlayDesc", &view.description);
                set_text(&self.document, "startBtn", &view.button_label);
            }
        }

        fn resize(&mut self) {
            let viewport = platform::viewport();
            self.game.resize(viewport);
            self.surface.configure(&viewport);
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {}", e)))?;

        log::info!("Heart Catch starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = element(&document, "game")
            .ok_or_else(|| JsValue::from_str("no #game canvas"))?;

        let settings = Settings::load();
        // Pin the detected locale so later visits don't depend on the browser language
        settings.save();
        let viewport = platform::viewport();
        let seed = js_sys::Date::now() as u64;
        let mut surface = CanvasSurface::new(canvas)?;
        surface.configure(&viewport);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, Tuning::default(), settings, viewport),
            surface,
            document: document.clone(),
        }));

        // Fullscreen button label follows the locale
        let strings = app.borrow().game.strings();
        set_text(&document, "fsBtn", strings.fullscreen_label);

        load_assets(app.clone())?;
        setup_resize(app.clone())?;
        setup_input_handlers(app.clone())?;
        setup_buttons(app.clone())?;

        app.borrow().apply_overlay();
        log::info!("Heart Catch ready (seed {})", seed);
        Ok(())
    }

    fn load_assets(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for id in AssetId::ALL {
            let app_for_load = app.clone();
            let img = load_image(id, move |id, size| {
                let mut a = app_for_load.borrow_mut();
                match size {
                    Some((w, h)) => a.game.assets.mark_loaded(id, w, h),
                    None => a.game.assets.set(id, AssetState::Failed),
                }
                // Readiness message only matters while the overlay is up
                if a.game.phase() != RoundPhase::Running {
                    a.apply_overlay();
                }
            })?;
            app.borrow_mut().surface.set_image(id, img);
        }
        Ok(())
    }

    fn setup_resize(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "resize",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        // Non-passive so touch scrolling can be cancelled while playing
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);

        // Pointer move / down
        for name in ["pointermove", "pointerdown"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                let outcome = app
                    .borrow_mut()
                    .game
                    .pointer(PointerKind::Pointer, Some(event.client_x() as f32));
                if outcome.prevent_default {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                closure.as_ref().unchecked_ref(),
                &opts,
            )?;
            closure.forget();
        }

        // Touch move / start
        for name in ["touchmove", "touchstart"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                let x = event.touches().get(0).map(|t| t.client_x() as f32);
                let outcome = app.borrow_mut().game.pointer(PointerKind::Touch, x);
                if outcome.prevent_default {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                closure.as_ref().unchecked_ref(),
                &opts,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = app.borrow().document.clone();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_round(app.clone());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("fsBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                platform::request_fullscreen();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn start_round(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let seed = js_sys::Date::now() as u64;
            let now = platform::now_ms();
            if let Err(e) = a.game.start(now, seed) {
                log::warn!("Start ignored: {}", e);
                return;
            }
            a.apply_overlay();
        }
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let control = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            let report = a.game.frame(&mut a.surface, time);
            a.apply_hud(&report.hud);

            for _ in 0..a.game.haptic_pulses(&report.events) {
                platform::vibrate(CATCH_VIBRATE_MS);
            }
            if report.control == LoopControl::Stop {
                a.apply_overlay();
            }
            report.control
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Native: play one unattended round against a simulated clock and log the result
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_catch::input::PointerKind;
    use heart_catch::renderer::RecordingSurface;
    use heart_catch::sim::GameEvent;
    use heart_catch::{Game, Settings, Tuning, platform};

    env_logger::init();
    log::info!("Heart Catch (native) starting...");
    log::info!("Native mode runs a headless round - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => tuning,
            Ok(Err(e)) => {
                log::warn!("Bad tuning file {}: {}", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let viewport = platform::viewport();
    let seed = 0x5eed;
    let mut game = Game::new(seed, tuning, Settings::load(), viewport);
    let mut surface = RecordingSurface::default();

    if let Err(e) = game.start(0.0, seed) {
        log::error!("{}", e);
        return;
    }

    // A lazy catcher that sweeps back and forth
    let frames = game.run_simulated(&mut surface, 0.0, 1000.0 / 60.0, 60 * 120, |g, report| {
        let t = g.round.elapsed;
        let x = viewport.width * (0.5 + 0.45 * (t * 0.8).sin());
        g.pointer(PointerKind::Pointer, Some(x));
        for event in &report.events {
            if let GameEvent::TimeChanged(secs) = event {
                if secs % 10 == 0 {
                    log::info!("{}s left, score {}", secs, g.round.score);
                }
            }
        }
    });

    println!(
        "Round over after {} frames: caught {}, missed {}",
        frames, game.round.score, game.round.missed
    );
    println!("{}", game.overlay().description);
    println!("Frames drawn: {}", surface.frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

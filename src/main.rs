//! Duel Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use duel_pong::Settings;
    use duel_pong::assets::{self, AssetManifest};
    use duel_pong::audio::{AudioManager, cues};
    use duel_pong::consts::*;
    use duel_pong::renderer::{CanvasRenderer, Scene};
    use duel_pong::sim::{GameState, InputEvent, InputSampler, Key, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputSampler,
        /// Key events received since the last simulated frame
        pending: Vec<InputEvent>,
        renderer: CanvasRenderer,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(renderer: CanvasRenderer, audio: AudioManager) -> Self {
            Self {
                state: GameState::new(),
                input: InputSampler::new(),
                pending: Vec::new(),
                renderer,
                audio,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                self.input.apply(self.pending.drain(..));
                tick(&mut self.state, self.input.buttons());
                self.accumulator -= FRAME_DT;
                substeps += 1;

                for effect in cues(&self.state.events) {
                    self.audio.play(effect);
                }

                // Clear one-shot inputs after processing
                self.input.end_frame();
            }

            // Drop time we could not catch up on
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(FRAME_DT);
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Err(e) = self.renderer.render(&Scene::from_state(&self.state)) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("{} starting...", GAME_NAME);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        document.set_title(GAME_NAME);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(WINDOW_WIDTH as u32);
        canvas.set_height(WINDOW_HEIGHT as u32);

        let manifest = AssetManifest::default();
        if let Err(e) = assets::load_font(&manifest).await {
            log::error!("{e}");
            return Err(JsValue::from_str(&e.to_string()));
        }
        let audio = AudioManager::load(&manifest, Settings::default()).await;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let renderer = CanvasRenderer::new(&canvas)?;
        let game = Rc::new(RefCell::new(Game::new(renderer, audio)));

        setup_input_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("{} running!", GAME_NAME);
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom_key(&event.key()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page
                event.prevent_default();

                let mut g = game.borrow_mut();
                if pressed {
                    g.audio.resume();
                    g.pending.push(InputEvent::KeyDown(key));
                } else {
                    g.pending.push(InputEvent::KeyUp(key));
                }
            });
            window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key-ups are never delivered once focus is gone
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().pending.push(InputEvent::FocusLost);
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Tab hidden
        {
            let game = game.clone();
            let document = window.document().ok_or("no document")?;
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.hidden() {
                    game.borrow_mut().pending.push(InputEvent::FocusLost);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Page unloading
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().pending.push(InputEvent::Close);
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            if g.input.quit_requested() {
                log::info!("{} stopped", GAME_NAME);
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duel_pong::assets::{AssetBundle, AssetManifest};
    use duel_pong::consts::GAME_NAME;

    env_logger::init();
    log::info!("{} (native) starting...", GAME_NAME);

    let manifest = AssetManifest::default();
    if let Err(e) = AssetBundle::load(&manifest) {
        log::error!("{e}");
        std::process::exit(1);
    }

    log::info!("Native mode has no window - run with `trunk serve` for the web version");
    demo_rally();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one rally with nobody at the controls and log how it went
#[cfg(not(target_arch = "wasm32"))]
fn demo_rally() {
    use duel_pong::audio::cues;
    use duel_pong::sim::{ButtonState, GameEvent, GameState, tick};

    let mut state = GameState::new();
    let idle = ButtonState::default();
    let mut bounces = 0;

    for _ in 0..10_000 {
        tick(&mut state, &idle);
        bounces += cues(&state.events).count();
        if let Some(side) = state.events.iter().find_map(|e| match e {
            GameEvent::Scored(side) => Some(*side),
            _ => None,
        }) {
            log::info!(
                "{side:?} scored on frame {} after {bounces} bounces ({} - {})",
                state.frame,
                state.score_left,
                state.score_right
            );
            return;
        }
    }
    log::warn!("Rally did not end");
}

//! Coin Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use coin_jump::platform::FrameClock;
    use coin_jump::platform::web::DomFrontend;
    use coin_jump::{Game, Tuning};

    /// Game instance plus frame timing
    struct App {
        game: Game<DomFrontend>,
        clock: FrameClock,
    }

    impl App {
        /// Feed elapsed time to the simulation
        fn update(&mut self, time: f64) {
            let dt_ms = self.clock.tick(time);
            self.game.advance(dt_ms);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("points") {
                el.set_text_content(Some(&format!("Points: {}", self.game.score())));
            }
            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&format!("Time: {}", self.game.remaining_time())));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Coin Jump starting...");

        let frontend = DomFrontend::new("game-container")
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(Tuning::default(), seed, frontend)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.start();

        let app = Rc::new(RefCell::new(App {
            game,
            clock: FrameClock::new(),
        }));
        app.borrow().update_hud();

        setup_input_handlers(app.clone())?;
        request_animation_frame(app);

        log::info!("Coin Jump running!");
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if key.starts_with("Arrow") {
                // Keep the page from scrolling
                event.prevent_default();
            }
            app.borrow_mut().game.handle_key_name(&key);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = {
            let mut a = app.borrow_mut();
            a.update(time);
            a.update_hud();
            a.game.is_running()
        };

        if running {
            request_animation_frame(app);
        } else {
            log::info!("Game loop finished");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native: play one headless match with a simple autopilot.
///
/// Usage: `coin-jump [SEED] [TUNING_JSON_PATH]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use coin_jump::platform::Headless;
    use coin_jump::{Game, Tuning};

    env_logger::init();
    log::info!("Coin Jump (native) starting...");
    log::info!("Browser version: build for wasm32 and serve index.html");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut game = match Game::new(tuning, seed, Headless::new()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot create match: {}", e);
            std::process::exit(1);
        }
    };
    game.start();

    // ~60 fps frames; press a key every 100 ms like a held-down key repeat
    const FRAME_MS: u64 = 16;
    let mut since_key = 0;
    while game.is_running() {
        game.advance(FRAME_MS);
        since_key += FRAME_MS;
        if since_key >= 100 {
            since_key = 0;
            for key in autopilot(&game) {
                game.handle_key(key);
            }
        }
    }

    match serde_json::to_string(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize result: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<coin_jump::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(coin_jump::Tuning::from_json(&json)?)
}

/// Walk right, jumping just before each rock
#[cfg(not(target_arch = "wasm32"))]
fn autopilot<F: coin_jump::Frontend>(game: &coin_jump::Game<F>) -> Vec<coin_jump::Key> {
    use coin_jump::Key;
    use coin_jump::sim::Body;

    let me = game.character().bounds();
    let rock_ahead = game.field().rocks.iter().any(|rock| {
        let gap = rock.pos.x - me.right();
        (0.0..=30.0).contains(&gap)
    });

    let mut keys = Vec::new();
    if rock_ahead && !game.character().phase.is_airborne() {
        keys.push(Key::Up);
    }
    if me.pos.x < game.tuning().arena_width - me.size.x {
        keys.push(Key::Right);
    }
    keys
}

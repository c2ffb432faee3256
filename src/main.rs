//! Brickfall entry point
//!
//! In the browser this wires the DOM (keys, buttons, animation frames) to the
//! game. Natively it runs a headless autopilot session and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brickfall::platform::{Key, PanelId, WebPlatform, web::MODAL_CONFIRM_ID};
    use brickfall::sim::Game;
    use brickfall::{Difficulty, Settings, Theme, Tuning};

    /// Game plus the page it draws into
    struct App {
        game: Game,
        platform: WebPlatform,
    }

    type Shared = Rc<RefCell<App>>;

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Optional JSON overrides stored on the canvas as `data-settings` /
    /// `data-tuning`; bad JSON is logged and ignored
    fn load_config(canvas: &HtmlCanvasElement) -> (Settings, Tuning) {
        let settings = canvas
            .get_attribute("data-settings")
            .and_then(|json| {
                Settings::from_json(&json)
                    .inspect_err(|e| log::warn!("Ignoring data-settings: {e}"))
                    .ok()
            })
            .unwrap_or_default();
        let tuning = canvas
            .get_attribute("data-tuning")
            .and_then(|json| {
                Tuning::from_json(&json)
                    .inspect_err(|e| log::warn!("Ignoring data-tuning: {e}"))
                    .ok()
            })
            .unwrap_or_default();
        (settings, tuning)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Brickfall starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(PanelId::Canvas.element_id())
            .ok_or("no game canvas")?
            .dyn_into()?;

        let (settings, tuning) = load_config(&canvas);
        let seed = js_sys::Date::now() as u64;
        let platform = WebPlatform::new(document.clone(), &canvas, &settings)?;
        let game = Game::new(tuning, settings, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {seed}");

        let app = Rc::new(RefCell::new(App { game, platform }));

        setup_keyboard(&document, app.clone());
        setup_theme_buttons(&document, app.clone());
        setup_difficulty_buttons(&document, app.clone());
        setup_restart_button(&document, app.clone());
        setup_modal_confirm(&document, app.clone());

        request_animation_frame(app);

        log::info!("Brickfall running!");
        Ok(())
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id} button");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(document: &Document, app: Shared) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key(), &event.code()) else {
                    return;
                };
                event.prevent_default();
                app.borrow_mut().game.key_down(key, now());
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key(), &event.code()) {
                app.borrow_mut().game.key_up(key);
            }
        });
        let _ =
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_theme_buttons(document: &Document, app: Shared) {
        for (id, theme) in [("nightSkyBtn", Theme::NightSky), ("forestBtn", Theme::Forest)] {
            let app = app.clone();
            on_click(document, id, move || {
                let mut guard = app.borrow_mut();
                let App { game, platform } = &mut *guard;
                game.select_theme(theme, platform);
            });
        }
    }

    fn setup_difficulty_buttons(document: &Document, app: Shared) {
        let buttons = [
            ("easyBtn", Difficulty::Easy),
            ("mediumBtn", Difficulty::Medium),
            ("hardBtn", Difficulty::Hard),
        ];
        for (id, difficulty) in buttons {
            let app = app.clone();
            on_click(document, id, move || {
                let mut guard = app.borrow_mut();
                let App { game, platform } = &mut *guard;
                if let Err(e) = game.start_game(difficulty, 0, now(), platform) {
                    log::error!("Could not start {difficulty} game: {e}");
                }
            });
        }
    }

    fn setup_restart_button(document: &Document, app: Shared) {
        on_click(document, "restartBtn", move || {
            let mut guard = app.borrow_mut();
            let App { game, platform } = &mut *guard;
            platform.ui.dismiss_modal();
            game.restart(platform);
        });
    }

    fn setup_modal_confirm(document: &Document, app: Shared) {
        on_click(document, MODAL_CONFIRM_ID, move || {
            let mut guard = app.borrow_mut();
            let App { game, platform } = &mut *guard;
            platform.ui.dismiss_modal();
            game.acknowledge(platform);
        });
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App { game, platform } = &mut *guard;
            game.update(time, platform);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless_demo {
    use brickfall::consts::FRAME_MS;
    use brickfall::platform::{HeadlessPlatform, PlatformCall};
    use brickfall::sim::{Game, GamePhase, PauseReason, autopilot};
    use brickfall::{Difficulty, GameError, Settings, Theme, Tuning};

    /// Give up after this many simulated frames (all levels, full clocks)
    const MAX_FRAMES: u64 = 60 * 60 * 30;

    /// Load a JSON file named by an environment variable, if set
    fn config_from_env<T>(
        var: &str,
        parse: impl Fn(&str) -> Result<T, GameError>,
    ) -> Result<Option<T>, Box<dyn std::error::Error>> {
        let Ok(path) = std::env::var(var) else {
            return Ok(None);
        };
        let json = std::fs::read_to_string(&path)?;
        log::info!("Loaded {var} from {path}");
        Ok(Some(parse(&json)?))
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let theme = match args.next() {
            Some(name) => Theme::parse(&name).ok_or(format!("unknown theme: {name}"))?,
            None => Theme::NightSky,
        };
        let difficulty = match args.next() {
            Some(name) => {
                Difficulty::parse(&name).ok_or(format!("unknown difficulty: {name}"))?
            }
            None => Difficulty::Easy,
        };
        let seed = match args.next() {
            Some(s) => s.parse()?,
            None => 2024,
        };

        let settings =
            config_from_env("BRICKFALL_SETTINGS", Settings::from_json)?.unwrap_or_default();
        let tuning = config_from_env("BRICKFALL_TUNING", Tuning::from_json)?.unwrap_or_default();

        let mut game = Game::new(tuning, settings, seed)?;
        let mut platform = HeadlessPlatform::new();
        game.select_theme(theme, &mut platform);
        game.start_game(difficulty, 0, 0.0, &mut platform)?;

        let mut now = 0.0;
        let mut frames = 0u64;
        let mut best_level = 0;
        let mut banked = 0;
        while frames < MAX_FRAMES {
            match game.phase() {
                GamePhase::Menu => break,
                GamePhase::Paused(PauseReason::LifeLost) => game.acknowledge(&mut platform),
                GamePhase::GameOver | GamePhase::LevelComplete => {
                    game.acknowledge(&mut platform);
                    continue;
                }
                GamePhase::Playing | GamePhase::Paused(PauseReason::LevelTransition { .. }) => {}
            }
            best_level = best_level.max(game.state.level);
            game.set_input(autopilot(&game.state));
            now += FRAME_MS;
            game.update(now, &mut platform);
            // A cleared level's score is already in the total
            let session_score = match game.phase() {
                GamePhase::Paused(PauseReason::LevelTransition { .. })
                | GamePhase::LevelComplete => game.state.total_score,
                _ => game.state.total_score + game.state.score,
            };
            banked = banked.max(session_score);
            frames += 1;
        }

        let modals: Vec<_> = platform
            .calls
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Modal(m) => Some(format!("{}: {}", m.title, m.message)),
                _ => None,
            })
            .collect();

        println!("\nBrickfall headless run ({theme}, {difficulty}, seed {seed})");
        println!("  frames:      {frames} ({:.1}s simulated)", now / 1000.0);
        println!("  reached:     level {}", best_level + 1);
        println!("  score:       {banked}");
        println!("  bricks hit:  {}", platform.count(&PlatformCall::HitSound));
        for modal in modals {
            println!("  modal:       {modal}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brickfall (native) starting headless demo...");

    if let Err(e) = headless_demo::run() {
        log::error!("Headless run failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

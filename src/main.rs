//! Canvas Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use canvas_hop::platform;
    use canvas_hop::{Settings, Tuning};
    use canvas_hop::renderer::{RenderState, scene};
    use canvas_hop::sim::{Game, GameKind, InputTracker, LevelSet, Viewport, tick};
    use canvas_hop::ui;

    /// Everything the callbacks share
    struct App {
        game: Game,
        input: InputTracker,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// One tick: snapshot input, advance, draw
        fn frame(&mut self) {
            let snapshot = self
                .input
                .snapshot(self.game.kind(), self.game.viewport());
            tick(&mut self.game, &snapshot);
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene::build(&self.game)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = ui::hud_text(&self.game);

            if let Some(el) = document.get_element_by_id("hud-status") {
                el.set_text_content(Some(&hud.status));
            }

            let Some(overlay_el) = document.get_element_by_id("overlay") else {
                return;
            };
            match hud.overlay {
                Some(overlay) => {
                    let _ = overlay_el.set_attribute("class", "");
                    if let Some(el) = document.get_element_by_id("overlay-title") {
                        el.set_text_content(Some(overlay.title));
                    }
                    if let Some(el) = document.get_element_by_id("overlay-subtitle") {
                        el.set_text_content(Some(overlay.subtitle));
                    }
                    if let Some(el) = document
                        .get_element_by_id("overlay-button")
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    {
                        el.set_text_content(Some(overlay.button_label));
                        let button = ui::restart_button(self.game.viewport());
                        let style = el.style();
                        let _ = style.set_property("left", &format!("{}px", button.x));
                        let _ = style.set_property("top", &format!("{}px", button.y));
                        let _ = style.set_property("width", &format!("{}px", button.w));
                        let _ = style.set_property("height", &format!("{}px", button.h));
                    }
                }
                None => {
                    let _ = overlay_el.set_attribute("class", "hidden");
                }
            }
        }

        /// Follow the window size
        fn resize(&mut self, viewport: Viewport) {
            self.canvas.set_width(viewport.width as u32);
            self.canvas.set_height(viewport.height as u32);
            self.game.resize(viewport);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(viewport.width as u32, viewport.height as u32);
            }
            log::debug!("Canvas resized to {}x{}", viewport.width, viewport.height);
        }

        /// Event position relative to the canvas
        fn canvas_point(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            )
        }
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        platform::canvas_size(w as f32, h as f32)
    }

    fn show_notice(document: &web_sys::Document, message: &str) {
        if let Some(el) = document.get_element_by_id("notice") {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "");
        }
    }

    /// Fetch and validate the level file, falling back to the built-in set
    async fn load_levels(
        settings: &Settings,
        viewport: Viewport,
        document: &web_sys::Document,
    ) -> LevelSet {
        let json = match platform::fetch_text(&settings.levels_url).await {
            Ok(text) => Some(text),
            Err(e) => {
                log::error!("Failed to fetch {}: {:?}", settings.levels_url, e);
                show_notice(
                    document,
                    &format!("Could not load {}; using built-in levels", settings.levels_url),
                );
                None
            }
        };

        let (levels, err) = LevelSet::load_or_builtin(json.as_deref(), viewport);
        if let Some(err) = err {
            show_notice(document, &format!("Level data error: {}; using built-in levels", err));
        }
        log::info!("{} levels ready", levels.len());
        levels
    }

    /// Fetch the optional tuning file; any failure keeps the defaults
    async fn load_tuning(settings: &Settings, document: &web_sys::Document) -> Tuning {
        let Some(url) = settings.tuning_url.as_deref() else {
            return Tuning::default();
        };
        let parsed = match platform::fetch_text(url).await {
            Ok(text) => Tuning::from_json(&text).map_err(|e| e.to_string()),
            Err(e) => Err(format!("{:?}", e)),
        };
        match parsed {
            Ok(tuning) => {
                log::info!("Tuning loaded from {}", url);
                tuning
            }
            Err(e) => {
                log::error!("Tuning file {} unusable: {}", url, e);
                show_notice(document, &format!("Could not use {}; using default tuning", url));
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        if let Some(level) = settings.log_level.to_level() {
            console_log::init_with_level(level).map_err(|e| e.to_string())?;
        }

        log::info!("Canvas Hop starting ({})...", settings.game.as_str());

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;

        let viewport = window_viewport(&window);
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);

        let levels = match settings.game {
            GameKind::Platformer => load_levels(&settings, viewport, &document).await,
            _ => LevelSet::single_floor(),
        };

        let tuning = load_tuning(&settings, &document).await;

        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            viewport.width as u32,
            viewport.height as u32,
        )
        .await
        .map_err(|e| e.to_string())?;

        let app = Rc::new(RefCell::new(App {
            game: Game::with_tuning(settings.game, viewport, seed, levels, &tuning),
            input: InputTracker::new(),
            render_state: Some(render_state),
            canvas: canvas.clone(),
        }));

        setup_input_handlers(&window, &canvas, app.clone());

        if let Some(el) = document.get_element_by_id("loading") {
            let _ = el.set_attribute("class", "hidden");
        }

        request_animation_frame(app);

        log::info!("Canvas Hop running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Keep arrows and space from scrolling the page
                if matches!(key.as_str(), "ArrowLeft" | "ArrowRight" | " ") {
                    event.prevent_default();
                }
                app.borrow_mut().input.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start: touch zones, runner taps and the restart button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut app = app.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let point = app.canvas_point(touch.client_x(), touch.client_y());
                        let App { game, input, .. } = &mut *app;
                        input.touch_start(touch.identifier(), point.x);
                        input.click(point, game);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut app = app.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        app.input.touch_end(touch.identifier());
                    }
                }
            });
            for name in ["touchend", "touchcancel"] {
                let _ = canvas
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Mouse click on the restart button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app.borrow_mut();
                let point = app.canvas_point(event.client_x(), event.client_y());
                let App { game, input, .. } = &mut *app;
                input.click(point, game);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    app.borrow_mut().resize(window_viewport(&window));
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss: keyup events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().input.release_all();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    let result = wasm_game::run().await;
    if let Err(ref e) = result {
        log::error!("Startup failed: {:?}", e);
    }
    result
}

/// Native build: run each game headless with a simple autopilot.
///
/// Takes an optional query-style argument, e.g.
/// `game=runner&seed=7&levels=assets/levels.json&tuning=tuning.json`.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let query = std::env::args().nth(1).unwrap_or_default();
    let settings = canvas_hop::Settings::from_query(&query);
    log::info!("Canvas Hop (native) starting...");
    log::info!("Browser build runs via `trunk serve`; running headless demo");

    let viewport = canvas_hop::platform::canvas_size(1024.0, 768.0);
    let seed = settings.seed.unwrap_or(1);
    let json = std::fs::read_to_string(&settings.levels_url).ok();
    let (levels, err) = canvas_hop::sim::LevelSet::load_or_builtin(json.as_deref(), viewport);
    if let Some(err) = err {
        log::warn!("Level data error: {}", err);
    }

    let tuning = match settings.tuning_url.as_deref().map(std::fs::read_to_string) {
        None => canvas_hop::Tuning::default(),
        Some(Ok(text)) => canvas_hop::Tuning::from_json(&text).unwrap_or_else(|e| {
            log::warn!("Tuning file rejected: {}", e);
            canvas_hop::Tuning::default()
        }),
        Some(Err(e)) => {
            log::warn!("Tuning file unreadable: {}", e);
            canvas_hop::Tuning::default()
        }
    };

    let kinds: Vec<_> = if query.contains("game=") {
        vec![settings.game]
    } else {
        vec![
            canvas_hop::sim::GameKind::Platformer,
            canvas_hop::sim::GameKind::RunnerClassic,
            canvas_hop::sim::GameKind::RunnerSpawner,
        ]
    };
    for kind in kinds {
        demo::run(kind, viewport, seed, levels.clone(), &tuning, 3_000);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use canvas_hop::sim::{Game, GameKind, LevelSet, TickInput, Viewport, tick};
    use canvas_hop::{Tuning, ui};

    /// Jump over anything close ahead; in the platformer walk toward the goal
    fn autopilot(game: &Game) -> TickInput {
        match game {
            Game::Platformer(p) => {
                let target = if p.level.coin.collected {
                    p.level.door.center()
                } else {
                    p.level.coin.rect.center()
                };
                let here = p.player.rect().center();
                TickInput {
                    left: target.x < here.x - 5.0,
                    right: target.x > here.x + 5.0,
                    jump: target.y < here.y - p.player.size.y,
                    ..Default::default()
                }
            }
            Game::Runner(r) => {
                let front = r.player.rect().right();
                let danger = r
                    .obstacles
                    .iter()
                    .any(|o| o.rect.x > front && o.rect.x - front < r.speed * 12.0);
                TickInput {
                    jump: danger,
                    ..Default::default()
                }
            }
        }
    }

    pub fn run(
        kind: GameKind,
        viewport: Viewport,
        seed: u64,
        levels: LevelSet,
        tuning: &Tuning,
        ticks: u32,
    ) {
        let mut game = Game::with_tuning(kind, viewport, seed, levels, tuning);
        let mut frames = 0;
        while frames < ticks && !game.is_terminal() {
            let input = autopilot(&game);
            tick(&mut game, &input);
            frames += 1;
        }

        let hud = ui::hud_text(&game);
        match hud.overlay {
            Some(overlay) => log::info!(
                "{}: {} after {} ticks ({})",
                kind.as_str(),
                overlay.title,
                frames,
                hud.status
            ),
            None => log::info!("{}: still running after {} ticks ({})", kind.as_str(), frames, hud.status),
        }
    }
}

//! Edge Swarm entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

    use edge_swarm::renderer::{HudSnapshot, RenderState, build_scene};
    use edge_swarm::sim::{Arena, GameEvent, GameState, tick};
    use edge_swarm::{InputSignal, PointerEvent, PointerSnapshot, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        render_state: Option<RenderState>,
        /// Shared with the pointer listeners, which write it between frames
        input: Rc<InputSignal>,
        /// Timestamp of the previous frame (ms)
        last_time: f64,
        /// Last HUD shown, to skip redundant DOM writes
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(seed: u64, arena: Arena, tuning: Tuning, start_time: f64) -> Self {
            Self {
                state: GameState::new(seed, arena, tuning.clone()),
                tuning,
                render_state: None,
                input: Rc::new(InputSignal::new(arena.center())),
                last_time: start_time,
                last_hud: None,
            }
        }

        /// Run one simulation tick
        fn update(&mut self, time: f64) -> PointerSnapshot {
            let dt = (time - self.last_time) as f32;
            self.last_time = time;

            let input = self.input.snapshot();
            for event in tick(&mut self.state, &input, dt) {
                if let GameEvent::PlayerDied { kills } = event {
                    log::info!("Game over - {} kills", kills);
                }
            }
            input
        }

        /// Render the current frame
        fn render(&mut self, pointer: PointerSnapshot) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, pointer);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let arena = render_state.arena_size;
                        render_state.resize(w, h, arena);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = HudSnapshot::from_state(&self.state);
            if self.last_hud == Some(hud) {
                return;
            }
            self.last_hud = Some(hud);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hp") {
                el.set_text_content(Some(&hud.health.to_string()));
            }
            if let Some(el) = document.get_element_by_id("kills") {
                el.set_text_content(Some(&hud.kills.to_string()));
            }

            let overlay_class = if hud.dead { "" } else { "hidden" };
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", overlay_class);
                if let Some([title, kills]) = hud.death_banner() {
                    if let Some(title_el) = document.get_element_by_id("game-over-title") {
                        title_el.set_text_content(Some(&title));
                    }
                    if let Some(kills_el) = document.get_element_by_id("final-kills") {
                        kills_el.set_text_content(Some(&kills));
                    }
                }
            }
            if let Some(el) = document.get_element_by_id("restart") {
                let _ = el.set_attribute("class", overlay_class);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            let arena = self.state.arena;
            self.state = GameState::new(seed, arena, self.tuning.clone());
            self.input.reset(arena.center());
            self.last_hud = None;
        }

        /// Track a new viewport size
        fn resize(&mut self, arena: Arena, physical: (u32, u32)) {
            self.state.resize(arena.width, arena.height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(physical.0, physical.1, (arena.width, arena.height));
            }
            log::info!("Arena resized to {}x{}", arena.width, arena.height);
        }
    }

    /// Current viewport in CSS pixels
    fn viewport(window: &Window) -> Arena {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Arena::new(width as f32, height as f32)
    }

    /// Size the canvas backing store for the device pixel ratio; returns the
    /// physical size
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement, arena: Arena) -> (u32, u32) {
        let ratio = window.device_pixel_ratio().max(1.0);
        let width = (arena.width as f64 * ratio) as u32;
        let height = (arena.height as f64 * ratio) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", arena.width));
        let _ = style.set_property("height", &format!("{}px", arena.height));
        (width, height)
    }

    fn now(window: &Window) -> f64 {
        window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Optional balance overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Edge Swarm starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;

        let arena = viewport(&window);
        let (width, height) = fit_canvas(&window, &canvas, arena);

        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, arena, tuning, now(&window))));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (arena.width, arena.height))
                .await
                .map_err(|e| JsValue::from_str(&format!("failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        let input = game.borrow().input.clone();
        setup_input_handlers(&window, input);
        setup_resize_handler(&window, canvas, game.clone());
        setup_restart_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Edge Swarm running!");
        Ok(())
    }

    /// Register a non-passive window listener so handlers may prevent scrolling
    fn add_listener<T: ?Sized + WasmClosure>(window: &Window, name: &str, closure: Closure<T>) {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        if let Err(e) = window.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            log::warn!("Failed to add {} listener: {:?}", name, e);
        }
        closure.forget();
    }

    /// Stop scrolling/zooming over the arena; buttons keep their clicks
    fn suppress_default_on_canvas(event: &web_sys::Event) {
        let on_canvas = event
            .target()
            .is_some_and(|target| target.dyn_ref::<HtmlCanvasElement>().is_some());
        if on_canvas {
            event.prevent_default();
        }
    }

    fn setup_input_handlers(window: &Window, input: Rc<InputSignal>) {
        // Touch start / move: first touch drives the pointer
        for name in ["touchstart", "touchmove"] {
            let input = input.clone();
            let start = name == "touchstart";
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let (x, y) = (touch.client_x() as f32, touch.client_y() as f32);
                    input.publish(if start {
                        PointerEvent::Down { x, y }
                    } else {
                        PointerEvent::Move { x, y }
                    });
                }
                suppress_default_on_canvas(&event);
            });
            add_listener(window, name, closure);
        }

        // Touch end
        {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                input.publish(PointerEvent::Up);
            });
            add_listener(window, "touchend", closure);
        }

        // Mouse down / move (moving the mouse engages too)
        for name in ["mousedown", "mousemove"] {
            let input = input.clone();
            let down = name == "mousedown";
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                input.publish(if down {
                    PointerEvent::Down { x, y }
                } else {
                    PointerEvent::Move { x, y }
                });
                suppress_default_on_canvas(&event);
            });
            add_listener(window, name, closure);
        }

        // Mouse up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                input.publish(PointerEvent::Up);
            });
            add_listener(window, "mouseup", closure);
        }
    }

    fn setup_resize_handler(window: &Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let arena = viewport(&window);
            let physical = fit_canvas(&window, &canvas, arena);
            game.borrow_mut().resize(arena, physical);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
            let pointer = g.update(time);
            g.render(pointer);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Edge Swarm failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;
    use glam::Vec2;

    use edge_swarm::renderer::HudSnapshot;
    use edge_swarm::sim::{Arena, GameEvent, GameState, tick};
    use edge_swarm::{PointerSnapshot, Tuning};

    /// Run a session without a window, steering with a scripted pointer
    #[derive(Debug, Parser)]
    #[command(name = "edge-swarm", version, about)]
    pub struct Args {
        /// RNG seed (random when omitted)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Frames to simulate (stops early on death)
        #[arg(long, default_value_t = 3600)]
        pub frames: u32,
        /// Frame time in milliseconds
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        pub frame_ms: f32,
        #[arg(long, default_value_t = 1280.0)]
        pub width: f32,
        #[arg(long, default_value_t = 720.0)]
        pub height: f32,
        /// JSON file with balance overrides
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    /// Pointer circling the arena centre, always engaged
    fn scripted_pointer(arena: Arena, frame: u32) -> PointerSnapshot {
        let orbit = arena.width.min(arena.height) * 0.3;
        let angle = frame as f32 * 0.02;
        PointerSnapshot::engaged_at(arena.center() + Vec2::from_angle(angle) * orbit)
    }

    pub fn run(args: Args) -> anyhow::Result<HudSnapshot> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        let arena = Arena::new(args.width, args.height);
        anyhow::ensure!(
            arena.width > 0.0 && arena.height > 0.0,
            "arena must have a positive size"
        );

        let mut state = GameState::new(seed, arena, tuning);
        for frame in 0..args.frames {
            let input = scripted_pointer(arena, frame);
            for event in tick(&mut state, &input, args.frame_ms) {
                match event {
                    GameEvent::PlayerDied { kills } => {
                        log::info!("Player died on frame {} with {} kills", frame, kills);
                    }
                    GameEvent::EnemyKilled { id } => log::debug!("frame {}: enemy {} down", frame, id),
                    GameEvent::EnemySpawned { id } => log::debug!("frame {}: enemy {} in", frame, id),
                    GameEvent::ShotFired { .. } => {}
                }
            }
            if !state.player.alive {
                break;
            }
        }

        Ok(HudSnapshot::from_state(&state))
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Edge Swarm (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the playable web version");

    let hud = headless::run(headless::Args::parse())?;
    println!("{}", serde_json::to_string_pretty(&hud)?);
    Ok(())
}

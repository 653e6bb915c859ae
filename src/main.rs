//! Block Breaker entry point
//!
//! The browser build wires DOM events and requestAnimationFrame to the
//! simulation. The native build runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use block_breaker::consts::{ARENA_HEIGHT, ARENA_WIDTH};
    use block_breaker::platform::{
        FrameLoop, FrameOutcome, InputCommand, LoopChange, SurfaceRect, key_command,
        pointer_command,
    };
    use block_breaker::renderer::RenderState;
    use block_breaker::sim::{GameEvent, GameState};
    use block_breaker::ui::{Hud, Overlay};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        frame_loop: FrameLoop,
        render_state: Option<RenderState>,
        /// Pending requestAnimationFrame handle
        pending_frame: Option<i32>,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement) -> Self {
            Self {
                state: GameState::new(seed),
                frame_loop: FrameLoop::new(),
                render_state: None,
                pending_frame: None,
                canvas,
            }
        }

        fn surface_rect(&self) -> SurfaceRect {
            let rect = self.canvas.get_bounding_client_rect();
            SurfaceRect {
                left: rect.left() as f32,
                width: rect.width() as f32,
            }
        }

        /// Render the current frame; skipped until the GPU is ready
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
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

        fn log_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::BrickDestroyed { .. }
                    | GameEvent::PaddleHit { .. }
                    | GameEvent::WallBounce => log::trace!("{:?}", event),
                    _ => log::debug!("{:?}", event),
                }
            }
        }

        /// Update HUD and overlay elements in the DOM
        fn update_shell(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let hud = Hud::from_state(&self.state);
            set_text(&document, "hud-score", &hud.score_text());
            set_text(&document, "hud-lives", &hud.hearts_text());

            let Some(overlay_el) = document.get_element_by_id("overlay") else {
                return;
            };
            match Overlay::for_state(&self.state) {
                None => {
                    let _ = overlay_el.class_list().add_1("hidden");
                }
                Some(overlay) => {
                    let _ = overlay_el.class_list().remove_1("hidden");
                    set_text(&document, "overlay-title", overlay.title);
                    set_text(&document, "overlay-button", overlay.button);
                    set_text(
                        &document,
                        "overlay-score",
                        overlay.score_line.as_deref().unwrap_or(""),
                    );
                    set_text(&document, "overlay-hint", overlay.hint.unwrap_or(""));
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Apply an input command, then start or stop the frame loop to match
    fn handle_command(game: &Rc<RefCell<Game>>, command: InputCommand) {
        let change = {
            let mut g = game.borrow_mut();
            let Some(phase) = command.apply(&mut g.state) else {
                return;
            };
            log::info!("{:?} -> {:?}", command, phase);
            g.frame_loop.sync(phase)
        };

        match change {
            LoopChange::Started => request_animation_frame(game.clone()),
            LoopChange::Stopped => {
                let mut g = game.borrow_mut();
                if let (Some(id), Some(window)) = (g.pending_frame.take(), web_sys::window()) {
                    let _ = window.cancel_animation_frame(id);
                }
                // Final frame for the phase we just entered
                g.render();
            }
            LoopChange::Unchanged => {}
        }

        let mut g = game.borrow_mut();
        g.log_events();
        g.update_shell();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Block Breaker starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element, nothing to draw on");
            return;
        };

        let dpr = window.device_pixel_ratio();
        let width = (ARENA_WIDTH as f64 * dpr) as u32;
        let height = (ARENA_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Input and the title screen work before the GPU is up
        setup_input_handlers(game.clone());
        game.borrow().update_shell();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => {
                let mut g = game.borrow_mut();
                g.render_state = Some(render_state);
                // Initial paint behind the title overlay
                g.render();
            }
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        log::info!("Block Breaker running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Pointer motion anywhere on the page moves the paddle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let surface = game.borrow().surface_rect();
                if let Some(command) = pointer_command(event.client_x() as f32, &surface) {
                    command.apply(&mut game.borrow_mut().state);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = key_command(&event.key()) {
                    handle_command(&game, command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Overlay button
        if let Some(btn) = window
            .document()
            .and_then(|d| d.get_element_by_id("overlay-button"))
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                handle_command(&game, InputCommand::PrimaryAction);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(handle);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            game.borrow_mut().pending_frame = Some(id);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            g.pending_frame = None;
            let g = &mut *g;
            let outcome = g.frame_loop.frame(&mut g.state);
            if outcome != FrameOutcome::Idle {
                g.render();
                g.log_events();
                g.update_shell();
            }
            if outcome == FrameOutcome::Stopped {
                log::info!("Frame loop ended in {:?}", g.state.phase);
            }
            outcome
        };

        // Not rescheduling is how the loop stops
        if outcome == FrameOutcome::Advanced {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Upper bound on frames for the headless demo (five minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_FRAMES: u64 = 5 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_breaker::platform::{FrameLoop, FrameOutcome, autopilot_command};
    use block_breaker::sim::GameState;

    env_logger::init();
    log::info!("Block Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0x5EED);

    let mut state = GameState::new(seed);
    let mut frame_loop = FrameLoop::new();
    state.primary_action();
    frame_loop.sync(state.phase);

    for _ in 0..DEMO_MAX_FRAMES {
        autopilot_command(&state).apply(&mut state);
        let outcome = frame_loop.frame(&mut state);
        for event in state.drain_events() {
            log::debug!("{:?}", event);
        }
        if outcome != FrameOutcome::Advanced {
            break;
        }
    }

    log::info!(
        "Demo finished after {} frames: {:?}, score {}, lives {}, {} bricks left",
        frame_loop.frames(),
        state.phase,
        state.score,
        state.lives,
        state.active_brick_count()
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

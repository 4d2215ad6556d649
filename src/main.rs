//! DodgeBlobs entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, PageTransitionEvent,
        TouchEvent,
    };

    use dodge_blobs::persistence::LocalStorage;
    use dodge_blobs::platform::{PageHide, is_attack_button, pointer_to_physical, viewport_from_client};
    use dodge_blobs::renderer::vertex::{colors, css_color};
    use dodge_blobs::renderer::{RenderState, Scene, TextSlot};
    use dodge_blobs::sim::TickInput;
    use dodge_blobs::{FrameStatus, Session, Tuning};

    /// DOM overlay for HUD text
    struct Hud {
        score: Option<Element>,
        best: Option<Element>,
        status: Option<Element>,
    }

    impl Hud {
        fn new(document: &Document) -> Self {
            Self {
                score: hud_element(document, "hud-score"),
                best: hud_element(document, "hud-best"),
                status: hud_element(document, "hud-status"),
            }
        }

        fn slot(&self, slot: TextSlot) -> Option<&Element> {
            match slot {
                TextSlot::Score => self.score.as_ref(),
                TextSlot::Best => self.best.as_ref(),
                TextSlot::Status => self.status.as_ref(),
            }
        }

        /// Mirror the scene's text items, positioned over the canvas
        fn update(&self, scene: &Scene, canvas: &HtmlCanvasElement) {
            let rect = canvas.get_bounding_client_rect();
            if let Some(el) = &self.status {
                el.set_text_content(None);
            }
            for (slot, pos, size, text) in scene.texts() {
                let Some(el) = self.slot(slot) else { continue };
                // Canvas text is placed by baseline; CSS by top edge
                let left = rect.left() + (pos.x / scene.dpr) as f64;
                let top = rect.top() + ((pos.y - size) / scene.dpr) as f64;
                let style = format!(
                    "position:fixed;left:{left}px;top:{top}px;font:{}px monospace;color:{};pointer-events:none;white-space:pre",
                    size / scene.dpr,
                    css_color(colors::HUD),
                );
                let _ = el.set_attribute("style", &style);
                el.set_text_content(Some(text));
            }
        }
    }

    fn hud_element(document: &Document, id: &str) -> Option<Element> {
        if let Some(el) = document.get_element_by_id(id) {
            return Some(el);
        }
        let el = document.create_element("div").ok()?;
        el.set_id(id);
        document.body()?.append_child(&el).ok()?;
        Some(el)
    }

    /// A registered DOM listener, kept so it can be removed on teardown
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    }

    type Listeners = Rc<RefCell<Vec<Listener>>>;

    fn listen(
        listeners: &Listeners,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        listeners.borrow_mut().push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        render_state: Option<RenderState>,
        input: TickInput,
        canvas: HtmlCanvasElement,
        hud: Hud,
        /// Pending requestAnimationFrame handle
        frame_handle: Option<i32>,
        torn_down: bool,
    }

    impl Game {
        fn is_scheduled(&self) -> bool {
            self.frame_handle.is_some()
        }

        /// Element-local CSS pixels to simulation space
        fn pointer(&self, x: f64, y: f64) -> glam::Vec2 {
            pointer_to_physical(x, y, &self.session.state.viewport)
        }

        fn touch_pointer(&self, event: &TouchEvent) -> Option<glam::Vec2> {
            let touch = event.touches().get(0)?;
            let rect = self.canvas.get_bounding_client_rect();
            Some(self.pointer(
                touch.client_x() as f64 - rect.left(),
                touch.client_y() as f64 - rect.top(),
            ))
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let viewport = viewport_from_client(
                self.canvas.client_width() as f64,
                self.canvas.client_height() as f64,
                window.device_pixel_ratio(),
            );
            let (w, h) = (viewport.width as u32, viewport.height as u32);
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.session.resize(viewport);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(w, h);
            }
            log::debug!("Resized to {}x{} (dpr {})", w, h, viewport.dpr);
        }

        /// Render the current frame and HUD
        fn render(&mut self) {
            let scene = self.session.scene();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.hud.update(&scene, &self.canvas);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("DodgeBlobs starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;

        let viewport = viewport_from_client(
            canvas.client_width() as f64,
            canvas.client_height() as f64,
            window.device_pixel_ratio(),
        );
        let (width, height) = (viewport.width as u32, viewport.height as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, Tuning::default(), viewport, LocalStorage::new());

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state: Some(render_state),
            input: TickInput::default(),
            canvas: canvas.clone(),
            hud: Hud::new(&document),
            frame_handle: None,
            torn_down: false,
        }));

        let listeners: Listeners = Rc::new(RefCell::new(Vec::new()));
        setup_input_handlers(&canvas, &window, &game, &listeners)?;
        setup_teardown(&window, &game, &listeners)?;

        game.borrow_mut().render();
        request_animation_frame(game);

        log::info!("DodgeBlobs running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        window: &web_sys::Window,
        game: &Rc<RefCell<Game>>,
        listeners: &Listeners,
    ) -> Result<(), JsValue> {
        // Mouse move
        {
            let game = game.clone();
            listen(listeners, canvas, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let mut g = game.borrow_mut();
                    let pos = g.pointer(event.offset_x() as f64, event.offset_y() as f64);
                    g.input.pointer = Some(pos);
                }
            })?;
        }

        // Primary mouse button swings
        {
            let game = game.clone();
            listen(listeners, canvas, "mousedown", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    if !is_attack_button(event.button()) {
                        return;
                    }
                    let mut g = game.borrow_mut();
                    let pos = g.pointer(event.offset_x() as f64, event.offset_y() as f64);
                    g.input.pointer = Some(pos);
                    g.input.attack = true;
                }
            })?;
        }

        // Touch start swings
        {
            let game = game.clone();
            listen(listeners, canvas, "touchstart", move |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<TouchEvent>() {
                    let mut g = game.borrow_mut();
                    g.input.attack = true;
                    if let Some(pos) = g.touch_pointer(event) {
                        g.input.pointer = Some(pos);
                    }
                }
            })?;
        }

        // Touch move
        {
            let game = game.clone();
            listen(listeners, canvas, "touchmove", move |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<TouchEvent>() {
                    let mut g = game.borrow_mut();
                    if let Some(pos) = g.touch_pointer(event) {
                        g.input.pointer = Some(pos);
                    }
                }
            })?;
        }

        // Keyboard restart
        {
            let game = game.clone();
            listen(listeners, window, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
                let resume = {
                    let mut g = game.borrow_mut();
                    if g.torn_down || !g.session.key_pressed(&key.code()) {
                        return;
                    }
                    g.input = TickInput::default();
                    !g.is_scheduled()
                };
                event.prevent_default();
                if resume {
                    request_animation_frame(game.clone());
                }
            })?;
        }

        // Resize
        {
            let game = game.clone();
            listen(listeners, window, "resize", move |_event| {
                game.borrow_mut().resize();
            })?;
        }

        Ok(())
    }

    /// Pause the loop when the page is cached, stop it and unhook every
    /// listener when the page goes away
    fn setup_teardown(
        window: &web_sys::Window,
        game: &Rc<RefCell<Game>>,
        listeners: &Listeners,
    ) -> Result<(), JsValue> {
        // Restored from the back/forward cache: pick the loop back up
        {
            let game = game.clone();
            listen(listeners, window, "pageshow", move |event| {
                let persisted = event
                    .dyn_ref::<PageTransitionEvent>()
                    .is_some_and(|e| e.persisted());
                let resume = {
                    let g = game.borrow();
                    persisted && !g.torn_down && !g.is_scheduled() && !g.session.state.is_over()
                };
                if resume {
                    log::info!("Resumed from page cache");
                    request_animation_frame(game.clone());
                }
            })?;
        }

        let game = game.clone();
        // Held by its own entry, so the registry outlives `run`
        let registry = listeners.clone();
        listen(listeners, window, "pagehide", move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            let mut g = game.borrow_mut();
            if g.torn_down {
                return;
            }
            if let (Some(handle), Some(window)) = (g.frame_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
            if PageHide::from_persisted(persisted) == PageHide::Suspend {
                log::info!("Suspended into page cache");
                return;
            }
            g.torn_down = true;
            // Closures stay owned by the registry; this one is still running
            for l in registry.borrow().iter() {
                let _ = l
                    .target
                    .remove_event_listener_with_callback(l.kind, l.callback.as_ref().unchecked_ref());
            }
            log::info!("Torn down");
        })
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let next = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(next, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        let status = {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            if g.torn_down {
                return;
            }
            let input = std::mem::take(&mut g.input);
            let status = g.session.frame(&input);
            g.render();
            status
        };

        match status {
            FrameStatus::Continue => request_animation_frame(game),
            FrameStatus::Halt => log::info!("Loop halted, waiting for restart"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("DodgeBlobs failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("DodgeBlobs (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    headless_run(rand::random(), 3600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one scripted run without a display and report how it went
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, max_frames: u32) {
    use dodge_blobs::persistence::MemoryStore;
    use dodge_blobs::sim::{TickInput, Viewport};
    use dodge_blobs::{FrameStatus, Session, Tuning};
    use glam::Vec2;

    let viewport = Viewport::new(800.0, 600.0, 1.0);
    let mut session = Session::new(seed, Tuning::default(), viewport, MemoryStore::new());

    let mut frames = 0;
    for i in 0..max_frames {
        // Circle the centre and swing outward now and then
        let t = i as f32 * 0.02;
        let input = TickInput {
            pointer: Some(viewport.center() + Vec2::new(t.cos(), t.sin()) * 150.0),
            attack: i % 20 == 0,
        };
        frames = i + 1;
        if session.frame(&input) == FrameStatus::Halt {
            break;
        }
    }

    println!(
        "seed {}: {} frames, score {}, best {}",
        seed,
        frames,
        session.score(),
        session.best()
    );
}

//! Astronaut Journey entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//!
//! The page stacks three canvases of the same size: `sprites` (2D, images),
//! `canvas` (WebGPU, shapes and effects) and `ui` (2D, panels, text and
//! every clickable control, which also receives pointer input).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, MouseEvent,
        TouchEvent,
    };

    use astronaut_journey::assets::{AssetId, AssetProvider};
    use astronaut_journey::audio::AudioManager;
    use astronaut_journey::platform::{FrameThrottle, InputAggregator, Key};
    use astronaut_journey::renderer::frame::{Align, Frame};
    use astronaut_journey::renderer::{RenderState, Viewport, draw};
    use astronaut_journey::sim::{GameEvent, World, tick};
    use astronaut_journey::{QualityPreset, Settings};

    /// Joystick radius in CSS pixels
    const JOYSTICK_RADIUS: f32 = 60.0;

    /// Browser images keyed by asset
    struct Images {
        images: Vec<(AssetId, HtmlImageElement)>,
    }

    impl Images {
        fn load() -> Self {
            let images = AssetId::ALL
                .iter()
                .filter_map(|&id| {
                    let image = HtmlImageElement::new().ok()?;
                    image.set_src(id.path());
                    Some((id, image))
                })
                .collect();
            Self { images }
        }

        fn get(&self, id: AssetId) -> Option<&HtmlImageElement> {
            self.images.iter().find(|(i, _)| *i == id).map(|(_, img)| img)
        }
    }

    impl AssetProvider for Images {
        fn is_ready(&self, id: AssetId) -> bool {
            self.get(id)
                .is_some_and(|img| img.complete() && img.natural_width() > 0)
        }
    }

    fn css_color(color: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0) as u8,
            (color[1] * 255.0) as u8,
            (color[2] * 255.0) as u8,
            color[3]
        )
    }

    /// Game instance holding all state
    struct Game {
        world: World,
        settings: Settings,
        input: InputAggregator,
        throttle: FrameThrottle,
        render_state: Option<RenderState>,
        sprites: CanvasRenderingContext2d,
        ui: CanvasRenderingContext2d,
        ui_canvas: HtmlCanvasElement,
        images: Images,
        audio: AudioManager,
        viewport: Viewport,
        joystick_origin: Option<Vec2>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn tick(&mut self, time: f64) {
            if !self.throttle.ready(time) {
                return;
            }
            self.track_fps(time);

            let input = self.input.take();
            tick(&mut self.world, &input);

            for event in self.world.drain_events() {
                match event {
                    GameEvent::Cue(cue) => self.audio.play(cue),
                    GameEvent::Music(music) => self.audio.set_music(music),
                    GameEvent::SceneChanged { to, .. } => {
                        log::debug!("Now in {}", to.as_str());
                    }
                    GameEvent::GameOver => log::info!("Game over at tick {}", self.world.time_ticks),
                }
            }

            let frame = draw(&self.world, &self.images);
            self.paint_sprites(&frame);
            if let Some(render_state) = &mut self.render_state {
                match render_state.render(&frame.vertices) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.paint_ui(&frame);
            self.input.set_hit_regions(frame.hit_regions);
            self.update_hud();
        }

        fn track_fps(&mut self, time: f64) {
            let oldest = self.frame_times[self.frame_index];
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            if oldest > 0.0 {
                let elapsed = (time - oldest) / 1000.0;
                self.fps = (self.frame_times.len() as f64 / elapsed).round() as u32;
            }
        }

        /// Apply the viewport transform to a 2D context
        fn world_transform(&self, ctx: &CanvasRenderingContext2d) {
            let scale = self.viewport.scale() as f64;
            let offset = self.viewport.offset();
            ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
            ctx.clear_rect(0.0, 0.0, self.viewport.width as f64, self.viewport.height as f64);
            ctx.set_transform(scale, 0.0, 0.0, scale, offset.x as f64, offset.y as f64)
                .ok();
        }

        fn paint_sprites(&self, frame: &Frame) {
            let ctx = &self.sprites;
            self.world_transform(ctx);
            for sprite in &frame.sprites {
                let Some(image) = self.images.get(sprite.asset) else {
                    continue;
                };
                let r = sprite.rect;
                let center = r.center();
                ctx.save();
                ctx.set_global_alpha(sprite.alpha as f64);
                ctx.translate(center.x as f64, center.y as f64).ok();
                ctx.rotate(sprite.rotation as f64).ok();
                if sprite.flip_x {
                    ctx.scale(-1.0, 1.0).ok();
                }
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    -(r.size.x as f64) / 2.0,
                    -(r.size.y as f64) / 2.0,
                    r.size.x as f64,
                    r.size.y as f64,
                )
                .ok();
                ctx.restore();
            }
        }

        fn paint_ui(&self, frame: &Frame) {
            let ctx = &self.ui;
            self.world_transform(ctx);
            for panel in &frame.panels {
                let r = panel.rect;
                ctx.set_fill_style_str(&css_color(panel.color));
                ctx.fill_rect(r.pos.x as f64, r.pos.y as f64, r.size.x as f64, r.size.y as f64);
            }
            ctx.set_text_baseline("middle");
            for label in &frame.labels {
                ctx.set_font(&format!("{}px sans-serif", label.size));
                ctx.set_text_align(match label.align {
                    Align::Left => "left",
                    Align::Center => "center",
                });
                ctx.set_fill_style_str(&css_color(label.color));
                ctx.fill_text(&label.text, label.pos.x as f64, label.pos.y as f64)
                    .ok();
            }
            if self.settings.show_fps {
                ctx.set_text_align("left");
                ctx.set_font("12px monospace");
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
                ctx.fill_text(&format!("{} fps", self.fps), 940.0, 14.0).ok();
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("scene-name") {
                el.set_text_content(Some(self.world.scene_kind().as_str()));
            }
        }

        /// CSS pixel on the ui canvas to world units
        fn css_to_world(&self, x: f32, y: f32) -> Vec2 {
            let css = Viewport::new(
                self.ui_canvas.client_width().max(1) as u32,
                self.ui_canvas.client_height().max(1) as u32,
            );
            css.screen_to_world(Vec2::new(x, y))
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.viewport = Viewport::new(width, height);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    fn canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{id} is not a canvas")))
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
        canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("not a 2d context"))
    }

    /// Match backing store to CSS size times device pixel ratio
    fn fit(canvas: &HtmlCanvasElement, dpr: f64) -> (u32, u32) {
        let width = (canvas.client_width() as f64 * dpr).max(1.0) as u32;
        let height = (canvas.client_height() as f64 * dpr).max(1.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Astronaut Journey starting...");
        if let Err(e) = start().await {
            log::error!("Startup failed: {:?}", e);
        }
    }

    async fn start() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let gpu_canvas = canvas(&document, "canvas")?;
        let sprite_canvas = canvas(&document, "sprites")?;
        let ui_canvas = canvas(&document, "ui")?;

        let dpr = window.device_pixel_ratio();
        let (width, height) = fit(&gpu_canvas, dpr);
        fit(&sprite_canvas, dpr);
        fit(&ui_canvas, dpr);

        let navigator = window.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();
        let quality = QualityPreset::detect(&user_agent, navigator.max_touch_points().max(0) as u32);
        let settings = Settings::from_preset(quality);
        log::info!("Quality preset: {}", quality.as_str());

        let seed = js_sys::Date::now() as u64;
        let world = World::with_config(
            seed,
            Default::default(),
            quality,
            astronaut_journey::sim::quiz::default_bank(),
        );
        log::info!("Game initialized with seed: {}", seed);

        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let game = Rc::new(RefCell::new(Game {
            world,
            throttle: FrameThrottle::from_settings(&settings),
            settings,
            input: InputAggregator::new(),
            render_state: None,
            sprites: context_2d(&sprite_canvas)?,
            ui: context_2d(&ui_canvas)?,
            ui_canvas: ui_canvas.clone(),
            images: Images::load(),
            audio,
            viewport: Viewport::new(width, height),
            joystick_origin: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(gpu_canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(game.clone())?;
        setup_pointer(&ui_canvas, game.clone());
        setup_touch(&ui_canvas, game.clone());
        setup_resize(game.clone(), [gpu_canvas, sprite_canvas, ui_canvas])?;
        setup_focus(game.clone(), &document)?;

        request_animation_frame(game);
        log::info!("Astronaut Journey running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(key) = Key::from_dom(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.input.key_down(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.audio.resume();
            let point = g.css_to_world(event.offset_x() as f32, event.offset_y() as f32);
            if let Some(action) = g.input.click(point) {
                log::debug!("Clicked {:?}", action);
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Left half of the screen is a floating joystick; taps elsewhere click
    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
            let touch = event.changed_touches().get(0)?;
            let rect = canvas.get_bounding_client_rect();
            Some(Vec2::new(
                touch.client_x() as f32 - rect.left() as f32,
                touch.client_y() as f32 - rect.top() as f32,
            ))
        }

        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(point) = touch_point(&target, &event) else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.audio.resume();
                if point.x < target.client_width() as f32 / 2.0 {
                    g.joystick_origin = Some(point);
                } else {
                    let world = g.css_to_world(point.x, point.y);
                    g.input.click(world);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(point) = touch_point(&target, &event) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if let Some(origin) = g.joystick_origin {
                    g.input.set_joystick((point - origin) / JOYSTICK_RADIUS);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.joystick_origin = None;
                g.input.release_joystick();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>, canvases: [HtmlCanvasElement; 3]) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let mut size = (1, 1);
            for canvas in &canvases {
                size = fit(canvas, dpr);
            }
            game.borrow_mut().resize(size.0, size.1);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Drop held keys when the page loses focus so the astronaut stops
    fn setup_focus(game: Rc<RefCell<Game>>, document: &Document) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                    // Don't replay the time spent hidden
                    game.borrow_mut().throttle.reset();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
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
        game.borrow_mut().tick(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run: a scripted pilot plays the opening and the log shows the
/// scene flow. Usage: `astronaut-journey [seed] [ticks]`; set
/// `ASTRONAUT_TUNING` to a JSON file to override balance values and
/// `ASTRONAUT_QUALITY` to `low` for the low-power particle caps.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use astronaut_journey::sim::quiz::default_bank;
    use astronaut_journey::sim::{GameEvent, Scene, TickInput, World, tick};
    use astronaut_journey::{QualityPreset, Tuning};

    env_logger::init();
    log::info!("Astronaut Journey (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    let tuning = match std::env::var("ASTRONAUT_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(
            |json| Tuning::from_json(&json).map_err(|e| e.to_string()),
        ) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let quality = std::env::var("ASTRONAUT_QUALITY")
        .ok()
        .and_then(|s| QualityPreset::parse(&s))
        .unwrap_or_default();
    log::info!("Quality preset: {}", quality.as_str());

    let mut world = World::with_config(seed, tuning, quality, default_bank());
    let mut flow = vec![serde_json::json!({ "tick": 0, "scene": world.scene_kind() })];

    for _ in 0..ticks {
        // Float toward the docked ship's beam, otherwise drift
        let mut input = TickInput::default();
        if let Scene::Main(main) = &world.scene {
            if main.ship.beam_active {
                let to_beam = main.ship.beam_origin() - world.player.center();
                input.movement = to_beam.normalize_or_zero();
            }
        }
        tick(&mut world, &input);

        for event in world.drain_events() {
            match event {
                GameEvent::SceneChanged { to, .. } => {
                    flow.push(serde_json::json!({ "tick": world.time_ticks, "scene": to }));
                }
                GameEvent::GameOver => {
                    flow.push(serde_json::json!({ "tick": world.time_ticks, "game_over": true }));
                }
                GameEvent::Cue(_) | GameEvent::Music(_) => {}
            }
        }
        if world.is_terminal() {
            break;
        }
    }

    let summary = serde_json::json!({
        "seed": seed,
        "ticks": world.time_ticks,
        "final_scene": world.scene_kind(),
        "flow": flow,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => log::error!("Could not format summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

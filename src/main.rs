//! Dropli entry point
//!
//! On the web this wires canvas input and timers into the scene's event
//! queue and paints the blobs every animation frame. Natively it runs a
//! short headless session and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::Clamped;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, KeyboardEvent, MouseEvent};

    use dropli::consts::*;
    use dropli::sim::{PhysicsParams, Scene, SceneEvent};
    use dropli::visualizer::{Rgba, Visualizer, as_bytes};
    use dropli::{Palette, Settings};

    const LIGHT_BACKGROUND: &str = "#f0f0f5";
    const DARK_BACKGROUND: &str = "#16161d";

    /// Optional palette preview painted next to the playground
    struct Preview {
        ctx: CanvasRenderingContext2d,
        visualizer: Visualizer,
        pixels: Vec<Rgba>,
    }

    /// App instance holding all state
    struct App {
        scene: Scene,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        preview: Option<Preview>,
    }

    impl App {
        fn resize_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = self.canvas.client_width() as f64;
            let height = self.canvas.client_height() as f64;
            self.canvas.set_width((width * dpr) as u32);
            self.canvas.set_height((height * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

            self.scene.push(SceneEvent::Resize {
                width: width as f32,
                height: height as f32,
            });
        }

        fn render(&mut self) {
            let width = self.canvas.client_width() as f64;
            let height = self.canvas.client_height() as f64;
            let background = if self.settings.dark_mode {
                DARK_BACKGROUND
            } else {
                LIGHT_BACKGROUND
            };
            self.ctx.set_fill_style_str(background);
            self.ctx.fill_rect(0.0, 0.0, width, height);

            for body in self.scene.registry().iter() {
                let scale = body.render_scale();
                self.ctx.set_fill_style_str(&body.color_hsl);
                self.ctx.begin_path();
                let _ = self.ctx.ellipse(
                    body.pos.x as f64,
                    body.pos.y as f64,
                    (body.radius * scale.x) as f64,
                    (body.radius * scale.y) as f64,
                    0.0,
                    0.0,
                    TAU,
                );
                self.ctx.fill();
            }

            if let Some(preview) = self.preview.as_mut() {
                preview.visualizer.update();
                preview.visualizer.render(&mut preview.pixels);
                let (w, h) = preview.visualizer.size();
                match ImageData::new_with_u8_clamped_array_and_sh(
                    Clamped(as_bytes(&preview.pixels)),
                    w as u32,
                    h as u32,
                ) {
                    Ok(image) => {
                        let _ = preview.ctx.put_image_data(&image, 0.0, 0.0);
                    }
                    Err(e) => log::warn!("Preview paint failed: {:?}", e),
                }
            }
        }

        /// Push the current palette to the preview and persist the count
        fn palette_changed(&mut self) {
            if let Some(preview) = self.preview.as_mut() {
                preview.visualizer.set_colors(Some(self.scene.palette().rgb()));
            }
            self.settings.blob_count = self.scene.blob_count();
            self.settings.save();
        }

        fn handle_key(&mut self, key: &str) {
            match key {
                "Enter" => {
                    self.scene.push(SceneEvent::Regenerate);
                    self.scene.pump();
                    self.palette_changed();
                }
                "+" | "=" | "-" => {
                    let count = if key == "-" {
                        self.scene.blob_count().saturating_sub(1)
                    } else {
                        self.scene.blob_count() + 1
                    };
                    self.scene.push(SceneEvent::SetBlobCount(count));
                    self.scene.pump();
                    self.palette_changed();
                }
                "s" | "S" => {
                    self.settings.panel_open = !self.settings.panel_open;
                    self.scene.push(SceneEvent::SetPanelOpen(self.settings.panel_open));
                    self.settings.save();
                }
                "d" | "D" => {
                    self.settings.dark_mode = !self.settings.dark_mode;
                    self.settings.save();
                }
                _ => {}
            }
        }
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Option<T> {
        APP.with(|slot| slot.borrow().as_ref().map(|app| f(&mut app.borrow_mut())))
    }

    /// Recolor the blobs from a JSON array of hex strings
    #[wasm_bindgen]
    pub fn apply_palette(json: &str) -> Result<(), JsValue> {
        let palette = Palette::from_json_list(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        with_app(|app| {
            app.scene.push(SceneEvent::ApplyPalette(palette.colors));
            app.scene.pump();
            app.palette_changed();
        });
        Ok(())
    }

    /// Current blob colors, sorted for saving, as a JSON array
    #[wasm_bindgen]
    pub fn current_palette() -> String {
        with_app(|app| app.scene.palette().normalized().to_json_list()).unwrap_or_else(|| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn set_blob_count(count: usize) {
        with_app(|app| {
            app.scene.push(SceneEvent::SetBlobCount(count));
            app.scene.pump();
            app.palette_changed();
        });
    }

    #[wasm_bindgen]
    pub fn mark_tutorial_seen() {
        with_app(|app| {
            app.settings.tutorial_seen = true;
            app.settings.save();
        });
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas.get_context("2d").ok()??.dyn_into().ok()
    }

    fn canvas_by_id(document: &web_sys::Document, id: &str) -> Option<HtmlCanvasElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dropli starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas = canvas_by_id(&document, "canvas").ok_or("no canvas")?;
        let ctx = context_2d(&canvas).ok_or("no 2d context")?;

        let preview = canvas_by_id(&document, "visualizer").and_then(|preview_canvas| {
            let ctx = context_2d(&preview_canvas)?;
            let w = preview_canvas.width() as usize;
            let h = preview_canvas.height() as usize;
            Some(Preview {
                ctx,
                visualizer: Visualizer::new(w, h, js_sys::Date::now() as u64),
                pixels: Vec::with_capacity(w * h),
            })
        });

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut scene = Scene::new(seed, PhysicsParams::default()).with_blob_count(settings.clamped_blob_count());
        scene.push(SceneEvent::SetPanelOpen(settings.panel_open));

        let app = Rc::new(RefCell::new(App {
            scene,
            settings,
            canvas: canvas.clone(),
            ctx,
            preview,
        }));
        {
            let mut a = app.borrow_mut();
            a.resize_canvas();
            a.scene.pump();
            a.palette_changed();
        }
        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        log::info!("Scene initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone())?;
        setup_timers(app.clone())?;

        request_animation_frame(app);

        log::info!("Dropli running!");
        Ok(())
    }

    fn pointer(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn listen<F>(target: &web_sys::EventTarget, name: &str, app: &Rc<RefCell<App>>, f: F) -> Result<(), JsValue>
    where
        F: Fn(&mut App, web_sys::Event) + 'static,
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            f(&mut app.borrow_mut(), event);
        });
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn mouse_pointer(event: &web_sys::Event) -> Option<Vec2> {
        event.dyn_ref::<MouseEvent>().map(pointer)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        listen(canvas, "mousedown", &app, |a, event| {
            if let Some(p) = mouse_pointer(&event) {
                a.scene.push(SceneEvent::PointerDown(p));
            }
        })?;
        listen(canvas, "mousemove", &app, |a, event| {
            if let Some(p) = mouse_pointer(&event) {
                a.scene.push(SceneEvent::PointerMove(p));
            }
        })?;
        listen(canvas, "mouseup", &app, |a, _event| {
            a.scene.push(SceneEvent::PointerUp);
        })?;
        listen(canvas, "mouseleave", &app, |a, _event| {
            a.scene.push(SceneEvent::PointerLeave);
        })?;
        listen(canvas, "click", &app, |a, event| {
            if let Some(p) = mouse_pointer(&event) {
                a.scene.push(SceneEvent::Click(p));
            }
        })?;

        let window = web_sys::window().ok_or("no window")?;
        listen(&window, "resize", &app, |a, _event| {
            a.resize_canvas();
        })?;
        listen(&window, "keydown", &app, |a, event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                a.handle_key(&key.key());
            }
        })?;
        Ok(())
    }

    fn setup_timers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().scene.push(SceneEvent::Entropy);
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ENTROPY_INTERVAL_MS,
        )?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.scene.push(SceneEvent::Tick);
            a.scene.pump();
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dropli::sim::{PhysicsParams, Scene, SceneEvent};
    use dropli::visualizer::Visualizer;

    env_logger::init();
    log::info!("Dropli (native) starting...");
    log::info!("The playground needs a browser - run with `trunk serve` for the web version");

    // Headless session: a 60 fps minute with the entropy timer firing every 3s
    // dropli [seed] [physics.json]
    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let params = args.get(2).map_or_else(PhysicsParams::default, |path| load_params(path));
    let mut scene = Scene::new(seed, params);
    scene.push(SceneEvent::Resize {
        width: 1280.0,
        height: 720.0,
    });

    let ticks_per_entropy = (dropli::consts::ENTROPY_INTERVAL_MS as u64 * 60) / 1000;
    let mut contacts = 0;
    let mut wall_hits = 0;
    for frame in 1..=3600u64 {
        if frame % ticks_per_entropy == 0 {
            scene.push(SceneEvent::Entropy);
        }
        scene.push(SceneEvent::Tick);
        scene.pump();
        contacts += scene.last_stats().contacts;
        wall_hits += scene.last_stats().wall_hits;
    }
    log::info!(
        "Seed {}: {} ticks, {} wall hits, {} contacts",
        seed,
        scene.ticks(),
        wall_hits,
        contacts
    );

    let palette = scene.palette().normalized();
    println!("{}", palette.to_json_list());

    let mut visualizer = Visualizer::new(320, 200, seed);
    visualizer.set_colors(Some(palette.rgb()));
    let mut pixels = Vec::new();
    visualizer.update();
    visualizer.render(&mut pixels);
    log::info!("Rendered {}-pixel preview", pixels.len());
}

/// Physics overrides from a JSON file; defaults if it can't be read or parsed
#[cfg(not(target_arch = "wasm32"))]
fn load_params(path: &str) -> dropli::sim::PhysicsParams {
    use dropli::sim::PhysicsParams;

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Can't read {}: {}, using default physics", path, e);
            return PhysicsParams::default();
        }
    };
    match PhysicsParams::from_json(&json) {
        Ok(params) => {
            log::info!("Loaded physics overrides from {}", path);
            params
        }
        Err(e) => {
            log::warn!("Bad physics JSON in {}: {}, using defaults", path, e);
            PhysicsParams::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

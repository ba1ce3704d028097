// Browser binding: mounts a particle field on a canvas, sizes it to the
// window and drives it from requestAnimationFrame until torn down.

use crate::color;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::surface::CanvasSurface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

struct Scene {
    field: ParticleField,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
}

impl Scene {
    fn tick(&mut self) {
        self.field.tick(&mut self.surface);
    }

    // Canvas follows the window; the field only learns the new bounds
    fn fit_to(&mut self, window: &Window) -> Result<(), JsValue> {
        let (width, height) = window_size(window)?;
        self.field.resize(width, height)?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        Ok(())
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    frame: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    // Count defaults to 80 and palette to the Zoul colors when omitted
    pub fn mount(
        canvas_id: &str,
        count: Option<i32>,
        palette: Option<js_sys::Array>,
    ) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("window has no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| format!("no element with id {:?}", canvas_id))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| format!("element {:?} is not a canvas", canvas_id))?;
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (width, height) = window_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let mut config = FieldConfig::default().with_size(width, height);
        if let Some(count) = count {
            if count <= 0 {
                return Err(FieldError::invalid("particle count must be positive").into());
            }
            config = config.with_count(count as usize);
        }
        if let Some(palette) = palette {
            config = config.with_palette(palette_from_js(&palette)?);
        }
        let field = ParticleField::new(config)?;

        let scene = Rc::new(RefCell::new(Scene {
            field,
            surface: CanvasSurface::new(context),
            canvas,
        }));
        let mut background = ParticleBackground {
            window,
            scene,
            frame: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
            on_resize: None,
        };
        background.listen_for_resize()?;
        background.start()?;
        Ok(background)
    }

    // Re-reads the window size; also called automatically on window resize
    pub fn resize(&self) -> Result<(), JsValue> {
        self.scene.borrow_mut().fit_to(&self.window)
    }

    // Draws one frame immediately, for hosts that run their own clock
    pub fn tick(&self) {
        self.scene.borrow_mut().tick();
    }

    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.len()
    }

    pub fn is_running(&self) -> bool {
        self.frame_handle.get().is_some()
    }

    pub fn teardown(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            // Cancelling an already fired frame is harmless
            let _ = self.window.cancel_animation_frame(handle);
        }
        self.frame.borrow_mut().take();
        if let Some(on_resize) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
    }
}

impl ParticleBackground {
    fn start(&mut self) -> Result<(), JsValue> {
        let scene = self.scene.clone();
        let window = self.window.clone();
        let handle = self.frame_handle.clone();
        let next_frame = self.frame.clone();
        let callback = Closure::wrap(Box::new(move || {
            handle.set(None);
            scene.borrow_mut().tick();
            if let Some(callback) = next_frame.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(e) => crate::log!("particle background stopped: {:?}", e),
                }
            }
        }) as Box<dyn FnMut()>);

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.frame_handle.set(Some(id));
        *self.frame.borrow_mut() = Some(callback);
        Ok(())
    }

    fn listen_for_resize(&mut self) -> Result<(), JsValue> {
        let scene = self.scene.clone();
        let window = self.window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Err(e) = scene.borrow_mut().fit_to(&window) {
                crate::log!("ignoring resize: {:?}", e);
            }
        }) as Box<dyn FnMut()>);
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        self.on_resize = Some(on_resize);
        Ok(())
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn window_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok((width, height))
}

fn palette_from_js(palette: &js_sys::Array) -> Result<Vec<color::Color>, JsValue> {
    let tokens = palette
        .iter()
        .map(|value| {
            value
                .as_string()
                .ok_or_else(|| FieldError::invalid("palette entries must be strings"))
        })
        .collect::<Result<Vec<String>, FieldError>>()?;
    Ok(color::parse_palette(&tokens[..])?)
}

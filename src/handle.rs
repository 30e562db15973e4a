use anyhow::Context;
use demo_core::{preset, Controller, InputEvent, ReseedConfig, Stopwatch, Value};
use glam::Vec3;
use js_sys::{Array, Float32Array, Function, Object};
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::convert::{color_from_js, js_error, panel_to_array, uniforms_to_object, value_to_js};
use crate::dom;
use crate::input::normalize_key;

fn build(name: &str, seed: Option<u64>) -> anyhow::Result<Controller> {
    let mut spec = preset(name)?;
    spec.seed = seed;
    Controller::new(spec).with_context(|| format!("building demo `{name}`"))
}

/// One demo's uniform table, driven from the page's animation loop.
#[wasm_bindgen]
pub struct DemoHandle {
    controller: Controller,
    watch: Stopwatch,
    /// Set once the host drives frames with `tick_now`; input is then
    /// stamped with the stopwatch instead of the last tick.
    wall_clock: bool,
}

#[wasm_bindgen]
impl DemoHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<DemoHandle, JsValue> {
        Self::create(preset, None)
    }

    /// Same as `new`, with reproducible particle draws.
    pub fn seeded(preset: &str, seed: u32) -> Result<DemoHandle, JsValue> {
        Self::create(preset, Some(u64::from(seed)))
    }

    pub fn name(&self) -> String {
        self.controller.name().to_string()
    }

    pub fn mode(&self) -> String {
        self.controller.mode().name().to_string()
    }

    /// Advance to `elapsed` seconds and return `{uniformName: value}`.
    pub fn tick(&mut self, elapsed: f32) -> Result<Object, JsValue> {
        self.wall_clock = false;
        uniforms_to_object(self.controller.tick(elapsed))
    }

    /// Advance using the handle's own wall clock.
    pub fn tick_now(&mut self) -> Result<Object, JsValue> {
        self.wall_clock = true;
        uniforms_to_object(self.controller.tick(self.watch.elapsed_secs()))
    }

    /// Current value of one uniform, or `undefined`.
    pub fn uniform(&self, name: &str) -> JsValue {
        self.controller
            .uniforms()
            .get(name)
            .map(|v| value_to_js(&v))
            .unwrap_or(JsValue::UNDEFINED)
    }

    pub fn click_hit(&mut self, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.input(InputEvent::Click {
            hit: Some(Vec3::new(x, y, z)),
        })
    }

    pub fn click_miss(&mut self) -> Result<(), JsValue> {
        self.input(InputEvent::Click { hit: None })
    }

    pub fn key(&mut self, code: &str) -> Result<(), JsValue> {
        self.input(InputEvent::Key(normalize_key(code)))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.input(InputEvent::Resize { width, height })
    }

    /// Sync the canvas backing store to its CSS size and report the new resolution.
    pub fn fit_canvas(&mut self, canvas: &web::HtmlCanvasElement) -> Result<(), JsValue> {
        let (width, height) = dom::sync_canvas_backing_size(canvas);
        self.resize(width, height)
    }

    pub fn set_scalar(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        self.set(name, Value::Scalar(value))
    }

    pub fn set_vec3(&mut self, name: &str, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.set(name, Value::Vec3(Vec3::new(x, y, z)))
    }

    /// Accepts a packed `0xRRGGBB` number or a `#rrggbb` string.
    pub fn set_color(&mut self, name: &str, color: JsValue) -> Result<(), JsValue> {
        let value = color_from_js(&color).map_err(js_error)?;
        self.set(name, value)
    }

    pub fn panel(&self) -> Result<Array, JsValue> {
        panel_to_array(&self.controller.panel())
    }

    /// `callback(name, value)` runs after every accepted panel update.
    pub fn on_change(&mut self, callback: Function) {
        self.controller.on_change(move |name, value| {
            let name = JsValue::from_str(name);
            if let Err(e) = callback.call2(&JsValue::NULL, &name, &value_to_js(value)) {
                log::warn!("[web] change listener threw: {:?}", e);
            }
        });
    }

    pub fn reseed(&mut self, count: u32, seed: Option<u32>) -> Result<(), JsValue> {
        let config = match seed {
            Some(s) => ReseedConfig::seeded(count as usize, u64::from(s)),
            None => ReseedConfig::new(count as usize),
        };
        self.controller
            .reseed(config)
            .map_err(|e| js_error(e.into()))
    }

    pub fn generation(&self) -> f64 {
        self.controller.generation() as f64
    }

    pub fn particle_count(&self) -> u32 {
        self.controller.particle_count() as u32
    }

    /// Interleaved `[x, y, z, opacity, r, g, b, life, vx, vy, vz, pad]` per particle.
    pub fn particle_vertices(&self) -> Float32Array {
        let vertices = self.controller.particle_vertices();
        Float32Array::from(bytemuck::cast_slice::<_, f32>(&vertices))
    }

    /// Trail positions newest first, three floats each; empty for other demos.
    pub fn trail_positions(&self) -> Float32Array {
        let flat: Vec<f32> = self
            .controller
            .trail()
            .map(|t| t.ordered_positions().flat_map(|p| p.to_array()).collect())
            .unwrap_or_default();
        Float32Array::from(&flat[..])
    }

    pub fn trail_opacities(&self) -> Float32Array {
        let opacity = self
            .controller
            .trail()
            .map(|t| t.opacities())
            .unwrap_or_default();
        Float32Array::from(&opacity[..])
    }
}

impl DemoHandle {
    fn create(preset: &str, seed: Option<u64>) -> Result<DemoHandle, JsValue> {
        let controller = build(preset, seed).map_err(js_error)?;
        Ok(DemoHandle {
            controller,
            watch: Stopwatch::start(),
            wall_clock: false,
        })
    }

    fn input(&mut self, event: InputEvent) -> Result<(), JsValue> {
        let now = if self.wall_clock {
            self.watch.elapsed_secs()
        } else {
            self.controller.elapsed()
        };
        self.controller
            .handle_at(event, now)
            .map_err(|e| js_error(e.into()))
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsValue> {
        self.controller
            .set_static(name, value)
            .with_context(|| format!("panel update on `{}`", self.controller.name()))
            .map_err(js_error)
    }
}

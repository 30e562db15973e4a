use anyhow::{anyhow, Context};
use demo_core::{InputEvent, MaterialKind, Shape, Showcase, Stopwatch, Value};
use glam::Vec3;
use js_sys::{Array, Function, Object};
use wasm_bindgen::prelude::*;

use crate::convert::{
    color_from_js, geometry_to_object, js_error, panel_to_array, staging_to_object,
    uniforms_to_object, value_to_js,
};
use crate::input::normalize_key;

/// Material showcase: one mesh, three switchable shader materials.
#[wasm_bindgen]
pub struct ShowcaseHandle {
    showcase: Showcase,
    watch: Stopwatch,
    /// Set once the host drives frames with `tick_now`; input is then
    /// stamped with the stopwatch instead of the last tick.
    wall_clock: bool,
}

#[wasm_bindgen]
impl ShowcaseHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ShowcaseHandle, JsValue> {
        let showcase = Showcase::new()
            .context("building material showcase")
            .map_err(js_error)?;
        Ok(ShowcaseHandle {
            showcase,
            watch: Stopwatch::start(),
            wall_clock: false,
        })
    }

    pub fn shape(&self) -> String {
        self.showcase.shape().name().to_string()
    }

    pub fn set_shape(&mut self, name: &str) -> Result<(), JsValue> {
        let shape = Shape::from_name(name)
            .ok_or_else(|| anyhow!("unknown shape `{name}`"))
            .map_err(js_error)?;
        self.showcase.set_shape(shape);
        Ok(())
    }

    /// Mesh parameters for the current shape.
    pub fn geometry(&self) -> Result<Object, JsValue> {
        geometry_to_object(self.showcase.geometry())
    }

    /// Camera projection, camera position and mesh rotation.
    pub fn staging(&self) -> Result<Object, JsValue> {
        staging_to_object(self.showcase.staging())
    }

    pub fn material(&self) -> String {
        self.showcase.material().name().to_string()
    }

    pub fn set_material(&mut self, name: &str) -> Result<(), JsValue> {
        let material = MaterialKind::from_name(name)
            .ok_or_else(|| anyhow!("unknown material `{name}`"))
            .map_err(js_error)?;
        self.showcase.set_material(material);
        Ok(())
    }

    /// Uniforms of the active material after advancing it to `elapsed`.
    pub fn tick(&mut self, elapsed: f32) -> Result<Object, JsValue> {
        self.wall_clock = false;
        uniforms_to_object(self.showcase.tick(elapsed))
    }

    pub fn tick_now(&mut self) -> Result<Object, JsValue> {
        self.wall_clock = true;
        uniforms_to_object(self.showcase.tick(self.watch.elapsed_secs()))
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

    pub fn set_scalar(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        self.set(name, Value::Scalar(value))
    }

    pub fn set_vec3(&mut self, name: &str, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.set(name, Value::Vec3(Vec3::new(x, y, z)))
    }

    pub fn set_color(&mut self, name: &str, color: JsValue) -> Result<(), JsValue> {
        let value = color_from_js(&color).map_err(js_error)?;
        self.set(name, value)
    }

    pub fn panel(&self) -> Result<Array, JsValue> {
        panel_to_array(&self.showcase.active().panel())
    }

    pub fn on_change(&mut self, callback: Function) {
        self.showcase.on_change(move |name, value| {
            let name = JsValue::from_str(name);
            if let Err(e) = callback.call2(&JsValue::NULL, &name, &value_to_js(value)) {
                log::warn!("[web] change listener threw: {:?}", e);
            }
        });
    }
}

impl ShowcaseHandle {
    fn input(&mut self, event: InputEvent) -> Result<(), JsValue> {
        let now = if self.wall_clock {
            self.watch.elapsed_secs()
        } else {
            self.showcase.active().elapsed()
        };
        self.showcase
            .handle_at(event, now)
            .map_err(|e| js_error(e.into()))
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsValue> {
        let material = self.showcase.material().name();
        self.showcase
            .set_static(name, value)
            .with_context(|| format!("panel update on material `{material}`"))
            .map_err(js_error)
    }
}

//! Conversions between controller values and plain JS objects.

use anyhow::{anyhow, Context};
use demo_core::{Color, Geometry, PanelEntry, Staging, Uniforms, Value, ValueKind};
use js_sys::{Array, Float32Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::input::{hex_from_number, parse_hex_color};

/// Scalars become numbers; vectors and colours become `Float32Array`s.
pub fn value_to_js(value: &Value) -> JsValue {
    match value {
        Value::Scalar(v) => JsValue::from_f64(f64::from(*v)),
        other => Float32Array::from(&other.components()[..]).into(),
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn set_num(target: &Object, key: &str, value: f64) -> Result<(), JsValue> {
    set(target, key, &JsValue::from_f64(value))
}

pub fn uniforms_to_object(uniforms: &Uniforms) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (name, value) in uniforms.iter() {
        set(&obj, name, &value_to_js(&value))?;
    }
    Ok(obj)
}

fn kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Scalar => "scalar",
        ValueKind::Vec2 => "vec2",
        ValueKind::Vec3 => "vec3",
        ValueKind::Color => "color",
    }
}

/// Rows of `{name, kind, value, min?, max?, step?}`; colours are packed `0xRRGGBB`.
pub fn panel_to_array(entries: &[PanelEntry]) -> Result<Array, JsValue> {
    let rows = Array::new();
    for entry in entries {
        let row = Object::new();
        set(&row, "name", &JsValue::from_str(&entry.name))?;
        set(&row, "kind", &JsValue::from_str(kind_name(entry.kind())))?;
        let value = match entry.value {
            Value::Color(c) => JsValue::from_f64(f64::from(c.to_hex())),
            ref v => value_to_js(v),
        };
        set(&row, "value", &value)?;
        if let Some(range) = entry.range {
            set_num(&row, "min", f64::from(range.min))?;
            set_num(&row, "max", f64::from(range.max))?;
            set_num(&row, "step", f64::from(range.step))?;
        }
        rows.push(&row);
    }
    Ok(rows)
}

pub fn geometry_to_object(geometry: Geometry) -> Result<Object, JsValue> {
    let obj = Object::new();
    match geometry {
        Geometry::Box {
            width,
            height,
            depth,
        } => {
            set(&obj, "kind", &JsValue::from_str("box"))?;
            set_num(&obj, "width", f64::from(width))?;
            set_num(&obj, "height", f64::from(height))?;
            set_num(&obj, "depth", f64::from(depth))?;
        }
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => {
            set(&obj, "kind", &JsValue::from_str("sphere"))?;
            set_num(&obj, "radius", f64::from(radius))?;
            set_num(&obj, "widthSegments", f64::from(width_segments))?;
            set_num(&obj, "heightSegments", f64::from(height_segments))?;
        }
        Geometry::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        } => {
            set(&obj, "kind", &JsValue::from_str("torus"))?;
            set_num(&obj, "radius", f64::from(radius))?;
            set_num(&obj, "tube", f64::from(tube))?;
            set_num(&obj, "radialSegments", f64::from(radial_segments))?;
            set_num(&obj, "tubularSegments", f64::from(tubular_segments))?;
        }
    }
    Ok(obj)
}

pub fn staging_to_object(staging: Staging) -> Result<Object, JsValue> {
    let obj = Object::new();
    set_num(&obj, "fov", f64::from(staging.fov_deg))?;
    set_num(&obj, "near", f64::from(staging.near))?;
    set_num(&obj, "far", f64::from(staging.far))?;
    set(&obj, "cameraPosition", &value_to_js(&Value::Vec3(staging.camera_position)))?;
    set(&obj, "meshRotation", &value_to_js(&Value::Vec3(staging.mesh_rotation)))?;
    Ok(obj)
}

/// Colour from either a packed number or a `#rrggbb` string.
pub fn color_from_js(value: &JsValue) -> anyhow::Result<Value> {
    let hex = match value.as_f64() {
        Some(n) => hex_from_number(n)
            .ok_or_else(|| anyhow!("colour {n} is not a whole number in 0x000000..=0xffffff"))?,
        None => {
            let text = value
                .as_string()
                .context("colour must be a number or a hex string")?;
            parse_hex_color(&text).with_context(|| format!("invalid colour `{text}`"))?
        }
    };
    Ok(Value::Color(Color::from_hex(hex)))
}

pub fn js_error(err: anyhow::Error) -> JsValue {
    js_sys::Error::new(&format!("{err:#}")).into()
}

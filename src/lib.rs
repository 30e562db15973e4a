#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod convert;
mod dom;
mod handle;
mod input;
mod showcase;

pub use handle::DemoHandle;
pub use showcase::ShowcaseHandle;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("demo-web starting");

    match dom::detect_webgl2() {
        Ok(true) => log::info!("[web] WebGL2 available"),
        Ok(false) => log::warn!("[web] WebGL2 unavailable; demos will not render"),
        Err(e) => log::warn!("[web] WebGL2 detection failed: {:#}", e),
    }
    Ok(())
}

/// Names accepted by `new DemoHandle(name)`.
#[wasm_bindgen]
pub fn presets() -> js_sys::Array {
    demo_core::PRESET_NAMES
        .iter()
        .map(|name| JsValue::from_str(name))
        .collect()
}

/// Pointer position in normalised device coordinates, as `[x, y]`.
#[wasm_bindgen]
pub fn pointer_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> js_sys::Float32Array {
    let ndc = input::pointer_ndc(client_x, client_y, width, height);
    js_sys::Float32Array::from(&ndc.to_array()[..])
}

/// Canonical key name for `KeyboardEvent.key`/`KeyboardEvent.code` strings.
#[wasm_bindgen]
pub fn normalize_key(key: &str) -> String {
    input::normalize_key(key)
}

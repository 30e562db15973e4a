use glam::Vec2;

/// Pointer position in normalised device coordinates, +Y up.
///
/// `width`/`height` are the viewport size the client coordinates refer to;
/// a degenerate viewport maps everything to the centre.
#[inline]
pub fn pointer_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if !(width > 0.0 && height > 0.0) {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -((client_y / height) * 2.0 - 1.0),
    )
}

/// Canonical key name as the controller matches it.
///
/// Accepts both `KeyboardEvent.key` (`"R"`) and `KeyboardEvent.code`
/// (`"KeyR"`, `"Digit1"`) spellings; printable keys come back lower-case.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim_matches(|c: char| c.is_control());
    if let Some(rest) = key.strip_prefix("Key").filter(|r| r.chars().count() == 1) {
        return rest.to_ascii_lowercase();
    }
    if let Some(rest) = key.strip_prefix("Digit").filter(|r| r.chars().count() == 1) {
        return rest.to_string();
    }
    match key {
        "Space" | "Spacebar" => " ".to_string(),
        k if k.chars().count() == 1 => k.to_lowercase(),
        k => k.to_string(),
    }
}

/// Parse `#rrggbb`, `rrggbb` or `0xrrggbb` into a packed colour.
pub fn parse_hex_color(text: &str) -> Option<u32> {
    let digits = text
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Packed colour from a JS number; only whole values in `0..=0xffffff` pass.
pub fn hex_from_number(n: f64) -> Option<u32> {
    if n.fract() != 0.0 || !(0.0..=f64::from(0xff_ff_ffu32)).contains(&n) {
        return None;
    }
    Some(n as u32)
}

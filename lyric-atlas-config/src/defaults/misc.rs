//! Default values that do not belong to a single focused subsystem.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── Drop shadow ────────────────────────────────────────────────────────────

pub fn shadow_blur_radius() -> f64 {
    2.0
}

pub fn shadow_direction() -> f64 {
    310.0
}

pub fn shadow_depth() -> f64 {
    4.0
}

pub fn shadow_opacity() -> f64 {
    1.0
}

// ── Compressor ─────────────────────────────────────────────────────────────

pub fn compressor_program() -> String {
    "nvdxt.exe".to_string()
}

//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so debug
//! builds stay readable. Every use is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit verbose logging for price socket connections and every tick batch.
    pub print_price_stream_updates: bool,
    /// Emit one line per chart redraw (point count, domains).
    pub print_render_passes: bool,
    /// Emit history cache hit/miss diagnostics.
    pub print_history_cache: bool,
    /// Emit UI interaction logs (coin switching, mode switching).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_price_stream_updates: false,
    print_render_passes: false,
    print_history_cache: false,
    print_ui_interactions: true,
    print_state_serde: false,
};

// Monotonic clock for UI bookkeeping (last tick age, repaint pacing).
// web_time re-exports std::time natively and works in the browser too.

pub type AppInstant = web_time::Instant;

pub fn now() -> AppInstant {
    web_time::Instant::now()
}

/// "just now", "12s ago", "3m ago"
pub fn age_label(since: AppInstant) -> String {
    let secs = since.elapsed().as_secs();
    match secs {
        0 => "just now".to_string(),
        1..=59 => format!("{}s ago", secs),
        _ => format!("{}m ago", secs / 60),
    }
}

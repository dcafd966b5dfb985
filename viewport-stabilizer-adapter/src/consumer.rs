use viewport_stabilizer::{SharedHeight, pick_dimension};

/// Height a consumer (for example a reveal-on-scroll highlighter) should lay out against.
///
/// Reads the stabilized height from `shared` when one has been committed, then falls back to the
/// window inner height and the root client height. Returns `0.0` when nothing is known.
pub fn stable_viewport_height(
    shared: &SharedHeight,
    inner_height: Option<f64>,
    client_height: Option<f64>,
) -> f64 {
    pick_dimension([shared.get(), inner_height, client_height]).unwrap_or(0.0)
}

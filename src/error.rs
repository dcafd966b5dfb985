use crate::Pointer;

/// Rejected [`crate::StabilizerOptions`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("{pointer:?} threshold `{field}` must be finite and non-negative, got {value}")]
    InvalidThreshold {
        pointer: Pointer,
        field: &'static str,
        value: f64,
    },
    #[error("keyboard ratio must be in (0, 1], got {0}")]
    InvalidKeyboardRatio(f64),
    #[error("visual viewport tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

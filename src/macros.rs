#[cfg(feature = "tracing")]
macro_rules! stab_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "viewport_stabilizer", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stab_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! stab_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "viewport_stabilizer", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stab_debug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! stab_warn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "viewport_stabilizer", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stab_warn {
    ($($tt:tt)*) => {};
}

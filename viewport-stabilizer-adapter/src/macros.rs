#[cfg(feature = "tracing")]
macro_rules! adapter_trace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "viewport_stabilizer_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adapter_trace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! adapter_debug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "viewport_stabilizer_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adapter_debug {
    ($($tt:tt)*) => {};
}

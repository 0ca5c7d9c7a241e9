//! Logging shim
//!
//! Routes log statements to `defmt` on firmware builds and to `tracing`
//! on host builds. With neither feature enabled the statements compile
//! away. Arguments must implement `Display` and, for firmware builds,
//! `defmt::Format`; only `{}` placeholders are portable across both.

#![allow(unused_macros)]

macro_rules! log_with {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(all(feature = "embedded", not(feature = "std")))]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(feature = "std")]
        ::tracing::$level!($s $(, $x)*);
        #[cfg(not(any(feature = "std", feature = "embedded")))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => { log_with!(trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { log_with!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { log_with!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { log_with!(warn, $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { log_with!(error, $($arg)*) };
}

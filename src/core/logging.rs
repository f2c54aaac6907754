//! Console logging
//!
//! In the browser: `web_sys::console`, so messages land in devtools.
//! Everywhere else (native tests, headless runs): stderr.
//!
//! Usage:
//! ```rust
//! use physicsbox::console_log;
//!
//! let bodies = 279;
//! console_log!("world built with {} bodies", bodies);
//! ```

/// Log an informational message to the host console.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[physicsbox] {}", format!($($arg)*));
        }
    }};
}

/// Log a warning to the host console.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[physicsbox] warning: {}", format!($($arg)*));
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_natively() {
        console_log!("frame {}", 1);
        console_warn!("slow frame: {:.1}ms", 40.0);
    }
}

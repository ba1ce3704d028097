// Console logging helpers. Off wasm32 these do nothing so the engine can run
// and be tested natively.

#[cfg(target_arch = "wasm32")]
use web_sys::console;

#[macro_export]
macro_rules! log {
    ($($t:tt)*) => {
        $crate::log::write(&format!($($t)*))
    };
}

pub fn write(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

// Scoped console timer, reports elapsed time for its label when dropped
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub struct Timer<'a> {
    name: &'a str,
    enabled: bool,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        Timer::when(true, name)
    }

    pub fn when(enabled: bool, name: &'a str) -> Timer<'a> {
        #[cfg(target_arch = "wasm32")]
        {
            if enabled {
                console::time_with_label(name);
            }
        }
        Timer { name, enabled }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if self.enabled {
                console::time_end_with_label(self.name);
            }
        }
    }
}

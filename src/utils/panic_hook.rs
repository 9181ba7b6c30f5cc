use std::panic;
use leptos::logging::log;

/// Forwards panics to the browser console and adds a hint when a signal was
/// touched after its page had already been replaced.
pub fn set_custom_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        console_error_panic_hook::hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") || message.contains("disposed") {
            log!("[PANIC] A reactive value was used after its page was unmounted.");
            log!("[PANIC] Check async page loads and toast timers for plain get/set calls.");
        }
    }));
}

/// Call once when the browser bundle starts.
pub fn init() {
    log!("[PANIC_HOOK] Setting up panic hook");
    set_custom_panic_hook();
}

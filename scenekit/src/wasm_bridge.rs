//! WASM Bridge - FFI helpers for shell-core communication
//!
//! This module provides helper functions used by the `#[scenekit::app]` proc
//! macro to generate the necessary FFI exports.
//!
//! Design: No global state. The shell owns a pointer to CoreApp which holds all state.

use crate::{Command, Core, Event};

/// The core application state that the shell owns.
pub struct CoreApp {
    core: Box<dyn Core>,
    /// Result buffer for returning JSON to the shell
    result_buffer: Vec<u8>,
}

impl CoreApp {
    pub fn new(core: Box<dyn Core>) -> Box<Self> {
        let mut app = Box::new(Self {
            core,
            result_buffer: Vec::new(),
        });
        app.store_commands_internal(&[]);
        app
    }

    /// Process an event and return commands
    pub fn on_event(&mut self, event: Event) -> Vec<Command> {
        self.core.handle(event)
    }

    /// Decode a JSON event, run it, and leave the JSON commands in the result buffer.
    ///
    /// Anything that is not a valid event produces an empty command list.
    pub fn on_event_json(&mut self, event_bytes: &[u8]) {
        let event = std::str::from_utf8(event_bytes)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str::<Event>(json).map_err(|e| e.to_string()));

        match event {
            Ok(event) => {
                let commands = self.on_event(event);
                self.store_commands_internal(&commands);
            }
            Err(e) => {
                log::warn!("Dropping malformed event: {}", e);
                self.store_commands_internal(&[]);
            }
        }
    }

    /// Store commands as JSON in the result buffer
    fn store_commands_internal(&mut self, commands: &[Command]) {
        let json = serde_json::to_string(commands).unwrap_or_else(|_| "[]".to_string());
        self.result_buffer.clear();
        self.result_buffer.extend_from_slice(json.as_bytes());
    }

    /// The last result as a string
    pub fn result_json(&self) -> &str {
        std::str::from_utf8(&self.result_buffer).unwrap_or("[]")
    }

    /// Get pointer to result buffer
    pub fn result_ptr(&self) -> *const u8 {
        self.result_buffer.as_ptr()
    }

    /// Get length of result buffer
    pub fn result_len(&self) -> usize {
        self.result_buffer.len()
    }
}

// FFI functions that work with CoreApp pointer

/// Create a CoreApp owning `core`. Returns the app pointer.
#[doc(hidden)]
pub fn create_app(core: Box<dyn Core>) -> *mut CoreApp {
    Box::into_raw(CoreApp::new(core))
}

/// Get pointer to the result buffer (last on_event result)
///
/// # Safety
/// `app_ptr` must be a valid pointer returned by `create_app` and not yet destroyed.
#[doc(hidden)]
pub unsafe fn get_result_ptr(app_ptr: *const CoreApp) -> *const u8 {
    let app = unsafe { &*app_ptr };
    app.result_ptr()
}

/// Get length of the result buffer
///
/// # Safety
/// `app_ptr` must be a valid pointer returned by `create_app` and not yet destroyed.
#[doc(hidden)]
pub unsafe fn get_result_len(app_ptr: *const CoreApp) -> usize {
    let app = unsafe { &*app_ptr };
    app.result_len()
}

/// Process an event on the CoreApp
/// Returns pointer to commands JSON. Call get_result_len for length.
///
/// # Safety
/// - `app_ptr` must be a valid pointer returned by `create_app` and not yet destroyed.
/// - `event_ptr` must be a valid pointer to `event_len` bytes of valid memory.
#[doc(hidden)]
pub unsafe fn app_on_event(app_ptr: *mut CoreApp, event_ptr: *const u8, event_len: usize) -> *const u8 {
    let app = unsafe { &mut *app_ptr };
    let event_bytes = unsafe { std::slice::from_raw_parts(event_ptr, event_len) };
    app.on_event_json(event_bytes);
    app.result_ptr()
}

/// Destroy a CoreApp (call when done)
///
/// # Safety
/// `app_ptr` must be a valid pointer returned by `create_app` and not yet destroyed,
/// or null (which is a no-op).
#[doc(hidden)]
pub unsafe fn destroy_app(app_ptr: *mut CoreApp) {
    if !app_ptr.is_null() {
        unsafe { drop(Box::from_raw(app_ptr)); }
    }
}

/// Allocate memory in WASM for the shell to write into
#[doc(hidden)]
pub fn alloc(size: usize) -> *mut u8 {
    let mut buf = Vec::with_capacity(size);
    let ptr = buf.as_mut_ptr();
    std::mem::forget(buf);
    ptr
}

/// Deallocate memory that was allocated via `alloc`
///
/// # Safety
/// `ptr` must come from `alloc(size)` with the same `size`.
#[doc(hidden)]
pub unsafe fn dealloc(ptr: *mut u8, size: usize) {
    unsafe { let _ = Vec::from_raw_parts(ptr, 0, size); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LifecycleEvent, LogLevel, DebugCommand};

    struct Echo;

    impl Core for Echo {
        fn handle(&mut self, event: Event) -> Vec<Command> {
            match event {
                Event::Lifecycle(LifecycleEvent::Frame(frame)) => vec![Command::Debug(DebugCommand::Log {
                    level: LogLevel::Debug,
                    message: format!("frame {}", frame.frame),
                })],
                _ => vec![],
            }
        }
    }

    #[test]
    fn test_new_app_has_empty_result() {
        let app = CoreApp::new(Box::new(Echo));
        assert_eq!(app.result_json(), "[]");
    }

    #[test]
    fn test_event_json_round_trip() {
        let mut app = CoreApp::new(Box::new(Echo));
        app.on_event_json(br#"{"category":"Lifecycle","event":{"type":"Frame","time":0.0,"dt":0.016,"frame":3}}"#);

        let commands: Vec<Command> = serde_json::from_str(app.result_json()).unwrap();
        assert_eq!(
            commands,
            vec![Command::Debug(DebugCommand::Log {
                level: LogLevel::Debug,
                message: "frame 3".to_string(),
            })]
        );
    }

    #[test]
    fn test_malformed_event_yields_empty_list() {
        let mut app = CoreApp::new(Box::new(Echo));
        app.on_event_json(br#"{"category":"Lifecycle","event":{"type":"Frame","time":0.0,"dt":0.016,"frame":3}}"#);
        app.on_event_json(b"not json");
        assert_eq!(app.result_json(), "[]");

        app.on_event_json(&[0xff, 0xfe]);
        assert_eq!(app.result_json(), "[]");
    }

    #[test]
    fn test_ffi_pointer_lifecycle() {
        let app = create_app(Box::new(Echo));
        let event = br#"{"category":"Lifecycle","event":{"type":"Pause"}}"#;
        unsafe {
            let ptr = app_on_event(app, event.as_ptr(), event.len());
            let len = get_result_len(app);
            let bytes = std::slice::from_raw_parts(ptr, len);
            assert_eq!(bytes, b"[]");
            assert_eq!(get_result_ptr(app), ptr);
            destroy_app(app);
        }
    }
}

//! Cores the shell can drive
//!
//! A core is either linked in-process ([`NativeCore`]) or loaded from a WASM
//! module with wasmtime ([`WasmCore`]). The module must export:
//! - `init_core() -> app_ptr` - Initialize and return app pointer
//! - `get_result_ptr(app_ptr) -> ptr` - Get pointer to result JSON
//! - `get_result_len(app_ptr) -> len` - Get length of result JSON
//! - `on_event(app_ptr, event_ptr, event_len) -> ptr` - Process event
//! - `alloc(size) -> ptr` - Allocate memory in WASM
//! - `dealloc(ptr, size)` - Deallocate memory in WASM
//! - `destroy_app(app_ptr)` - optional, called when the core is dropped

use std::path::Path;

use scenekit_protocol::{Command, Core, Event};
use wasmtime::{Engine, Instance, Memory, Module, Store, TypedFunc};

use crate::{Error, Result};

/// Something that answers events with commands.
pub trait CoreDriver {
    fn send(&mut self, event: &Event) -> Result<Vec<Command>>;
}

/// A core running in the shell's own process.
pub struct NativeCore<C> {
    core: C,
}

impl<C: Core> NativeCore<C> {
    pub fn new(core: C) -> Self {
        Self { core }
    }
}

impl<C: Core> CoreDriver for NativeCore<C> {
    fn send(&mut self, event: &Event) -> Result<Vec<Command>> {
        Ok(self.core.handle(event.clone()))
    }
}

/// wasm32 pointers and lengths travel as `i32` but are unsigned.
fn wasm_offset(value: i32) -> usize {
    value as u32 as usize
}

pub struct WasmCore {
    store: Store<()>,
    memory: Memory,
    app_ptr: i32,
    alloc: TypedFunc<i32, i32>,
    dealloc: TypedFunc<(i32, i32), ()>,
    on_event: TypedFunc<(i32, i32, i32), i32>,
    get_result_ptr: TypedFunc<i32, i32>,
    get_result_len: TypedFunc<i32, i32>,
    destroy_app: Option<TypedFunc<i32, ()>>,
}

impl WasmCore {
    pub fn load(wasm_path: &Path) -> Result<Self> {
        let engine = Engine::default();
        let module = Module::from_file(&engine, wasm_path)?;
        let mut store = Store::new(&engine, ());

        let instance = Instance::new(&mut store, &module, &[])?;

        let memory = instance
            .get_memory(&mut store, "memory")
            .ok_or(Error::MissingExport("memory"))?;

        let init_core = instance.get_typed_func::<(), i32>(&mut store, "init_core")?;
        let alloc = instance.get_typed_func::<i32, i32>(&mut store, "alloc")?;
        let dealloc = instance.get_typed_func::<(i32, i32), ()>(&mut store, "dealloc")?;
        let on_event = instance.get_typed_func::<(i32, i32, i32), i32>(&mut store, "on_event")?;
        let get_result_ptr = instance.get_typed_func::<i32, i32>(&mut store, "get_result_ptr")?;
        let get_result_len = instance.get_typed_func::<i32, i32>(&mut store, "get_result_len")?;
        let destroy_app = instance.get_typed_func::<i32, ()>(&mut store, "destroy_app").ok();

        // Initialize the core and get app pointer
        let app_ptr = init_core.call(&mut store, ())?;
        log::info!("WASM core loaded from {}", wasm_path.display());

        Ok(Self {
            store,
            memory,
            app_ptr,
            alloc,
            dealloc,
            on_event,
            get_result_ptr,
            get_result_len,
            destroy_app,
        })
    }

    /// Read the commands the core left in its result buffer.
    fn read_result(&mut self) -> Result<Vec<Command>> {
        let len = wasm_offset(self.get_result_len.call(&mut self.store, self.app_ptr)?);
        if len == 0 {
            return Ok(vec![]);
        }
        let ptr = wasm_offset(self.get_result_ptr.call(&mut self.store, self.app_ptr)?);

        let bytes = self
            .memory
            .data(&self.store)
            .get(ptr..ptr + len)
            .ok_or(Error::OutOfBounds { ptr, len })?;
        let json = std::str::from_utf8(bytes)?;
        log::trace!("core result: {}", json);
        Ok(serde_json::from_str::<Vec<Command>>(json)?)
    }
}

impl CoreDriver for WasmCore {
    fn send(&mut self, event: &Event) -> Result<Vec<Command>> {
        let event_json = serde_json::to_string(event)?;
        let event_bytes = event_json.as_bytes();
        let event_len = event_bytes.len() as i32;

        // Allocate memory in WASM for the event
        let event_ptr = self.alloc.call(&mut self.store, event_len)?;
        let start = wasm_offset(event_ptr);
        self.memory
            .data_mut(&mut self.store)
            .get_mut(start..start + event_bytes.len())
            .ok_or(Error::OutOfBounds { ptr: start, len: event_bytes.len() })?
            .copy_from_slice(event_bytes);

        self.on_event.call(&mut self.store, (self.app_ptr, event_ptr, event_len))?;
        self.dealloc.call(&mut self.store, (event_ptr, event_len))?;

        self.read_result()
    }
}

impl Drop for WasmCore {
    fn drop(&mut self) {
        if let Some(destroy_app) = &self.destroy_app {
            if let Err(e) = destroy_app.call(&mut self.store, self.app_ptr) {
                log::warn!("destroy_app failed: {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenekit_protocol::{LifecycleEvent, SceneCommand};

    #[test]
    fn test_native_core_passes_events_through() {
        let mut core = NativeCore::new(coin_flip::scene());
        let commands = core
            .send(&Event::Lifecycle(LifecycleEvent::Init(scenekit_protocol::InitEvent {
                platform: scenekit_protocol::Platform::Headless,
                viewport_width: 1,
                viewport_height: 1,
                random_seed: 0,
                features: vec![],
            })))
            .unwrap();
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::Scene(SceneCommand::CreateVolume(_)))));
    }

    #[test]
    fn test_wasm_offsets_are_unsigned() {
        assert_eq!(wasm_offset(0), 0);
        assert_eq!(wasm_offset(1024), 1024);
        assert_eq!(wasm_offset(i32::MIN), 0x8000_0000);
        assert_eq!(wasm_offset(-1), 0xFFFF_FFFF);
    }

    #[test]
    fn test_missing_module_is_a_wasm_error() {
        let path = std::env::temp_dir().join(format!("scenekit-missing-{}.wasm", std::process::id()));
        assert!(matches!(WasmCore::load(&path), Err(Error::Wasm(_))));
    }
}

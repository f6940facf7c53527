//! Proc macros for scenekit

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Marks a function as the scene entry point.
///
/// The function takes no arguments and returns the scene's `Core`. The
/// attribute generates the FFI exports a shell loads from a WASM module:
/// `init_core`, `get_result_ptr`, `get_result_len`, `on_event`, `alloc`,
/// `dealloc` and `destroy_app`. The exports are only emitted for `wasm32`,
/// so native builds can link the same crate as a library.
///
/// # Example
///
/// ```rust,ignore
/// #[scenekit::app]
/// fn scene() -> CoinFlipScene {
///     CoinFlipScene::default()
/// }
/// ```
#[proc_macro_attribute]
pub fn app(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(item as ItemFn);
    let fn_name = &input_fn.sig.ident;

    if !input_fn.sig.inputs.is_empty() {
        return syn::Error::new_spanned(
            &input_fn.sig.inputs,
            "#[scenekit::app] functions take no arguments and return the scene Core",
        )
        .to_compile_error()
        .into();
    }

    // Emit the FFI exports next to the annotated function
    let expanded = quote! {
        #input_fn

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub extern "C" fn init_core() -> *mut scenekit::wasm_bridge::CoreApp {
            scenekit::wasm_bridge::create_app(::std::boxed::Box::new(#fn_name()))
        }

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn get_result_ptr(app: *const scenekit::wasm_bridge::CoreApp) -> *const u8 {
            unsafe { scenekit::wasm_bridge::get_result_ptr(app) }
        }

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn get_result_len(app: *const scenekit::wasm_bridge::CoreApp) -> usize {
            unsafe { scenekit::wasm_bridge::get_result_len(app) }
        }

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn on_event(
            app: *mut scenekit::wasm_bridge::CoreApp,
            event_ptr: *const u8,
            event_len: usize,
        ) -> *const u8 {
            unsafe { scenekit::wasm_bridge::app_on_event(app, event_ptr, event_len) }
        }

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn destroy_app(app: *mut scenekit::wasm_bridge::CoreApp) {
            unsafe { scenekit::wasm_bridge::destroy_app(app) }
        }

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub extern "C" fn alloc(size: usize) -> *mut u8 {
            scenekit::wasm_bridge::alloc(size)
        }

        #[cfg(target_arch = "wasm32")]
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn dealloc(ptr: *mut u8, size: usize) {
            unsafe { scenekit::wasm_bridge::dealloc(ptr, size) }
        }
    };

    TokenStream::from(expanded)
}

mod ai;
mod api;
mod app;
mod components;
mod draft;
mod editor;
mod models;
mod pages;
mod state;
mod storage;

pub use app::App;

use crate::api::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

fn init_logging(config: &EnvConfig) {
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(config.tracing_level())
            .build(),
    );
    tracing::info!(api_url = %config.api_url, "inkpad starting");
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::ApiClient;
    use crate::models::User;
    use crate::storage::{load_user_from_storage, save_user_to_storage};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_api_client_storage_roundtrip_token() {
        ApiClient::clear_storage();

        let mut c = ApiClient::load_from_storage();
        assert!(!c.is_authenticated());

        c.set_token("t1".to_string());
        c.save_to_storage();

        let c2 = ApiClient::load_from_storage();
        assert_eq!(c2.get_token().map(|s| s.as_str()), Some("t1"));

        ApiClient::clear_storage();
        let c3 = ApiClient::load_from_storage();
        assert!(c3.get_token().is_none());
    }

    #[wasm_bindgen_test]
    fn test_user_storage_roundtrip() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "username": "writer",
            "email": "w@example.com"
        }))
        .expect("user should parse");
        save_user_to_storage(&user);

        let loaded = load_user_from_storage().expect("should load user from localStorage");
        assert_eq!(loaded.id, "7");
        assert_eq!(loaded.username, "writer");
        assert_eq!(loaded.extra["email"], "w@example.com");
        ApiClient::clear_storage();
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging(&EnvConfig::new());
    mount_to_body(App);
}

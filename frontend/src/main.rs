use leptos::prelude::*;
use rekap_frontend::{App, config::AppConfig};

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    // 日志初始化失败时只是没有控制台输出
    let _ = console_log::init_with_level(config.log_level);
    log::info!("[App] starting, api = {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config /> });
}

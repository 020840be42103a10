use leptos::prelude::*;

mod access_code_modal;
mod access_session;
mod clipboard;
mod header;
mod qr;
mod toast;

use header::Header;
use toast::{ToastViewport, Toaster};

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO) // Only show INFO, WARN, ERROR
            .build(),
    );

    leptos::mount::mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    // One toast surface for the whole tree; consumers grab it from context.
    let toaster = Toaster::new();
    provide_context(toaster);

    view! {
        <div class="container">
            <Header />

            <main class="mainContent">
                <div class="emptyState">"Connect a robot to get started"</div>
            </main>

            <ToastViewport />
        </div>
    }
}

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

use crate::access_session::{AccessSession, GenerateRequest, Phase};
use crate::clipboard;
use crate::qr;
use crate::toast::Toaster;

/// Modal presenting a QR code for the dashboard's own URL, so a tablet can
/// scan its way to the same page.
///
/// The parent owns visibility: `open` drives the modal, and every dismiss
/// gesture goes through `on_open_change(false)` instead of touching local
/// state. Each time `open` flips to true a fresh generation cycle starts;
/// flipping to false drops whatever the cycle produced.
#[component]
pub fn AccessCodeModal(
    #[prop(into)] open: Signal<bool>,
    on_open_change: impl Fn(bool) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let toaster = expect_context::<Toaster>();
    let session = RwSignal::new(AccessSession::new());

    Effect::new(move |prev: Option<bool>| {
        let is_open = open.get();
        let was_open = prev.unwrap_or(false);
        if is_open && !was_open {
            match window_origin() {
                Some(origin) => {
                    if let Some(request) = session.try_update(|s| s.begin(origin)) {
                        generate(session, toaster, request);
                    }
                }
                None => {
                    tracing::error!("Failed to resolve dashboard origin: no window location");
                    toaster.error("Failed to generate QR code");
                    session.update(|s| s.fail_to_open());
                }
            }
        } else if !is_open && was_open {
            session.update(|s| s.end());
        }
        is_open
    });

    let handle_copy = move |_| {
        let Some(url) = session.with_untracked(|s| s.origin_url().map(str::to_owned)) else {
            return;
        };
        spawn_local(async move {
            match clipboard::copy_text(&url).await {
                Ok(()) => toaster.success("Dashboard URL copied to clipboard"),
                Err(err) => {
                    tracing::error!("Failed to copy URL: {}", err);
                    toaster.error("Failed to copy URL");
                }
            }
        });
    };

    let image_data = move || session.with(|s| s.image_data().map(str::to_owned));
    let origin_url = move || {
        session.with(|s| s.origin_url().map(str::to_owned)).unwrap_or_default()
    };

    view! {
        <Show when=move || open.get()>
            <div class="accessModalOverlay" on:click=move |_| on_open_change(false)>
                <div class="accessModalContent" on:click=|e| e.stop_propagation()>
                    <div class="accessModalHeader">
                        <h2>"Tablet Access QR Code"</h2>
                        <button
                            class="accessCloseButton"
                            on:click=move |_| on_open_change(false)
                        >
                            "×"
                        </button>
                    </div>

                    <Show
                        when=move || session.with(|s| s.phase() == Phase::Ready)
                        fallback=|| {
                            view! {
                                <div class="accessPlaceholder">
                                    <div class="spinner"></div>
                                    <p>"Generating QR code..."</p>
                                </div>
                            }
                        }
                    >
                        <div class="accessCodeTile">
                            <img
                                src=move || image_data().unwrap_or_default()
                                alt="QR Code for Dashboard Access"
                            />
                        </div>
                    </Show>

                    <div class="accessInstructions">
                        <p>"Students can scan this QR code with a tablet camera"</p>
                        <p class="accessInstructionsHint">
                            "This will open the dashboard directly on their device"
                        </p>
                    </div>

                    <div class="accessUrlDisplay">
                        <span class="accessUrlLabel">"Dashboard URL:"</span>
                        <code>{origin_url}</code>
                    </div>

                    <div class="accessModalActions">
                        <button class="accessActionButton" on:click=handle_copy>
                            "Copy URL"
                        </button>
                        <button
                            class="accessActionButton primary"
                            on:click=move |_| on_open_change(false)
                        >
                            "Close"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Explicit accessor for the environment's origin (scheme + host + port).
fn window_origin() -> Option<String> {
    window().and_then(|w| w.location().origin().ok())
}

fn generate(session: RwSignal<AccessSession>, toaster: Toaster, request: GenerateRequest) {
    spawn_local(async move {
        let GenerateRequest { token, url, options } = request;
        match qr::render_data_url(&url, &options) {
            Ok(image_data) => {
                // try_update in case the signal was disposed while we were
                // off the main flow.
                let delivered = session
                    .try_update(|s| s.deliver_image(token, image_data))
                    .unwrap_or(false);
                if !delivered {
                    tracing::debug!("Discarding access code for a closed session");
                }
            }
            Err(err) => {
                let delivered = session
                    .try_update(|s| s.deliver_failure(token))
                    .unwrap_or(false);
                if delivered {
                    tracing::error!("Failed to generate QR code: {}", err);
                    toaster.error("Failed to generate QR code");
                }
            }
        }
    });
}

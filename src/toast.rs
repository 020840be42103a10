//! Transient notifications.
//!
//! A `Toaster` lives in context; any component can push a success or error
//! message. Toasts dismiss themselves after a few seconds, or on click.

use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
const TOAST_DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// The queue itself, kept free of reactive wiring so it can be exercised
/// directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast and return its id, for later dismissal.
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, kind, message });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Shared handle components use to raise notifications.
#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.queue.try_update(|queue| queue.push(kind, message));

        // Timers only exist in the browser; native builds (tests) dismiss by
        // hand.
        #[cfg(target_arch = "wasm32")]
        if let Some(id) = id {
            let toaster = *self;
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
                toaster.dismiss(id);
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = id;
    }

    pub fn dismiss(&self, id: u64) {
        // The signal may already be disposed if the timer outlives the app.
        let _ = self.queue.try_update(|queue| queue.dismiss(id));
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.with(|queue| queue.toasts().to_vec())
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-position stack rendering whatever the context `Toaster` holds.
#[component]
pub fn ToastViewport() -> impl IntoView {
    let toaster = expect_context::<Toaster>();

    view! {
        <div class="toastViewport">
            <For
                each=move || toaster.toasts()
                key=|toast: &Toast| toast.id
                children=move |toast: Toast| view! { <ToastItem toast /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let toaster = expect_context::<Toaster>();
    let id = toast.id;
    let class = match toast.kind {
        ToastKind::Success => "toast toastSuccess",
        ToastKind::Error => "toast toastError",
    };

    view! {
        <div class=class role="status" on:click=move |_| toaster.dismiss(id)>
            {toast.message}
        </div>
    }
}

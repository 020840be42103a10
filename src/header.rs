use leptos::prelude::*;

use crate::access_code_modal::AccessCodeModal;

/// Header displaying the dashboard title and the tablet access button.
///
/// Owns the visibility flag for the access modal. The modal stays mounted
/// below the header so it can watch the flag flip rather than being created
/// and torn down on every open.
#[component]
pub fn Header() -> impl IntoView {
    let show_access_modal = RwSignal::new(false);

    view! {
        <>
            <div class="header">
                <h1 class="title">"RoboLab Dashboard"</h1>
                <div class="headerRight">
                    <button
                        class="accessButton"
                        on:click=move |_| show_access_modal.set(true)
                        title="Tablet access"
                    >
                        "📱"
                    </button>
                </div>
            </div>
            <AccessCodeModal
                open=show_access_modal
                on_open_change=move |open: bool| show_access_modal.set(open)
            />
        </>
    }
}

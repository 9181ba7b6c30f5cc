use leptos::*;

use crate::ui::UiState;

/// Toast stack and the full-screen loading overlay.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let ui = expect_context::<UiState>();

    view! {
        <div id="toast-container" class="toast-container">
            <For
                each=move || ui.toasts.with(|queue| queue.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    view! {
                        <div class=toast.kind.class()>
                            <span>{toast.message}</span>
                            <button
                                class="toast-close"
                                on:click=move |_| ui.toasts.update(|queue| queue.dismiss(toast.id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
        <div id="loading" class="loading" class:hidden=move || !ui.loading.get()>
            <div class="spinner"></div>
        </div>
    }
}

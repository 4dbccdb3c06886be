//! Stack of transient error toasts in the corner of the screen.

use leptos::prelude::*;

use crate::state::toast::ToastState;

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class="toast toast--error" on:click=move |_| toasts.update(|t| t.dismiss(id))>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

//! Toast stack rendered by the session provider

use crate::notify::Toast;
use porter_core::NotificationKind;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ToasterProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

const fn toast_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => {
            "toast toast--success bg-green-50 dark:bg-green-900/30 text-green-800 dark:text-green-200"
        }
        NotificationKind::Error => {
            "toast toast--error bg-red-50 dark:bg-red-900/30 text-red-700 dark:text-red-300"
        }
    }
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    if props.toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="toaster fixed top-4 right-4 z-50 flex flex-col gap-2" aria-live="polite">
            { for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let on_click = props.on_dismiss.reform(move |_: MouseEvent| id);
                html! {
                    <div
                        key={id}
                        class={classes!(toast_class(toast.kind), "rounded-lg", "shadow", "px-4", "py-3", "text-sm", "cursor-pointer")}
                        role="alert"
                        onclick={on_click}
                    >
                        {toast.message.clone()}
                    </div>
                }
            }) }
        </div>
    }
}

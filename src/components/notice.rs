use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant};
use crate::state::Notice;
use icons::{CircleAlert, CircleCheck, X};
use leptos::prelude::*;

/// Renders the current notice, if any, with a dismiss button.
#[component]
pub(crate) fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let tone = if n.is_error() {
                "border-destructive/30 text-destructive"
            } else {
                "border-emerald-300/60 text-emerald-700 dark:text-emerald-300"
            };
            let icon = if n.is_error() {
                view! { <CircleAlert class="size-4" /> }.into_any()
            } else {
                view! { <CircleCheck class="size-4" /> }.into_any()
            };

            view! {
                <Alert class=tone attr:role="status">
                    {icon}
                    <AlertDescription>{n.message().to_string()}</AlertDescription>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="-my-1 size-6"
                        attr:title="Dismiss"
                        attr:r#type="button"
                        on:click=move |_| notice.set(None)
                    >
                        <X class="size-3.5" />
                    </Button>
                </Alert>
            }
        })
    }
}

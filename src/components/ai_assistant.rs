use crate::ai::AiAction;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Spinner,
};
use crate::state::{AppContext, DraftSession, Notice, PendingAction};
use icons::{CheckCheck, Lightbulb, Minimize2, Sparkles, Tag, Wand};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use strum::IntoEnumIterator;

fn action_icon(action: AiAction) -> AnyView {
    match action {
        AiAction::Improve => view! { <Wand class="size-4" /> }.into_any(),
        AiAction::Grammar => view! { <CheckCheck class="size-4" /> }.into_any(),
        AiAction::Concise => view! { <Minimize2 class="size-4" /> }.into_any(),
        AiAction::Title => view! { <Lightbulb class="size-4" /> }.into_any(),
        AiAction::Tags => view! { <Tag class="size-4" /> }.into_any(),
    }
}

/// One button per AI action. All of them lock while any action is in flight.
#[component]
pub(crate) fn AiAssistantPanel(
    session: StoredValue<DraftSession, LocalStorage>,
    #[prop(into)] revision: Signal<u64>,
    #[prop(into)] on_notice: Callback<Notice>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let pending = Memo::new(move |_| {
        revision.track();
        session.with_value(|s| s.pending())
    });

    let run = move |action: AiAction| {
        let draft = session.get_value();
        let api_client = app_state.0.api_client.get_untracked();

        spawn_local(async move {
            let result = match action.transform_mode() {
                Some(mode) => draft.run_transformation(&api_client, mode).await,
                None => draft.request_tag_suggestions(&api_client).await,
            };
            match result {
                Ok(outcome) => on_notice.run(Notice::success(outcome.message())),
                Err(e) if e.is_session_expired() => {
                    app_state.0.sign_out();
                    navigate.with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => on_notice.run(Notice::error(e.to_string())),
            }
        });
    };

    view! {
        <Card class="gap-3">
            <CardHeader>
                <CardTitle class="flex items-center gap-2 text-base">
                    <Sparkles class="size-4 text-violet-500" />
                    "AI Assistant"
                </CardTitle>
                <CardDescription class="text-xs">"Rewrite the draft or get suggestions."</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-2">
                {AiAction::iter()
                    .map(|action| {
                        view! {
                            <Button
                                variant=ButtonVariant::Ai
                                size=ButtonSize::Sm
                                attr:r#type="button"
                                attr:disabled=move || pending.get() != PendingAction::Idle
                                on:click=move |_| run(action)
                            >
                                {move || {
                                    if pending.get().is_running(action) {
                                        view! { <Spinner /> }.into_any()
                                    } else {
                                        action_icon(action)
                                    }
                                }}
                                {move || {
                                    if pending.get().is_running(action) {
                                        "Processing..."
                                    } else {
                                        action.label()
                                    }
                                }}
                            </Button>
                        }
                    })
                    .collect_view()}
                <p class="pt-1 text-center text-[11px] text-muted-foreground">"Powered by AI"</p>
            </CardContent>
        </Card>
    }
}

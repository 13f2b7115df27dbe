use crate::state::DraftSession;
use leptos::prelude::*;

/// Clickable list of staged title suggestions. Choosing one replaces the
/// title and clears the list in the same update.
#[component]
pub(crate) fn TitleSuggestionList(
    session: StoredValue<DraftSession, LocalStorage>,
    #[prop(into)] revision: Signal<u64>,
) -> impl IntoView {
    let suggestions = Memo::new(move |_| {
        revision.track();
        session.with_value(|s| s.title_suggestions())
    });

    view! {
        <Show when=move || !suggestions.get().is_empty() fallback=|| ().into_view()>
            <div class="mt-2 rounded-md border border-violet-200 bg-violet-50/60 p-2 dark:border-violet-900 dark:bg-violet-950/40">
                <div class="mb-1 flex items-center justify-between px-1 text-xs text-muted-foreground">
                    <span>"Suggested titles"</span>
                    <button
                        type="button"
                        class="hover:text-foreground"
                        on:click=move |_| session.with_value(|s| s.dismiss_title_suggestions())
                    >
                        "Dismiss"
                    </button>
                </div>
                <ul class="flex flex-col">
                    <For
                        each=move || suggestions.get().into_iter().enumerate()
                        key=|(i, t)| (*i, t.clone())
                        children=move |(_, title)| {
                            let label = title.clone();
                            view! {
                                <li>
                                    <button
                                        type="button"
                                        class="w-full rounded px-2 py-1.5 text-left text-sm hover:bg-violet-100 dark:hover:bg-violet-900"
                                        on:click=move |_| {
                                            let chosen = title.clone();
                                            session.with_value(|s| s.accept_title_suggestion(chosen));
                                        }
                                    >
                                        {label}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </Show>
    }
}

use crate::api::ArticleStore;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardFooter, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::components::{AiAssistantPanel, NoticeBanner, TitleSuggestionList};
use crate::draft::split_tags;
use crate::editor::{ContentEditableSurface, EditorBridge, RichTextEditor};
use crate::models::{Article, Category};
use crate::state::{
    delete_article, remove_row, AppContext, DraftContext, DraftSession, Notice, DELETED_NOTICE,
    DELETE_CONFIRMATION,
};
use crate::storage::save_user_to_storage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate, use_params, use_query_map};
use leptos_router::params::Params;
use strum::IntoEnumIterator;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ArticleRouteParams {
    pub id: Option<String>,
}

const NAV_LINK: &str = "inline-flex h-8 items-center rounded-md px-3 text-sm font-medium hover:bg-accent hover:text-accent-foreground";
const PRIMARY_LINK: &str = "inline-flex h-9 items-center rounded-md bg-primary px-4 text-sm font-medium text-primary-foreground shadow-xs hover:bg-primary/90";

fn article_href(id: &str) -> String {
    format!("/article/{}", urlencoding::encode(id))
}

fn edit_href(id: &str) -> String {
    format!("/edit/{}", urlencoding::encode(id))
}

/// `2026-01-02T03:04:05Z` -> `2026-01-02`.
fn short_date(ts: &str) -> &str {
    ts.split_once('T').map_or(ts, |(date, _)| date)
}

fn confirm_delete() -> bool {
    window()
        .confirm_with_message(DELETE_CONFIRMATION)
        .unwrap_or(false)
}

/// Where to go after signing in. `None` keeps the current page.
fn login_redirect(next: Option<&str>, pathname: &str) -> Option<String> {
    // Only same-site paths.
    if let Some(next) = next.filter(|n| n.starts_with('/') && !n.starts_with("//")) {
        return Some(next.to_string());
    }
    (pathname == "/login").then(|| "/".to_string())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let query = use_query_map();
    let location = use_location();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        let mut api_client = app_state.0.api_client.get_untracked();
        // Rendered inline by `RootAuthed` on a protected path: stay there once signed in.
        let next = login_redirect(
            query.get_untracked().get("next").as_deref(),
            &location.pathname.get_untracked(),
        );

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.login(&email_val, &password_val).await {
                Ok(response) => {
                    api_client.set_token(response.token);
                    api_client.save_to_storage();
                    save_user_to_storage(&response.user);
                    tracing::info!(user = %response.user.username, "signed in");
                    app_state.0.api_client.set(api_client);
                    app_state.0.current_user.set(Some(response.user));
                    if let Some(next) = next {
                        navigate.with_value(|nav| nav(&next, Default::default()));
                    }
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Inkpad"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Log in"</CardTitle>
                        <CardDescription class="text-xs">"Sign in to write and publish articles."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    value=email
                                    on_value=move |v: String| email.set(v)
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    value=password
                                    on_value=move |v: String| password.set(v)
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <FormError error=error />

                            <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Signing in..." } else { "Continue" }}
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "No account? "
                                <a class="text-primary underline underline-offset-4" href="/signup">"Sign up"</a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

/// Checks done before the signup request is sent.
pub(crate) fn check_signup_passwords(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password != confirm {
        return Err("Passwords do not match");
    }
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let email_val = email.get();
        let password_val = password.get();
        let mut api_client = app_state.0.api_client.get_untracked();

        if let Err(msg) = check_signup_passwords(&password_val, &confirm_password.get()) {
            error.set(Some(msg.to_string()));
            return;
        }

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client
                .signup(&username_val, &email_val, &password_val)
                .await
            {
                Ok(response) => {
                    api_client.set_token(response.token);
                    api_client.save_to_storage();
                    save_user_to_storage(&response.user);
                    app_state.0.api_client.set(api_client);
                    app_state.0.current_user.set(Some(response.user));
                    app_state.0.flash.set(Some(Notice::success("Account created!")));
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Inkpad"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Create account"</CardTitle>
                        <CardDescription class="text-xs">"Start writing in a minute."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="username" class="text-xs">"Username"</Label>
                                <Input
                                    id="username"
                                    placeholder="yourname"
                                    value=username
                                    on_value=move |v: String| username.set(v)
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    value=email
                                    on_value=move |v: String| email.set(v)
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    value=password
                                    on_value=move |v: String| password.set(v)
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="confirm_password" class="text-xs">"Confirm password"</Label>
                                <Input
                                    id="confirm_password"
                                    r#type="password"
                                    value=confirm_password
                                    on_value=move |v: String| confirm_password.set(v)
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <FormError error=error />

                            <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Creating account..." } else { "Sign up" }}
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "Already have an account? "
                                <a class="text-primary underline underline-offset-4" href="/login">"Log in"</a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
fn FormError(error: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|e| {
            view! {
                <Alert class="border-destructive/30">
                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                </Alert>
            }
        })
    }
}

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_sign_out = move |_| {
        app_state.0.sign_out();
        navigate.with_value(|nav| nav("/login", Default::default()));
    };

    view! {
        <div class="min-h-screen bg-background">
            <header class="border-b">
                <div class="mx-auto flex h-12 max-w-6xl items-center justify-between px-4">
                    <a href="/" class="text-sm font-semibold">"Inkpad"</a>
                    <nav class="flex items-center gap-2 text-sm">
                        {move || match app_state.0.current_user.get() {
                            Some(user) => view! {
                                <a class=NAV_LINK href="/dashboard">"Dashboard"</a>
                                <a class=NAV_LINK href="/create">"Write"</a>
                                <span class="text-xs text-muted-foreground">{user.username}</span>
                                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_sign_out>
                                    "Sign out"
                                </Button>
                            }
                            .into_any(),
                            None => view! {
                                <a class=NAV_LINK href="/login">"Log in"</a>
                                <a class=NAV_LINK href="/signup">"Sign up"</a>
                            }
                            .into_any(),
                        }}
                    </nav>
                </div>
            </header>
            <main class="mx-auto w-full max-w-6xl px-4 py-6">{children()}</main>
        </div>
    }
}

/// Renders `children` for a signed-in user and the login form otherwise.
#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <LoginPage /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notice = RwSignal::new(app_state.0.take_flash());

    view! {
        <AppLayout>
            <div class="mx-auto flex max-w-xl flex-col items-center gap-4 py-16 text-center">
                <div class="w-full">
                    <NoticeBanner notice=notice />
                </div>
                <h1 class="text-3xl font-semibold tracking-tight">"Write better articles"</h1>
                <p class="text-sm text-muted-foreground">
                    "Draft in a rich editor, let AI polish the prose, suggest a title and tag it, then publish."
                </p>
                <a class=PRIMARY_LINK href="/create">"Start writing"</a>
            </div>
        </AppLayout>
    }
}

/// `/create` and `/edit/:id`. A new draft session is built whenever the id changes.
#[component]
pub fn ArticleEditorPage() -> impl IntoView {
    let params = use_params::<ArticleRouteParams>();
    let article_id = Memo::new(move |_| {
        params
            .get()
            .ok()
            .and_then(|p| p.id)
            .filter(|id| !id.trim().is_empty())
    });

    view! {
        <AppLayout>
            {move || {
                let id = article_id.get();
                view! { <DraftEditor article_id=id /> }
            }}
        </AppLayout>
    }
}

#[component]
fn DraftEditor(article_id: Option<String>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let session = DraftSession::new(DraftContext {
        article_id: article_id.clone(),
        author: app_state.0.current_user.get_untracked(),
    });
    let is_editing = session.is_editing();

    // Views read the session through closures; this counter is what makes them re-run.
    let revision: RwSignal<u64> = RwSignal::new(0);
    let listener = session.subscribe(move |_| {
        revision.try_update(|r| *r += 1);
    });
    let bridge = StoredValue::new_local(EditorBridge::<ContentEditableSurface>::new(
        session.clone(),
    ));
    let session = StoredValue::new_local(session);
    on_cleanup(move || {
        let _ = session.try_with_value(|s| s.unsubscribe(listener));
    });

    let notice: RwSignal<Option<Notice>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(is_editing);

    if let Some(id) = article_id {
        let draft = session.get_value();
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match draft.load(&api_client, &id).await {
                Ok(()) => {}
                Err(e) if e.is_session_expired() => {
                    app_state.0.sign_out();
                    navigate.with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => {
                    tracing::warn!(article_id = %id, error = %e, "failed to load article");
                    app_state
                        .0
                        .flash
                        .set(Some(Notice::error(format!("Failed to load article: {e}"))));
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
            }
            loading.try_set(false);
        });
    }

    let title = Signal::derive(move || {
        revision.track();
        session.with_value(|s| s.title())
    });
    let tags_raw = Signal::derive(move || {
        revision.track();
        session.with_value(|s| s.tags_raw())
    });
    let category = Signal::derive(move || {
        revision.track();
        session.with_value(|s| s.category())
    });
    let saving = Signal::derive(move || {
        revision.track();
        session.with_value(|s| s.is_saving())
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let draft = session.get_value();
        let api_client = app_state.0.api_client.get_untracked();
        notice.set(None);

        spawn_local(async move {
            match draft.submit(&api_client).await {
                Ok(done) => {
                    app_state.0.flash.set(Some(Notice::success(done.message())));
                    navigate.with_value(|nav| nav(&article_href(&done.article_id), Default::default()));
                }
                Err(e) if e.is_session_expired() => {
                    app_state.0.sign_out();
                    navigate.with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => {
                    notice.try_set(Some(Notice::error(e.to_string())));
                }
            }
        });
    };

    let on_cancel = move |_| {
        let _ = window().history().and_then(|h| h.back());
    };

    view! {
        <div class="grid gap-6 lg:grid-cols-[1fr_18rem]">
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">
                        {if is_editing { "Edit Article" } else { "Create New Article" }}
                    </CardTitle>
                </CardHeader>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <CardContent class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading article..."
                        </CardContent>
                    }
                >
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <CardContent class="flex flex-col gap-4">
                            <NoticeBanner notice=notice />

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="title">"Title"</Label>
                                <Input
                                    id="title"
                                    placeholder="Enter article title..."
                                    value=title
                                    on_value=move |v: String| session.with_value(|s| s.set_title(v))
                                />
                                <TitleSuggestionList session=session revision=revision />
                            </div>

                            <div class="grid gap-4 sm:grid-cols-2">
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="category">"Category"</Label>
                                    <select
                                        id="category"
                                        class="border-input h-9 rounded-md border bg-transparent px-3 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                        prop:value=move || category.get().to_string()
                                        on:change=move |ev| {
                                            let picked = Category::parse_lenient(&event_target_value(&ev));
                                            session.with_value(|s| s.set_category(picked));
                                        }
                                    >
                                        {Category::iter()
                                            .map(|c| {
                                                let name = c.to_string();
                                                let value = name.clone();
                                                view! { <option value=value>{name}</option> }
                                            })
                                            .collect_view()}
                                    </select>
                                </div>

                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="tags">"Tags"</Label>
                                    <Input
                                        id="tags"
                                        placeholder="react, javascript, tutorial"
                                        value=tags_raw
                                        on_value=move |v: String| session.with_value(|s| s.set_tags_raw(v))
                                    />
                                </div>
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label>"Content"</Label>
                                <RichTextEditor bridge=bridge placeholder="Start writing your article..." />
                            </div>
                        </CardContent>

                        <CardFooter class="justify-end">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                attr:r#type="button"
                                on:click=on_cancel
                            >
                                "Cancel"
                            </Button>
                            <Button size=ButtonSize::Sm attr:r#type="submit" attr:disabled=move || saving.get()>
                                <Show when=move || saving.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || match (saving.get(), is_editing) {
                                    (true, _) => "Saving...",
                                    (false, true) => "Update Article",
                                    (false, false) => "Publish Article",
                                }}
                            </Button>
                        </CardFooter>
                    </form>
                </Show>
            </Card>

            <aside>
                <AiAssistantPanel
                    session=session
                    revision=revision
                    on_notice=move |n: Notice| {
                        notice.try_set(Some(n));
                    }
                />
            </aside>
        </div>
    }
}

#[component]
pub fn ArticlePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let params = use_params::<ArticleRouteParams>();
    let deleting: RwSignal<bool> = RwSignal::new(false);

    let notice = RwSignal::new(app_state.0.take_flash());
    let article: RwSignal<Option<Article>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    Effect::new(move |_| {
        let Some(id) = params.get().ok().and_then(|p| p.id) else {
            error.set(Some("Article not found".to_string()));
            return;
        };
        let api_client = app_state.0.api_client.get_untracked();
        article.set(None);
        error.set(None);

        spawn_local(async move {
            match api_client.fetch_article(&id).await {
                Ok(a) => {
                    article.try_set(Some(a));
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                }
            }
        });
    });

    let is_author = move |a: &Article| {
        app_state
            .0
            .current_user
            .with(|u| u.as_ref().is_some_and(|u| a.is_authored_by(u)))
    };

    let on_delete = move |id: String| {
        if deleting.get_untracked() || !confirm_delete() {
            return;
        }
        let api_client = app_state.0.api_client.get_untracked();
        deleting.set(true);

        spawn_local(async move {
            match delete_article(&api_client, &id).await {
                Ok(()) => {
                    app_state.0.flash.set(Some(Notice::success(DELETED_NOTICE)));
                    navigate.with_value(|nav| nav("/dashboard", Default::default()));
                }
                Err(e) if e.is_session_expired() => {
                    app_state.0.sign_out();
                    navigate.with_value(|nav| nav("/login", Default::default()));
                }
                Err(e) => {
                    notice.try_set(Some(Notice::error(format!("Failed to delete article: {e}"))));
                }
            }
            deleting.try_set(false);
        });
    };

    view! {
        <AppLayout>
            <div class="mx-auto flex max-w-3xl flex-col gap-4">
                <NoticeBanner notice=notice />
                <FormError error=error />
                {move || match article.get() {
                    None if error.get().is_none() => view! {
                        <div class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading article..."
                        </div>
                    }
                    .into_any(),
                    None => ().into_any(),
                    Some(a) => {
                        let editable = is_author(&a);
                        let tags = split_tags(a.tags.as_deref().unwrap_or_default());
                        let body = a.content.clone().unwrap_or_default();
                        view! {
                            <article class="flex flex-col gap-4">
                                <header class="flex flex-col gap-2">
                                    <div class="flex items-center gap-2 text-xs">
                                        <span class="rounded-full bg-secondary px-2.5 py-0.5 font-medium">
                                            {a.category.to_string()}
                                        </span>
                                        {a.author.clone().map(|author| view! {
                                            <span class="text-muted-foreground">"by " {author.username}</span>
                                        })}
                                        {a.created_at.clone().map(|at| view! {
                                            <span class="text-muted-foreground">{short_date(&at).to_string()}</span>
                                        })}
                                    </div>
                                    <h1 class="text-3xl font-semibold tracking-tight">{a.title.clone()}</h1>
                                    <div class="flex flex-wrap gap-1.5">
                                        {tags
                                            .into_iter()
                                            .map(|t| view! {
                                                <span class="rounded bg-muted px-2 py-0.5 text-xs text-muted-foreground">
                                                    "#" {t}
                                                </span>
                                            })
                                            .collect_view()}
                                    </div>
                                </header>
                                <div class="prose dark:prose-invert max-w-none" inner_html=body></div>
                                {editable.then(|| {
                                    let id = a.id.clone();
                                    view! {
                                        <div class="flex items-center gap-2">
                                            <a class=NAV_LINK href=edit_href(&a.id)>"Edit"</a>
                                            <Button
                                                variant=ButtonVariant::Destructive
                                                size=ButtonSize::Sm
                                                attr:disabled=move || deleting.get()
                                                on:click=move |_| on_delete(id.clone())
                                            >
                                                {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                            </Button>
                                        </div>
                                    }
                                })}
                            </article>
                        }
                        .into_any()
                    }
                }}
            </div>
        </AppLayout>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let notice = RwSignal::new(app_state.0.take_flash());
    let articles: RwSignal<Option<Vec<Article>>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let expired = move || {
        app_state.0.sign_out();
        navigate.with_value(|nav| nav("/login", Default::default()));
    };

    let api_client = app_state.0.api_client.get_untracked();
    spawn_local(async move {
        match api_client.list_my_articles().await {
            Ok(list) => {
                articles.try_set(Some(list));
            }
            Err(e) if e.is_session_expired() => expired(),
            Err(e) => {
                error.try_set(Some(format!("Failed to load articles: {e}")));
            }
        }
    });

    let on_delete = move |id: String| {
        if !confirm_delete() {
            return;
        }
        let api_client = app_state.0.api_client.get_untracked();

        spawn_local(async move {
            match delete_article(&api_client, &id).await {
                Ok(()) => {
                    articles.try_update(|rows| {
                        if let Some(rows) = rows {
                            remove_row(rows, &id);
                        }
                    });
                    notice.try_set(Some(Notice::success(DELETED_NOTICE)));
                }
                Err(e) if e.is_session_expired() => expired(),
                Err(e) => {
                    notice.try_set(Some(Notice::error(format!("Failed to delete article: {e}"))));
                }
            }
        });
    };

    view! {
        <AppLayout>
            <div class="mx-auto flex max-w-4xl flex-col gap-4">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-semibold tracking-tight">"My Articles"</h1>
                    <a class=PRIMARY_LINK href="/create">"New Article"</a>
                </div>
                <NoticeBanner notice=notice />
                <FormError error=error />
                {move || match articles.get() {
                    None if error.get().is_none() => view! {
                        <div class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading articles..."
                        </div>
                    }
                    .into_any(),
                    None => ().into_any(),
                    Some(rows) if rows.is_empty() => view! {
                        <Card>
                            <CardContent class="flex flex-col items-center gap-3 py-10 text-sm text-muted-foreground">
                                "You haven't written any articles yet."
                                <a class=PRIMARY_LINK href="/create">"Create Your First Article"</a>
                            </CardContent>
                        </Card>
                    }
                    .into_any(),
                    Some(rows) => view! {
                        <div class="flex flex-col divide-y rounded-md border">
                            {rows
                                .into_iter()
                                .map(|a| {
                                    let id = a.id.clone();
                                    view! {
                                        <div class="flex items-center justify-between gap-4 px-4 py-3">
                                            <div class="flex min-w-0 flex-col gap-1">
                                                <a class="truncate font-medium hover:underline" href=article_href(&a.id)>
                                                    {a.title.clone()}
                                                </a>
                                                <div class="flex items-center gap-2 text-xs text-muted-foreground">
                                                    <span>{a.category.to_string()}</span>
                                                    {a.created_at.clone().map(|at| view! {
                                                        <span>{short_date(&at).to_string()}</span>
                                                    })}
                                                </div>
                                            </div>
                                            <div class="flex shrink-0 items-center gap-1">
                                                <a class=NAV_LINK href=article_href(&a.id)>"View"</a>
                                                <a class=NAV_LINK href=edit_href(&a.id)>"Edit"</a>
                                                <Button
                                                    variant=ButtonVariant::Ghost
                                                    size=ButtonSize::Sm
                                                    class="text-destructive"
                                                    on:click=move |_| on_delete(id.clone())
                                                >
                                                    "Delete"
                                                </Button>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </AppLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_password_checks() {
        assert_eq!(check_signup_passwords("secret1", "secret2"), Err("Passwords do not match"));
        assert_eq!(
            check_signup_passwords("abc", "abc"),
            Err("Password must be at least 6 characters")
        );
        assert_eq!(check_signup_passwords("secret", "secret"), Ok(()));
    }

    #[test]
    fn test_login_redirect() {
        assert_eq!(login_redirect(None, "/login"), Some("/".to_string()));
        assert_eq!(login_redirect(None, "/create"), None);
        assert_eq!(login_redirect(Some("/edit/3"), "/login"), Some("/edit/3".to_string()));
        assert_eq!(login_redirect(Some("//evil.example"), "/login"), Some("/".to_string()));
    }

    #[test]
    fn test_article_links_escape_ids() {
        assert_eq!(article_href("42"), "/article/42");
        assert_eq!(edit_href("a b"), "/edit/a%20b");
        assert_eq!(short_date("2026-01-02T03:04:05Z"), "2026-01-02");
        assert_eq!(short_date("yesterday"), "yesterday");
    }
}

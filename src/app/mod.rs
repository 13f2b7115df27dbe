use crate::api::ApiErrorKind;
use crate::pages::{
    ArticleEditorPage, ArticlePage, DashboardPage, LoginPage, RootAuthed, RootPage, SignupPage,
};
use crate::state::{AppContext, AppState};
use crate::storage::save_user_to_storage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

/// Re-validate a token restored from localStorage. Only a 401 signs the user
/// out; a network failure keeps the cached session.
fn restore_session(app_state: AppState) {
    let api_client = app_state.api_client.get_untracked();
    if !api_client.is_authenticated() {
        return;
    }

    spawn_local(async move {
        match api_client.me().await {
            Ok(user) => {
                save_user_to_storage(&user);
                app_state.current_user.set(Some(user));
            }
            Err(e) if e.kind() == ApiErrorKind::Unauthorized => {
                tracing::info!("stored token rejected, signing out");
                app_state.sign_out();
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not validate stored session");
            }
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state));
    restore_session(app_state);

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("signup") view=SignupPage />
                <Route path=path!("create") view=move || view! {
                    <RootAuthed>
                        <ArticleEditorPage />
                    </RootAuthed>
                } />
                <Route path=path!("edit/:id") view=move || view! {
                    <RootAuthed>
                        <ArticleEditorPage />
                    </RootAuthed>
                } />
                <Route path=path!("dashboard") view=move || view! {
                    <RootAuthed>
                        <DashboardPage />
                    </RootAuthed>
                } />
                <Route path=path!("article/:id") view=ArticlePage />
                <Route path=path!("") view=RootPage />
            </Routes>
        </Router>
    }
}

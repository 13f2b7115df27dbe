use crate::ai::{AiAction, AiAssistant, TransformMode, TransformResult};
use crate::api::{ApiError, ArticleStore};
use crate::draft::{join_tags, merge_tags, Draft, DraftField};
use crate::models::{Article, ArticlePayload, Category, User};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Which AI round trip, if any, currently owns the draft.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PendingAction {
    #[default]
    Idle,
    Running(AiAction),
}

impl PendingAction {
    pub fn is_running(self, action: AiAction) -> bool {
        self == Self::Running(action)
    }
}

/// Where a body update came from.
///
/// The editor bridge only pushes `External` updates back into the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BodyOrigin {
    Surface,
    External,
}

/// Emitted to subscribers after each mutation has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DraftChange {
    Title,
    Body(BodyOrigin),
    Category,
    Tags,
    Pending,
    TitleSuggestions,
    Saving,
}

/// Explicit session context; replaces ambient auth state.
#[derive(Clone, Debug, Default)]
pub(crate) struct DraftContext {
    /// Set when editing a persisted article; submission updates instead of creating.
    pub article_id: Option<String>,
    pub author: Option<User>,
}

fn missing_fields_message(fields: &[DraftField]) -> &'static str {
    let title = fields.contains(&DraftField::Title);
    let body = fields.contains(&DraftField::Body);
    match (title, body) {
        (true, true) => "Title and content are required.",
        (true, false) => "Title is required.",
        (false, true) => "Content is required.",
        (false, false) => "Draft is incomplete.",
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("Write some content first before {}.", .0.guard_phrase())]
    EmptyContent(AiAction),
    #[error("{}", missing_fields_message(.0))]
    MissingFields(Vec<DraftField>),
}

#[derive(Clone, Debug, thiserror::Error)]
pub(crate) enum DraftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A second AI call while one is outstanding. The UI disables triggers,
    /// so hitting this is a caller bug.
    #[error("Another AI action ({running}) is still running.")]
    Busy { running: AiAction },
    #[error("The article is already being saved.")]
    SubmitInFlight,
    #[error(transparent)]
    Service(#[from] ApiError),
}

impl DraftError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_session_expired())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AiOutcome {
    BodyReplaced(TransformMode),
    TitlesSuggested(usize),
    TagsMerged { added: usize },
}

impl AiOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::BodyReplaced(mode) => AiAction::from(*mode).success_message(),
            Self::TitlesSuggested(_) => AiAction::Title.success_message(),
            Self::TagsMerged { .. } => AiAction::Tags.success_message(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Submitted {
    pub article_id: String,
    pub created: bool,
}

impl Submitted {
    pub fn message(&self) -> &'static str {
        if self.created {
            "Article published!"
        } else {
            "Article updated!"
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ListenerId(u64);

type Listener = Rc<dyn Fn(DraftChange)>;

#[derive(Default)]
struct SessionState {
    draft: Draft,
    pending: PendingAction,
    title_suggestions: Vec<String>,
    saving: bool,
}

struct Inner {
    ctx: DraftContext,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
}

/// Owns one draft and serializes every source of change to it.
///
/// Cheap to clone; clones share the same draft. All AI work goes through a
/// single-flight gate ([`PendingAction`]): a call made while another is
/// running is rejected, never queued. Borrows are never held across an
/// `.await` or while listeners run.
#[derive(Clone)]
pub(crate) struct DraftSession {
    inner: Rc<Inner>,
}

/// Returns the gate to `Idle` however the AI round trip ends.
struct InFlight<'a> {
    session: &'a DraftSession,
    action: AiAction,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.session.inner.state.borrow_mut().pending = PendingAction::Idle;
        tracing::debug!(action = %self.action, "AI action resolved");
        self.session.notify(DraftChange::Pending);
    }
}

struct Saving<'a>(&'a DraftSession);

impl Drop for Saving<'_> {
    fn drop(&mut self) {
        self.0.inner.state.borrow_mut().saving = false;
        self.0.notify(DraftChange::Saving);
    }
}

impl DraftSession {
    pub fn new(ctx: DraftContext) -> Self {
        Self {
            inner: Rc::new(Inner {
                ctx,
                state: RefCell::new(SessionState::default()),
                listeners: RefCell::new(vec![]),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.inner.ctx.article_id.is_some()
    }

    // ---- observation ----

    pub fn subscribe(&self, f: impl Fn(DraftChange) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.listeners.borrow_mut().retain(|(l, _)| *l != id);
    }

    fn notify(&self, change: DraftChange) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for l in listeners {
            l(change);
        }
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        f(&self.inner.state.borrow())
    }

    pub fn title(&self) -> String {
        self.read(|s| s.draft.title.clone())
    }

    pub fn body(&self) -> String {
        self.read(|s| s.draft.body.clone())
    }

    pub fn category(&self) -> Category {
        self.read(|s| s.draft.category)
    }

    pub fn tags_raw(&self) -> String {
        self.read(|s| s.draft.tags_raw.clone())
    }

    pub fn tags(&self) -> Vec<String> {
        self.read(|s| s.draft.tags())
    }

    pub fn pending(&self) -> PendingAction {
        self.read(|s| s.pending)
    }

    pub fn title_suggestions(&self) -> Vec<String> {
        self.read(|s| s.title_suggestions.clone())
    }

    pub fn is_saving(&self) -> bool {
        self.read(|s| s.saving)
    }

    // ---- direct mutation ----

    pub fn set_title(&self, value: impl Into<String>) {
        self.inner.state.borrow_mut().draft.title = value.into();
        self.notify(DraftChange::Title);
    }

    pub fn set_category(&self, value: Category) {
        self.inner.state.borrow_mut().draft.category = value;
        self.notify(DraftChange::Category);
    }

    pub fn set_tags_raw(&self, value: impl Into<String>) {
        self.inner.state.borrow_mut().draft.tags_raw = value.into();
        self.notify(DraftChange::Tags);
    }

    pub fn set_body(&self, value: impl Into<String>, origin: BodyOrigin) {
        self.inner.state.borrow_mut().draft.body = value.into();
        self.notify(DraftChange::Body(origin));
    }

    /// Replace every field from a fetched article.
    pub fn hydrate(&self, article: &Article) {
        let d = Draft::from_article(article);
        {
            let mut st = self.inner.state.borrow_mut();
            st.draft.title = d.title;
            st.draft.category = d.category;
            st.draft.tags_raw = d.tags_raw;
            st.title_suggestions.clear();
        }
        self.notify(DraftChange::Title);
        self.notify(DraftChange::Category);
        self.notify(DraftChange::Tags);
        self.notify(DraftChange::TitleSuggestions);
        self.set_body(d.body, BodyOrigin::External);
    }

    pub fn accept_title_suggestion(&self, value: impl Into<String>) {
        {
            let mut st = self.inner.state.borrow_mut();
            st.draft.title = value.into();
            st.title_suggestions.clear();
        }
        self.notify(DraftChange::Title);
        self.notify(DraftChange::TitleSuggestions);
    }

    pub fn dismiss_title_suggestions(&self) {
        self.inner.state.borrow_mut().title_suggestions.clear();
        self.notify(DraftChange::TitleSuggestions);
    }

    // ---- AI ----

    fn begin(&self, action: AiAction) -> Result<InFlight<'_>, DraftError> {
        {
            let mut st = self.inner.state.borrow_mut();
            if let PendingAction::Running(running) = st.pending {
                tracing::warn!(%action, %running, "AI action rejected while another is running");
                return Err(DraftError::Busy { running });
            }
            if !st.draft.has_content() {
                return Err(ValidationError::EmptyContent(action).into());
            }
            st.pending = PendingAction::Running(action);
        }
        tracing::debug!(%action, "AI action started");
        self.notify(DraftChange::Pending);
        Ok(InFlight {
            session: self,
            action,
        })
    }

    /// Rewrite the body (`improve`, `grammar`, `concise`) or stage title suggestions (`title`).
    ///
    /// On failure nothing but the gate changes.
    pub async fn run_transformation<A>(&self, ai: &A, mode: TransformMode) -> Result<AiOutcome, DraftError>
    where
        A: AiAssistant + ?Sized,
    {
        let flight = self.begin(mode.into())?;
        let body = self.body();

        let applied = match ai.transform(&body, mode).await {
            Ok(TransformResult::Titles(titles)) if mode == TransformMode::Title => {
                let n = titles.len();
                self.inner.state.borrow_mut().title_suggestions = titles;
                self.notify(DraftChange::TitleSuggestions);
                Ok(AiOutcome::TitlesSuggested(n))
            }
            Ok(TransformResult::Body(next)) if mode != TransformMode::Title => {
                self.set_body(next, BodyOrigin::External);
                Ok(AiOutcome::BodyReplaced(mode))
            }
            Ok(_) => Err(DraftError::Service(ApiError::parse(format!(
                "unexpected result shape for mode {mode}"
            )))),
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &applied {
            tracing::warn!(%mode, error = %e, "AI transformation failed");
        }
        drop(flight);
        applied
    }

    /// Ask for tags and merge them into the existing ones.
    pub async fn request_tag_suggestions<A>(&self, ai: &A) -> Result<AiOutcome, DraftError>
    where
        A: AiAssistant + ?Sized,
    {
        let flight = self.begin(AiAction::Tags)?;
        let (body, title) = self.read(|s| (s.draft.body.clone(), s.draft.title.clone()));

        let applied = match ai.suggest_tags(&body, &title).await {
            Ok(suggested) => {
                // Merge against the tags as they are now, not as they were at request time.
                let current = self.tags();
                let merged = merge_tags(&current, &suggested);
                let added = merged.len() - current.len();
                self.set_tags_raw(join_tags(&merged));
                Ok(AiOutcome::TagsMerged { added })
            }
            Err(e) => {
                tracing::warn!(error = %e, "tag suggestion failed");
                Err(e.into())
            }
        };

        drop(flight);
        applied
    }

    // ---- persistence ----

    pub fn validate_for_submission(&self) -> Result<ArticlePayload, ValidationError> {
        self.read(|s| {
            let missing = s.draft.missing_fields();
            if missing.is_empty() {
                Ok(s.draft.to_payload())
            } else {
                Err(ValidationError::MissingFields(missing))
            }
        })
    }

    /// Fetch a persisted article and hydrate the draft from it.
    pub async fn load<S>(&self, store: &S, id: &str) -> Result<(), DraftError>
    where
        S: ArticleStore + ?Sized,
    {
        let article = store.fetch_article(id).await?;
        if let Some(user) = &self.inner.ctx.author {
            if !article.is_authored_by(user) {
                tracing::warn!(article_id = %article.id, user_id = %user.id, "editing an article owned by another author");
            }
        }
        self.hydrate(&article);
        Ok(())
    }

    /// Create or update the article. Validation runs first; a failing
    /// draft never reaches the store.
    pub async fn submit<S>(&self, store: &S) -> Result<Submitted, DraftError>
    where
        S: ArticleStore + ?Sized,
    {
        let payload = self.validate_for_submission()?;
        {
            let mut st = self.inner.state.borrow_mut();
            if st.saving {
                return Err(DraftError::SubmitInFlight);
            }
            st.saving = true;
        }
        self.notify(DraftChange::Saving);
        let _saving = Saving(self);

        let submitted = match self.inner.ctx.article_id.clone() {
            Some(id) => {
                store.update_article(&id, &payload).await?;
                Submitted {
                    article_id: id,
                    created: false,
                }
            }
            None => {
                let article = store.create_article(&payload).await?;
                Submitted {
                    article_id: article.id,
                    created: true,
                }
            }
        };

        let author = self.inner.ctx.author.as_ref().map(|u| u.id.as_str());
        tracing::info!(article_id = %submitted.article_id, created = submitted.created, ?author, "article saved");
        Ok(submitted)
    }
}

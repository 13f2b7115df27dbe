mod articles;
mod draft_session;

pub(crate) use articles::{delete_article, remove_row, DELETED_NOTICE, DELETE_CONFIRMATION};

pub(crate) use draft_session::{
    BodyOrigin, DraftChange, DraftContext, DraftError, DraftSession, ListenerId, PendingAction,
};

use crate::api::ApiClient;
use crate::models::User;
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

/// A transient message shown above a form or page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<User>>,
    /// Survives one navigation, e.g. "Article published" shown on the article page.
    pub flash: RwSignal<Option<Notice>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            current_user: RwSignal::new(load_user_from_storage()),
            flash: RwSignal::new(None),
        }
    }

    /// Drop the token and user, both in memory and in storage.
    pub fn sign_out(&self) {
        let mut api_client = self.api_client.get_untracked();
        api_client.logout();
        self.api_client.set(api_client);
        self.current_user.set(None);
    }

    /// Flash and clear in one step.
    pub fn take_flash(&self) -> Option<Notice> {
        let notice = self.flash.get_untracked();
        if notice.is_some() {
            self.flash.set(None);
        }
        notice
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

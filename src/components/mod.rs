pub mod ai_assistant;
pub mod notice;
pub mod title_suggestions;
pub mod ui;

pub(crate) use ai_assistant::AiAssistantPanel;
pub(crate) use notice::NoticeBanner;
pub(crate) use title_suggestions::TitleSuggestionList;

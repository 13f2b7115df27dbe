use super::{EditorBridge, RichTextSurface};
use icons::{
    Bold, Code, Heading1, Heading2, Heading3, Highlighter, Italic, List, ListOrdered, Minus, Quote,
    Redo2, Strikethrough, Underline, Undo2,
};
use leptos::html;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;

/// `contenteditable` element used as the rich-text surface.
///
/// Writing `innerHTML` never fires `input`, so pushes are silent by construction.
pub(crate) struct ContentEditableSurface {
    el: web_sys::HtmlElement,
}

impl ContentEditableSurface {
    pub fn new(el: web_sys::HtmlElement) -> Self {
        Self { el }
    }
}

impl RichTextSurface for ContentEditableSurface {
    fn content(&self) -> String {
        self.el.inner_html()
    }

    fn set_content_silent(&self, html: &str) {
        self.el.set_inner_html(html);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tool {
    Bold,
    Italic,
    Underline,
    Strike,
    Highlight,
    H1,
    H2,
    H3,
    BulletList,
    OrderedList,
    CodeBlock,
    Blockquote,
    Rule,
    Undo,
    Redo,
}

const TOOL_GROUPS: &[&[Tool]] = &[
    &[Tool::Bold, Tool::Italic, Tool::Underline, Tool::Strike, Tool::Highlight],
    &[Tool::H1, Tool::H2, Tool::H3],
    &[
        Tool::BulletList,
        Tool::OrderedList,
        Tool::CodeBlock,
        Tool::Blockquote,
        Tool::Rule,
    ],
    &[Tool::Undo, Tool::Redo],
];

impl Tool {
    fn title(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Strike => "Strikethrough",
            Self::Highlight => "Highlight",
            Self::H1 => "Heading 1",
            Self::H2 => "Heading 2",
            Self::H3 => "Heading 3",
            Self::BulletList => "Bullet List",
            Self::OrderedList => "Ordered List",
            Self::CodeBlock => "Code Block",
            Self::Blockquote => "Blockquote",
            Self::Rule => "Horizontal Rule",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
        }
    }

    /// `document.execCommand` name and value.
    fn command(self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::Bold => ("bold", None),
            Self::Italic => ("italic", None),
            Self::Underline => ("underline", None),
            Self::Strike => ("strikeThrough", None),
            Self::Highlight => ("hiliteColor", Some("#fef08a")),
            Self::H1 => ("formatBlock", Some("h1")),
            Self::H2 => ("formatBlock", Some("h2")),
            Self::H3 => ("formatBlock", Some("h3")),
            Self::BulletList => ("insertUnorderedList", None),
            Self::OrderedList => ("insertOrderedList", None),
            Self::CodeBlock => ("formatBlock", Some("pre")),
            Self::Blockquote => ("formatBlock", Some("blockquote")),
            Self::Rule => ("insertHorizontalRule", None),
            Self::Undo => ("undo", None),
            Self::Redo => ("redo", None),
        }
    }

    /// Only inline marks have a queryable on/off state.
    fn state_command(self) -> Option<&'static str> {
        match self {
            Self::Bold | Self::Italic | Self::Underline => Some(self.command().0),
            Self::Strike => Some("strikeThrough"),
            Self::BulletList => Some("insertUnorderedList"),
            Self::OrderedList => Some("insertOrderedList"),
            _ => None,
        }
    }

    fn icon(self) -> AnyView {
        match self {
            Self::Bold => view! { <Bold class="size-4" /> }.into_any(),
            Self::Italic => view! { <Italic class="size-4" /> }.into_any(),
            Self::Underline => view! { <Underline class="size-4" /> }.into_any(),
            Self::Strike => view! { <Strikethrough class="size-4" /> }.into_any(),
            Self::Highlight => view! { <Highlighter class="size-4" /> }.into_any(),
            Self::H1 => view! { <Heading1 class="size-4" /> }.into_any(),
            Self::H2 => view! { <Heading2 class="size-4" /> }.into_any(),
            Self::H3 => view! { <Heading3 class="size-4" /> }.into_any(),
            Self::BulletList => view! { <List class="size-4" /> }.into_any(),
            Self::OrderedList => view! { <ListOrdered class="size-4" /> }.into_any(),
            Self::CodeBlock => view! { <Code class="size-4" /> }.into_any(),
            Self::Blockquote => view! { <Quote class="size-4" /> }.into_any(),
            Self::Rule => view! { <Minus class="size-4" /> }.into_any(),
            Self::Undo => view! { <Undo2 class="size-4" /> }.into_any(),
            Self::Redo => view! { <Redo2 class="size-4" /> }.into_any(),
        }
    }
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

fn run_tool(tool: Tool) {
    let Some(doc) = html_document() else {
        return;
    };
    let (cmd, value) = tool.command();
    let _ = match value {
        Some(v) => doc.exec_command_with_show_ui_and_value(cmd, false, v),
        None => doc.exec_command(cmd),
    };
}

fn tool_is_active(tool: Tool) -> bool {
    let Some(cmd) = tool.state_command() else {
        return false;
    };
    html_document()
        .and_then(|d| d.query_command_state(cmd).ok())
        .unwrap_or(false)
}

/// Rich-text surface wired to an [`EditorBridge`].
#[component]
pub(crate) fn RichTextEditor(
    bridge: StoredValue<Rc<EditorBridge<ContentEditableSurface>>, LocalStorage>,
    #[prop(into, optional)] placeholder: String,
) -> impl IntoView {
    let surface_ref: NodeRef<html::Div> = NodeRef::new();
    // Bumped on edits and selection moves so toolbar state is re-read.
    let selection_tick: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move |_| {
        if let Some(el) = surface_ref.get() {
            let el: web_sys::HtmlElement = el.into();
            bridge.with_value(|b| b.attach(ContentEditableSurface::new(el)));
        }
    });

    on_cleanup(move || {
        let _ = bridge.try_with_value(|b| b.detach());
    });

    let groups = TOOL_GROUPS
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let buttons = group
                .iter()
                .map(|&tool| {
                    let active = move || {
                        selection_tick.track();
                        tool_is_active(tool)
                    };
                    view! {
                        <button
                            type="button"
                            title=tool.title()
                            class=move || {
                                if active() {
                                    "inline-flex h-8 w-8 items-center justify-center rounded-md bg-accent text-accent-foreground"
                                } else {
                                    "inline-flex h-8 w-8 items-center justify-center rounded-md text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                                }
                            }
                            // mousedown keeps focus (and the selection) inside the surface.
                            on:mousedown=move |ev: web_sys::MouseEvent| {
                                ev.prevent_default();
                                run_tool(tool);
                                selection_tick.update(|t| *t += 1);
                            }
                        >
                            {tool.icon()}
                        </button>
                    }
                })
                .collect_view();

            view! {
                {(i != 0).then(|| view! { <div class="mx-1 h-5 w-px bg-border" /> })}
                <div class="flex items-center gap-0.5">{buttons}</div>
            }
        })
        .collect_view();

    view! {
        <div data-name="RichTextEditor" class="rounded-md border border-input bg-background">
            <div class="flex flex-wrap items-center gap-1 border-b border-input px-2 py-1">
                {groups}
            </div>
            <div
                node_ref=surface_ref
                contenteditable="true"
                data-placeholder=placeholder
                class="prose prose-sm min-h-[320px] max-w-none px-4 py-3 outline-none empty:before:text-muted-foreground empty:before:content-[attr(data-placeholder)]"
                on:input=move |_| {
                    if let Some(el) = surface_ref.get_untracked() {
                        let html = el.inner_html();
                        bridge.with_value(|b| b.on_surface_edit(html));
                    }
                    selection_tick.update(|t| *t += 1);
                }
                on:keyup=move |_| selection_tick.update(|t| *t += 1)
                on:mouseup=move |_| selection_tick.update(|t| *t += 1)
            ></div>
        </div>
    }
}

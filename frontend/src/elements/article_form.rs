use std::rc::Rc;

use dominator::{events, html, Dom};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, Signal, SignalExt};
use wasm_bindgen_futures::spawn_local;

use shared::types::{Article, ArticleDraft, Topic};
use shared::utils::{draft_ready, validate_draft};

use crate::constants::{PROP_DISABLED, PROP_ID, PROP_NAME, PROP_PLACEHOLDER, PROP_VALUE, TAG_BUTTON, TAG_DIV, TAG_INPUT, TAG_OPTION, TAG_SELECT, TAG_TEXTAREA};
use crate::controller::Controller;
use crate::utils::get_input_value;

const FIELD_TITLE: &str = "title";
const FIELD_TEXT: &str = "text";
const FIELD_TOPIC: &str = "topic";

fn css_class(label: &str) -> String {
    format!("article-form__{label}")
}

#[derive(Clone)]
struct FormValues {
    title: Mutable<String>,
    text: Mutable<String>,
    topic: Mutable<String>,
}

impl FormValues {
    fn new() -> Self {
        Self {
            title: Mutable::new(String::new()),
            text: Mutable::new(String::new()),
            topic: Mutable::new(String::new()),
        }
    }

    fn fill(&self, article: Option<Article>) {
        match article {
            Some(article) => {
                self.title.set(article.title);
                self.text.set(article.text);
                self.topic.set(article.topic.to_string());
            }
            None => {
                self.title.set(String::new());
                self.text.set(String::new());
                self.topic.set(String::new());
            }
        }
    }

    fn read(&self) {
        self.title.set_neq(get_input_value(FIELD_TITLE));
        self.text.set_neq(get_input_value(FIELD_TEXT));
        self.topic.set_neq(get_input_value(FIELD_TOPIC));
    }

    fn draft(&self) -> Option<ArticleDraft> {
        let topic = Topic::parse(&self.topic.lock_ref())?;
        let draft = ArticleDraft {
            title: self.title.get_cloned(),
            text: self.text.get_cloned(),
            topic,
        };
        validate_draft(&draft).ok()
    }
}

pub fn article_form(controller: Rc<Controller>) -> Dom {
    let values = FormValues::new();
    let state = controller.state();
    html!(TAG_DIV, {
        .class(css_class("form"))
        .attr(PROP_ID, "articleForm")
        .future(state.current_article_id.signal().for_each({
            let controller = controller.clone();
            let values = values.clone();
            move |_| {
                values.fill(controller.state().current_article());
                async {}
            }
        }))
        .children([
            html!("h2", {
                .text_signal(state.current_article_id.signal().map(|id| match id {
                    Some(_) => "Edit Article",
                    None => "Create Article",
                }))
            }),
            html!(TAG_INPUT, {
                .attr(PROP_ID, FIELD_TITLE)
                .attr(PROP_NAME, FIELD_TITLE)
                .attr(PROP_PLACEHOLDER, "Enter title")
                .prop_signal(PROP_VALUE, values.title.signal_cloned())
                .event({
                    let values = values.clone();
                    move |_: events::Input| values.read()
                })
            }),
            html!(TAG_TEXTAREA, {
                .attr(PROP_ID, FIELD_TEXT)
                .attr(PROP_NAME, FIELD_TEXT)
                .attr(PROP_PLACEHOLDER, "Enter text")
                .prop_signal(PROP_VALUE, values.text.signal_cloned())
                .event({
                    let values = values.clone();
                    move |_: events::Input| values.read()
                })
            }),
            html!(TAG_SELECT, {
                .attr(PROP_ID, FIELD_TOPIC)
                .attr(PROP_NAME, FIELD_TOPIC)
                .children(topic_options())
                .prop_signal(PROP_VALUE, values.topic.signal_cloned())
                .event({
                    let values = values.clone();
                    move |_: events::Change| values.read()
                })
            }),
            html!(TAG_DIV, {
                .class(css_class("buttons"))
                .children([
                    html!(TAG_BUTTON, {
                        .attr(PROP_ID, "submitArticle")
                        .text("Submit")
                        .prop_signal(PROP_DISABLED, disabled_signal(&values))
                        .event({
                            let controller = controller.clone();
                            let values = values.clone();
                            move |_: events::Click| submit(&controller, &values)
                        })
                    }),
                ])
                .child_signal(state.current_article_id.signal().map({
                    let controller = controller.clone();
                    move |id| id.map(|_| cancel_button(controller.clone()))
                }))
            }),
        ])
    })
}

fn topic_options() -> Vec<Dom> {
    let mut options = vec![html!(TAG_OPTION, {
        .attr(PROP_VALUE, "")
        .text("-- Select topic --")
    })];
    options.extend(Topic::ALL.iter().map(|topic| html!(TAG_OPTION, {
        .attr(PROP_VALUE, topic.as_str())
        .text(topic.as_str())
    })));
    options
}

fn cancel_button(controller: Rc<Controller>) -> Dom {
    html!(TAG_BUTTON, {
        .text("Cancel edit")
        .event(move |_: events::Click| controller.set_current_article_id(None))
    })
}

fn disabled_signal(values: &FormValues) -> impl Signal<Item=bool> {
    map_ref! {
        let title = values.title.signal_cloned(),
        let text = values.text.signal_cloned(),
        let topic = values.topic.signal_cloned() => !draft_ready(title, text, topic)
    }
}

/// Creates when nothing is selected, otherwise updates the selection.
/// The form keeps its input until the server accepts it.
fn submit(controller: &Rc<Controller>, values: &FormValues) {
    values.read();
    let Some(draft) = values.draft() else { return };
    let selected = controller.state().current_article_id.get();

    let controller = controller.clone();
    let values = values.clone();
    spawn_local(async move {
        let accepted = match selected {
            Some(article_id) => controller.update_article(article_id, draft).await,
            None => controller.create_article(draft).await,
        };
        if accepted {
            values.fill(None);
            controller.set_current_article_id(None);
        }
    });
}

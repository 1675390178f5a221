use std::rc::Rc;

use dominator::{events, html, Dom};
use futures_signals::signal::{Signal, SignalExt};
use futures_signals::signal_vec::SignalVecExt;
use wasm_bindgen_futures::spawn_local;

use shared::types::Article;

use crate::constants::{PROP_DISABLED, TAG_BUTTON, TAG_DIV};
use crate::controller::Controller;
use crate::elements::article_form::article_form;
use crate::utils::set_title;

fn css_class(label: &str) -> String {
    format!("app-articles__{label}")
}

pub fn articles_page(controller: Rc<Controller>) -> Dom {
    set_title("Articles");
    html!(TAG_DIV, {
        .class(css_class("page"))
        .future({
            let controller = controller.clone();
            async move { controller.fetch_articles().await }
        })
        .children([
            article_form(controller.clone()),
            articles_list(controller),
        ])
    })
}

fn articles_list(controller: Rc<Controller>) -> Dom {
    let state = controller.state();
    html!(TAG_DIV, {
        .class(css_class("list"))
        .children([
            html!("h2", {
                .text("Articles")
            }),
        ])
        .child_signal(state.articles.signal_vec_cloned().len().map(|len| {
            if len == 0 {
                Some(html!(TAG_DIV, {
                    .class(css_class("empty"))
                    .text("No articles yet")
                }))
            } else {
                None
            }
        }))
        .child(html!(TAG_DIV, {
            .class(css_class("cards"))
            .children_signal_vec(state.articles.signal_vec_cloned().map({
                let controller = controller.clone();
                move |article| article_card(controller.clone(), article)
            }))
        }))
    })
}

fn article_card(controller: Rc<Controller>, article: Article) -> Dom {
    let article_id = article.article_id;
    html!(TAG_DIV, {
        .class(css_class("article"))
        .children([
            html!("h3", {
                .text(&article.title)
            }),
            html!("p", {
                .text(&article.text)
            }),
            html!("p", {
                .class(css_class("topic"))
                .text(&format!("Topic: {}", article.topic))
            }),
            html!(TAG_DIV, {
                .class(css_class("buttons"))
                .children([
                    html!(TAG_BUTTON, {
                        .text("Edit")
                        .prop_signal(PROP_DISABLED, editing_signal(&controller))
                        .event({
                            let controller = controller.clone();
                            move |_: events::Click| controller.set_current_article_id(Some(article_id))
                        })
                    }),
                    html!(TAG_BUTTON, {
                        .text("Delete")
                        .prop_signal(PROP_DISABLED, editing_signal(&controller))
                        .event(move |_: events::Click| {
                            let controller = controller.clone();
                            spawn_local(async move {
                                controller.delete_article(article_id).await;
                            });
                        })
                    }),
                ])
            }),
        ])
    })
}

fn editing_signal(controller: &Controller) -> impl Signal<Item=bool> {
    controller.state().current_article_id.signal().map(|id| id.is_some())
}

use std::rc::Rc;

use dominator::{events, html, Dom, EventOptions};
use futures_signals::signal::{Mutable, SignalExt};

use crate::constants::{PROP_HREF, PROP_ID, TAG_BUTTON, TAG_DIV};
use crate::controller::Controller;
use crate::elements::app_articles::articles_page;
use crate::elements::app_login::login_page;
use crate::router::route_sync;
use crate::state::Route;

fn css_class(label: &str) -> String {
    format!("app-root__{label}")
}

pub fn app_root(controller: Rc<Controller>) -> Dom {
    let state = controller.state();
    html!(TAG_DIV, {
        .class(css_class("container"))
        .future(route_sync(state.route.clone()))
        .children([
            html!(TAG_DIV, {
                .class(css_class("spinner"))
                .attr(PROP_ID, "spinner")
                .visible_signal(state.spinner_on.signal())
                .text("Please wait...")
            }),
            html!(TAG_DIV, {
                .class(css_class("message"))
                .attr(PROP_ID, "message")
                .text_signal(state.message.signal_cloned())
            }),
            html!(TAG_BUTTON, {
                .attr(PROP_ID, "logout")
                .text("Logout from app")
                .event({
                    let controller = controller.clone();
                    move |_: events::Click| controller.logout()
                })
            }),
            html!(TAG_DIV, {
                .attr(PROP_ID, "wrapper")
                .style_signal("opacity", state.spinner_on.signal().map(|on| if on { "0.25" } else { "1" }))
                .children([
                    html!("h1", {
                        .text("Advanced Web Applications")
                    }),
                    html!("nav", {
                        .children([
                            nav_link("loginScreen", "Login", Route::Login, state.route.clone()),
                            nav_link("articlesScreen", "Articles", Route::Articles, state.route.clone()),
                        ])
                    }),
                ])
                .child_signal(state.route.signal().map({
                    let controller = controller.clone();
                    move |route| Some(match route {
                        Route::Login => login_page(controller.clone()),
                        Route::Articles => articles_page(controller.clone()),
                    })
                }))
                .child(html!("footer", {
                    .text("Articles client 2024")
                }))
            }),
        ])
    })
}

fn nav_link(id: &str, label: &str, target: Route, route: Mutable<Route>) -> Dom {
    html!("a", {
        .attr(PROP_ID, id)
        .attr(PROP_HREF, target.path())
        .class_signal("active", route.signal().map(move |current| current == target))
        .text(label)
        .event_with_options(&EventOptions::preventable(), move |ev: events::Click| {
            ev.prevent_default();
            route.set_neq(target);
        })
    })
}

use std::rc::Rc;

use dominator::{events, html, Dom};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, Signal};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use shared::constants::INPUT_MAX_LEN;
use shared::utils::credentials_ready;

use crate::constants::{PROP_DISABLED, PROP_ID, PROP_MAX_LENGTH, PROP_NAME, PROP_PLACEHOLDER, PROP_TYPE, TAG_BUTTON, TAG_DIV, TAG_INPUT};
use crate::controller::Controller;
use crate::utils::{get_input_value, query_selector, set_title};

const KEY_ENTER: &str = "Enter";
const FIELD_USERNAME: &str = "username";
const FIELD_PASSWORD: &str = "password";

fn css_class(label: &str) -> String {
    format!("app-login__{label}")
}

#[derive(Clone)]
struct LoginValues {
    username: Mutable<String>,
    password: Mutable<String>,
}

impl LoginValues {
    fn new() -> Self {
        Self {
            username: Mutable::new(String::new()),
            password: Mutable::new(String::new()),
        }
    }

    fn read(&self) {
        self.username.set_neq(get_input_value(FIELD_USERNAME));
        self.password.set_neq(get_input_value(FIELD_PASSWORD));
    }

    fn ready(&self) -> bool {
        credentials_ready(&self.username.lock_ref(), &self.password.lock_ref())
    }
}

pub fn login_page(controller: Rc<Controller>) -> Dom {
    set_title("Login");
    let values = LoginValues::new();
    html!(TAG_DIV, {
        .class(css_class("form"))
        .attr(PROP_ID, "loginForm")
        .children([
            html!("h2", {
                .text("Login")
            }),
            html!(TAG_INPUT, {
                .class(css_class("input"))
                .attr(PROP_ID, FIELD_USERNAME)
                .attr(PROP_NAME, FIELD_USERNAME)
                .attr(PROP_PLACEHOLDER, "Enter username")
                .attr(PROP_MAX_LENGTH, &INPUT_MAX_LEN.to_string())
                .event({
                    let values = values.clone();
                    move |_: events::Input| values.read()
                })
                .event(|ev: events::KeyDown| {
                    if ev.key() == KEY_ENTER {
                        if let Some(elem) = query_selector(&format!("[name={FIELD_PASSWORD}]")) {
                            if let Ok(elem) = elem.dyn_into::<HtmlElement>() {
                                elem.focus().ok();
                            }
                        }
                    }
                })
            }),
            html!(TAG_INPUT, {
                .class(css_class("input"))
                .attr(PROP_ID, FIELD_PASSWORD)
                .attr(PROP_NAME, FIELD_PASSWORD)
                .attr(PROP_TYPE, "password")
                .attr(PROP_PLACEHOLDER, "Enter password")
                .attr(PROP_MAX_LENGTH, &INPUT_MAX_LEN.to_string())
                .event({
                    let values = values.clone();
                    move |_: events::Input| values.read()
                })
                .event({
                    let values = values.clone();
                    let controller = controller.clone();
                    move |ev: events::KeyDown| {
                        if ev.key() == KEY_ENTER {
                            submit(&controller, &values);
                        }
                    }
                })
            }),
            html!(TAG_BUTTON, {
                .attr(PROP_ID, "submitCredentials")
                .text("Submit credentials")
                .prop_signal(PROP_DISABLED, disabled_signal(&values))
                .event({
                    let values = values.clone();
                    move |_: events::Click| submit(&controller, &values)
                })
            }),
        ])
    })
}

fn disabled_signal(values: &LoginValues) -> impl Signal<Item=bool> {
    map_ref! {
        let username = values.username.signal_cloned(),
        let password = values.password.signal_cloned() => !credentials_ready(username, password)
    }
}

fn submit(controller: &Rc<Controller>, values: &LoginValues) {
    values.read();
    if !values.ready() {
        return;
    }
    let controller = controller.clone();
    let username = values.username.get_cloned();
    let password = values.password.get_cloned();
    spawn_local(async move {
        controller.login(&username, &password).await;
    });
}

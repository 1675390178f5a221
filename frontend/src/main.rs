use std::rc::Rc;

use crate::connect_fetch::{ApiClient, FetchTransport};
use crate::constants::API_BASE;
use crate::controller::Controller;
use crate::elements::app_root::app_root;
use crate::router::current_route;
use crate::session::browser_session;
use crate::state::AppState;

mod elements;
mod utils;
mod constants;
mod state;
mod session;
mod router;
mod controller;
mod connect_fetch;
#[cfg(test)]
mod mock;

pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("api: {API_BASE}");

    let api = ApiClient::new(Rc::new(FetchTransport::new(API_BASE)));
    let controller = Controller::new(AppState::new(current_route()), api, browser_session());
    dominator::append_dom(&dominator::body(), app_root(Rc::new(controller)));
}

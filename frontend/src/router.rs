use std::future::Future;

use dominator::routing;
use futures::future::{join, FutureExt};
use futures_signals::signal::{Mutable, SignalExt};

use crate::state::Route;

pub fn current_route() -> Route {
    Route::from_href(&routing::url().get_cloned())
}

/// Keeps the browser URL and the route in step, whichever side moves first.
pub fn route_sync(route: Mutable<Route>) -> impl Future<Output=()> {
    let from_url = {
        let route = route.clone();
        routing::url().signal_cloned().for_each(move |href| {
            route.set_neq(Route::from_href(&href));
            async {}
        })
    };

    let to_url = route.signal().for_each(|route| {
        if current_route() != route {
            log::info!("navigate: {}", route.path());
            routing::go_to_url(route.path());
        }
        async {}
    });

    join(from_url, to_url).map(|_| ())
}

use gloo::events::EventListener;
use serde_json::json;
use web_sys::{window, Document, DocumentReadyState, Element};
use yew::prelude::*;

use crate::config::{RuntimeConfig, BEHAVIOR_ROOT_ID};
use crate::handlers::{self, Page};
use crate::logging::{log_event, LogLevel};

/// Renders nothing; owns every page behavior for as long as it is mounted.
#[function_component(Behaviors)]
fn behaviors() -> Html {
    use_effect_with((), move |_| {
        let installed = match Page::current() {
            Ok(page) => Some(handlers::install(&page)),
            Err(err) => {
                log_event(
                    &RuntimeConfig::default(),
                    LogLevel::Warn,
                    "behaviors.install_failed",
                    json!({ "behavior": "page", "error": err.to_string() }),
                );
                None
            }
        };
        move || drop(installed)
    });

    html! {}
}

fn behavior_root(document: &Document) -> Option<Element> {
    if let Some(existing) = document.get_element_by_id(BEHAVIOR_ROOT_ID) {
        return Some(existing);
    }

    let host = document.create_element("div").ok()?;
    host.set_id(BEHAVIOR_ROOT_ID);
    let _ = host.set_attribute("hidden", "");
    document.body()?.append_child(&host).ok()?;
    Some(host)
}

fn mount(document: &Document) {
    let Some(host) = behavior_root(document) else {
        log_event(
            &RuntimeConfig::default(),
            LogLevel::Warn,
            "behaviors.install_failed",
            json!({ "behavior": "mount", "error": "no body to mount into" }),
        );
        return;
    };

    yew::Renderer::<Behaviors>::with_root(host).render();
}

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == DocumentReadyState::Loading {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| mount(&document)).forget();
    } else {
        mount(&document);
    }
}

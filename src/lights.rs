use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::random::page_rng;
use artwall_core::LightParams;

const LIGHT_SELECTOR: &str = ".lights span";

thread_local! {
    static LIGHT_LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

pub(crate) fn start() {
    let Some(document) = dom::document() else {
        return;
    };
    let Ok(nodes) = document.query_selector_all(LIGHT_SELECTOR) else {
        return;
    };
    if nodes.length() == 0 {
        return;
    }
    let rng = Rc::new(RefCell::new(page_rng()));
    let mut listeners = Vec::with_capacity(nodes.length() as usize);
    for idx in 0..nodes.length() {
        let light = nodes
            .item(idx)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok());
        let Some(light) = light else {
            continue;
        };
        randomize(&light, &rng, true);
        let target = light.clone();
        let rng = rng.clone();
        listeners.push(EventListener::new(&light, "animationiteration", move |_| {
            randomize(&target, &rng, false);
        }));
    }
    LIGHT_LISTENERS.with(|slot| slot.borrow_mut().extend(listeners));
}

fn randomize(light: &HtmlElement, rng: &RefCell<SmallRng>, initial: bool) {
    let params = LightParams::random(&mut *rng.borrow_mut(), initial);
    for (name, value) in params.css_vars() {
        dom::set_css_var(light, name, &value);
    }
}

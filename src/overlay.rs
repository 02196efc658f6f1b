use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlImageElement, KeyboardEvent, Node};

use crate::dom::{self, element_by_id};
use artwall_core::{with_query_id, AddressUpdate, CardData, Dismissal, ModalView, Overlays};

struct OverlayElements {
    modal: Element,
    title: Element,
    image: HtmlImageElement,
    creator: Element,
    medium: Element,
    grade: Element,
    size: Element,
    concept: Element,
    story: Element,
    contact: Element,
    modal_close: Element,
    view_full: Element,
    fullview: Element,
    fullview_image: HtmlImageElement,
    fullview_close: Element,
}

impl OverlayElements {
    fn lookup() -> Result<Self, JsValue> {
        Ok(Self {
            modal: element_by_id("modal")?,
            title: element_by_id("modalTitle")?,
            image: element_by_id("modalImage")?,
            creator: element_by_id("modalCreator")?,
            medium: element_by_id("modalMedium")?,
            grade: element_by_id("modalGrade")?,
            size: element_by_id("modalSize")?,
            concept: element_by_id("modalConcept")?,
            story: element_by_id("modalStory")?,
            contact: element_by_id("modalContact")?,
            modal_close: element_by_id("modalClose")?,
            view_full: element_by_id("viewFullBtn")?,
            fullview: element_by_id("fullview")?,
            fullview_image: element_by_id("fullviewImage")?,
            fullview_close: element_by_id("fullviewClose")?,
        })
    }

    fn show_modal(&self, view: &ModalView) {
        self.title.set_text_content(Some(&view.title));
        self.image.set_src(&view.image);
        self.image.set_alt(&view.alt);
        self.creator.set_text_content(Some(&view.creator));
        self.medium.set_text_content(Some(&view.medium));
        self.grade.set_text_content(Some(&view.grade));
        self.size.set_text_content(Some(&view.size));
        self.concept.set_text_content(Some(&view.concept));
        self.story.set_text_content(Some(&view.story));
        self.contact.set_text_content(Some(&view.contact));
        dom::set_active(&self.modal, true);
    }
}

pub(crate) struct OverlayController {
    state: RefCell<Overlays>,
    elements: OverlayElements,
    listeners: RefCell<Vec<EventListener>>,
}

impl OverlayController {
    pub(crate) fn install() -> Result<Rc<Self>, JsValue> {
        let controller = Rc::new(Self {
            state: RefCell::new(Overlays::new()),
            elements: OverlayElements::lookup()?,
            listeners: RefCell::new(Vec::new()),
        });
        controller.wire()?;
        Ok(controller)
    }

    fn wire(self: &Rc<Self>) -> Result<(), JsValue> {
        let document = dom::document().ok_or_else(|| JsValue::from_str("missing document"))?;
        let els = &self.elements;
        let listeners = vec![
            on(self, &els.modal_close, "click", |this, _| this.close_modal()),
            on(self, &els.modal, "click", |this, event| {
                if is_backdrop(event, &this.elements.modal) {
                    this.close_modal();
                }
            }),
            on(self, &els.view_full, "click", |this, _| this.open_fullview()),
            on(self, &els.fullview_close, "click", |this, _| this.close_fullview()),
            on(self, &els.fullview, "click", |this, event| {
                if is_backdrop(event, &this.elements.fullview) {
                    this.close_fullview();
                }
            }),
            on(self, &document, "keyup", |this, event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if event.key() == "Escape" {
                    this.dismiss_top();
                }
            }),
        ];
        self.listeners.borrow_mut().extend(listeners);
        Ok(())
    }

    pub(crate) fn open_card(&self, card: &CardData) {
        let opened = self.state.borrow_mut().open_modal(card);
        self.elements.show_modal(&opened.view);
        if let Some(update) = opened.address {
            apply_address(&update);
        }
    }

    pub(crate) fn close_modal(&self) {
        let update = self.state.borrow_mut().close_modal();
        dom::set_active(&self.elements.modal, false);
        apply_address(&update);
    }

    pub(crate) fn open_fullview(&self) {
        let Some(full) = self.state.borrow_mut().open_fullview() else {
            return;
        };
        self.elements.fullview_image.set_src(&full.src);
        self.elements.fullview_image.set_alt(&full.alt);
        dom::set_active(&self.elements.fullview, true);
    }

    pub(crate) fn close_fullview(&self) {
        self.state.borrow_mut().close_fullview();
        dom::set_active(&self.elements.fullview, false);
    }

    pub(crate) fn dismiss_top(&self) {
        let dismissed = self.state.borrow_mut().dismiss_top();
        match dismissed {
            Dismissal::FullView => dom::set_active(&self.elements.fullview, false),
            Dismissal::Modal => {
                dom::set_active(&self.elements.modal, false);
                apply_address(&AddressUpdate::RemoveId);
            }
            Dismissal::Nothing => {}
        }
    }
}

fn on<F>(
    controller: &Rc<OverlayController>,
    target: &EventTarget,
    event: &'static str,
    handler: F,
) -> EventListener
where
    F: Fn(&OverlayController, &Event) + 'static,
{
    let weak: Weak<OverlayController> = Rc::downgrade(controller);
    EventListener::new(target, event, move |event| {
        if let Some(controller) = weak.upgrade() {
            handler(&controller, event);
        }
    })
}

fn is_backdrop(event: &Event, overlay: &Element) -> bool {
    let target = event.target();
    let target = target.as_ref().and_then(|target| target.dyn_ref::<Node>());
    overlay.is_same_node(target)
}

fn apply_address(update: &AddressUpdate) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(href) = window.location().href() else {
        return;
    };
    let next = match update {
        AddressUpdate::SetId(id) => with_query_id(&href, Some(id)),
        AddressUpdate::RemoveId => with_query_id(&href, None),
    };
    let next = match next {
        Ok(next) => next,
        Err(err) => {
            gloo::console::warn!("address not updated", err.to_string());
            return;
        }
    };
    if next == href {
        return;
    }
    if let Ok(history) = window.history() {
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&next)) {
            gloo::console::warn!("history replace failed", dom::js_err(err));
        }
    }
}

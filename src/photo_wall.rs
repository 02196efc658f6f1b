use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use js_sys::Reflect;
use rand::rngs::SmallRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Blob, BlobPropertyBag, Element, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, PageTransitionEvent, Url,
};

use crate::dom;
use crate::fetch::{fetch_bytes, fetch_image_list};
use crate::random::page_rng;
use artwall_core::wall::{pick_changes, plan_layouts, select_pool, FADE_MS, POOL_CAP};
use artwall_core::{
    BlobCache, Capabilities, CycleGate, GateAction, ImageRotation, PreloadQueue, WallSettings,
};

pub(crate) const WALL_ID: &str = "photoWall";
const FADING_CLASS: &str = "is-fading";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const SMALL_SCREEN_QUERY: &str = "(max-width: 768px)";
const LOW_MEMORY_GB: f64 = 4.0;
const SLOW_CONNECTIONS: &[&str] = &["slow-2g", "2g"];

thread_local! {
    static WALL: RefCell<Option<Rc<PhotoWall>>> = RefCell::new(None);
}

enum Preloaded {
    Cached(String),
    Direct,
}

pub(crate) struct PhotoWall {
    weak: Weak<PhotoWall>,
    container: Element,
    items: Vec<HtmlImageElement>,
    settings: WallSettings,
    rotation: RefCell<ImageRotation>,
    gate: RefCell<CycleGate>,
    cache: RefCell<BlobCache>,
    rng: RefCell<SmallRng>,
    interval: RefCell<Option<Interval>>,
    active: Cell<bool>,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>>,
}

pub(crate) fn start(images_url: String) {
    let container = match dom::element_by_id::<HtmlElement>(WALL_ID) {
        Ok(container) => container,
        Err(err) => {
            gloo::console::log!("photo wall absent", dom::js_err(err));
            return;
        }
    };
    spawn_local(async move {
        let sources = match fetch_image_list(&images_url).await {
            Ok(sources) => sources,
            Err(err) => {
                gloo::console::warn!("photo wall inert", err.to_string());
                return;
            }
        };
        if sources.is_empty() {
            gloo::console::log!("photo wall empty");
            return;
        }
        match PhotoWall::build(&container, sources, probe_capabilities()) {
            Ok(wall) => {
                wall.activate(&images_url);
                WALL.with(|slot| {
                    if let Some(previous) = slot.borrow_mut().replace(wall) {
                        previous.teardown();
                    }
                });
            }
            Err(err) => gloo::console::warn!("photo wall build failed", dom::js_err(err)),
        }
    });
}

impl PhotoWall {
    pub(crate) fn build(
        container: &Element,
        sources: Vec<String>,
        caps: Capabilities,
    ) -> Result<Rc<Self>, JsValue> {
        let document = dom::document().ok_or_else(|| JsValue::from_str("missing document"))?;
        let mut rng = page_rng();
        let settings = WallSettings::for_capabilities(&caps);
        let mut rotation = ImageRotation::new(select_pool(sources, POOL_CAP, &mut rng));
        let layouts = plan_layouts(settings.item_count, &mut rng);

        container.set_inner_html("");
        let mut items = Vec::with_capacity(layouts.len());
        for layout in &layouts {
            let Some(src) = rotation.next_source() else {
                break;
            };
            let frame = document.create_element("div")?;
            frame.set_class_name(&layout.class_name());
            frame.set_attribute("style", &layout.style())?;
            let image = document
                .create_element("img")?
                .dyn_into::<HtmlImageElement>()?;
            image.set_alt("");
            image.set_decoding("async");
            image.set_src(&src);
            frame.append_child(&image)?;
            container.append_child(&frame)?;
            items.push(image);
        }
        gloo::console::log!(
            "photo wall built",
            format!("{:?}", settings.tier),
            items.len(),
            rotation.pool().len()
        );

        let document_visible = !document.hidden();
        Ok(Rc::new_cyclic(|weak| Self {
            weak: weak.clone(),
            container: container.clone(),
            items,
            settings,
            rotation: RefCell::new(rotation),
            gate: RefCell::new(CycleGate::new(settings.cycles(), document_visible)),
            cache: RefCell::new(BlobCache::new()),
            rng: RefCell::new(rng),
            interval: RefCell::new(None),
            active: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        }))
    }

    pub(crate) fn activate(&self, images_url: &str) {
        self.spawn_preloaders();
        self.watch_document(images_url);
        self.watch_section();
        let action = self.gate.borrow_mut().reconcile();
        self.apply(action);
    }

    #[cfg(test)]
    pub(crate) fn is_cycling(&self) -> bool {
        self.interval.borrow().is_some()
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    #[cfg(test)]
    pub(crate) fn item_count(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn set_section_visible(&self, visible: bool) {
        let action = self.gate.borrow_mut().set_section_visible(visible);
        self.apply(action);
    }

    pub(crate) fn set_document_visible(&self, visible: bool) {
        let action = self.gate.borrow_mut().set_document_visible(visible);
        self.apply(action);
    }

    fn apply(&self, action: GateAction) {
        match action {
            GateAction::Start => {
                let mut interval = self.interval.borrow_mut();
                if interval.is_some() {
                    return;
                }
                let weak = self.weak.clone();
                *interval = Some(Interval::new(self.settings.interval_ms, move || {
                    if let Some(wall) = weak.upgrade() {
                        wall.tick();
                    }
                }));
            }
            GateAction::Stop => {
                self.interval.borrow_mut().take();
            }
            GateAction::Keep => {}
        }
    }

    fn tick(&self) {
        if !self.active.get() {
            return;
        }
        let changes = self.settings.changes_per_tick(self.items.len());
        let picks = pick_changes(&mut *self.rng.borrow_mut(), self.items.len(), changes);
        let cache = self.cache.borrow();
        for idx in picks {
            let Some(next) = self.rotation.borrow_mut().next_display(&cache) else {
                return;
            };
            if let Some(image) = self.items.get(idx) {
                fade_to(image, next);
            }
        }
    }

    fn spawn_preloaders(&self) {
        let queue = PreloadQueue::new(self.rotation.borrow().pool());
        let workers = queue.worker_count(self.settings.preload_concurrency);
        let queue = Rc::new(RefCell::new(queue));
        for _ in 0..workers {
            let queue = queue.clone();
            let weak = self.weak.clone();
            spawn_local(async move {
                loop {
                    let Some(src) = queue.borrow_mut().next_source() else {
                        break;
                    };
                    let Some(preloaded) = preload(&src).await else {
                        continue;
                    };
                    match weak.upgrade() {
                        Some(wall) => wall.accept(src, preloaded),
                        None => {
                            discard(preloaded);
                            break;
                        }
                    }
                }
            });
        }
    }

    fn accept(&self, src: String, preloaded: Preloaded) {
        if !self.active.get() {
            discard(preloaded);
            return;
        }
        match preloaded {
            Preloaded::Cached(object_url) => {
                if self.cache.borrow().contains(&src) {
                    revoke_object_url(&object_url);
                    return;
                }
                self.cache.borrow_mut().insert(src, object_url);
            }
            // decoded into the browser cache; the raw source stays in rotation
            Preloaded::Direct => {}
        }
    }

    fn watch_document(&self, images_url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let weak = self.weak.clone();
        let visibility = EventListener::new(&document, "visibilitychange", move |_| {
            if let Some(wall) = weak.upgrade() {
                wall.set_document_visible(!dom::document_hidden());
            }
        });
        let weak = self.weak.clone();
        let release = EventListener::new(&window, "pagehide", move |_| {
            if let Some(wall) = weak.upgrade() {
                wall.teardown();
            }
        });
        let weak = self.weak.clone();
        let images_url = images_url.to_string();
        let restore = EventListener::new(&window, "pageshow", move |event| {
            let restored = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|event| event.persisted());
            let released = weak.upgrade().is_some_and(|wall| !wall.active.get());
            if restored && released {
                gloo::console::log!("photo wall restored");
                start(images_url.clone());
            }
        });
        self.listeners
            .borrow_mut()
            .extend([visibility, release, restore]);
    }

    fn watch_section(&self) {
        let weak = self.weak.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let Some(wall) = weak.upgrade() else {
                return;
            };
            let last = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .last();
            if let Some(entry) = last {
                wall.set_section_visible(entry.is_intersecting());
            }
        });
        match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.container);
                *self.observer.borrow_mut() = Some((observer, callback));
            }
            Err(err) => gloo::console::warn!("visibility observer unavailable", dom::js_err(err)),
        }
    }

    pub(crate) fn teardown(&self) {
        if !self.active.replace(false) {
            return;
        }
        let action = self.gate.borrow_mut().shutdown();
        self.apply(action);
        if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        let released = self.cache.borrow_mut().drain();
        for object_url in &released {
            revoke_object_url(object_url);
        }
        gloo::console::log!("photo wall released", released.len());
    }
}

fn fade_to(image: &HtmlImageElement, next: String) {
    let frame = image.parent_element();
    if let Some(frame) = &frame {
        let _ = frame.class_list().add_1(FADING_CLASS);
    }
    let image = image.clone();
    Timeout::new(FADE_MS, move || {
        image.set_src(&next);
        if let Some(frame) = frame {
            let _ = frame.class_list().remove_1(FADING_CLASS);
        }
    })
    .forget();
}

async fn preload(src: &str) -> Option<Preloaded> {
    let (bytes, mime) = fetch_bytes(src).await.ok()?;
    match create_object_url(&bytes, &mime) {
        Ok(object_url) => Some(Preloaded::Cached(object_url)),
        Err(_) => decode_image(src)
            .await
            .ok()
            .map(|_| Preloaded::Direct),
    }
}

fn discard(preloaded: Preloaded) {
    if let Preloaded::Cached(object_url) = preloaded {
        revoke_object_url(&object_url);
    }
}

fn create_object_url(bytes: &[u8], mime: &str) -> Result<String, JsValue> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes).buffer());
    let options = BlobPropertyBag::new();
    if !mime.trim().is_empty() {
        options.set_type(mime);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

fn revoke_object_url(object_url: &str) {
    let _ = Url::revoke_object_url(object_url);
}

async fn decode_image(src: &str) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    wasm_bindgen_futures::JsFuture::from(image.decode()).await?;
    Ok(())
}

fn probe_capabilities() -> Capabilities {
    let Some(window) = web_sys::window() else {
        return Capabilities::default();
    };
    let media_matches = |query: &str| {
        window
            .match_media(query)
            .ok()
            .flatten()
            .map(|list| list.matches())
            .unwrap_or(false)
    };
    let navigator = window.navigator();
    let connection = Reflect::get(&navigator, &JsValue::from_str("connection"))
        .ok()
        .filter(|value| value.is_object());
    let save_data = connection.as_ref().is_some_and(|connection| {
        let save_data = Reflect::get(connection, &JsValue::from_str("saveData"))
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        let effective = Reflect::get(connection, &JsValue::from_str("effectiveType"))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        save_data || SLOW_CONNECTIONS.contains(&effective.as_str())
    });
    let low_memory = Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|value| value.as_f64())
        .is_some_and(|gigabytes| gigabytes <= LOW_MEMORY_GB);
    Capabilities {
        reduced_motion: media_matches(REDUCED_MOTION_QUERY),
        save_data,
        low_memory,
        small_screen: media_matches(SMALL_SCREEN_QUERY),
    }
}

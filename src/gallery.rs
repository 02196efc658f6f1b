use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::fetch::fetch_works;
use artwall_core::{build_cards, CardData, DeepLink};

pub(crate) const GRID_ID: &str = "galleryGrid";
pub(crate) const LOAD_FAILED_MESSAGE: &str = "無法載入作品資料，請稍後再試。";

pub(crate) struct GalleryContext {
    pub(crate) works_url: String,
    pub(crate) deep_link: RefCell<DeepLink>,
    pub(crate) on_open: Callback<CardData>,
}

#[derive(Properties)]
pub(crate) struct GalleryProps {
    pub(crate) context: Rc<GalleryContext>,
}

impl PartialEq for GalleryProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.context, &other.context)
    }
}

#[derive(Clone, PartialEq)]
enum GalleryState {
    Loading,
    Ready(Rc<Vec<CardData>>),
    Failed,
}

#[function_component(Gallery)]
pub(crate) fn gallery(props: &GalleryProps) -> Html {
    let state = use_state(|| GalleryState::Loading);

    {
        let state = state.clone();
        let works_url = props.context.works_url.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match fetch_works(&works_url).await {
                    Ok(works) => {
                        gloo::console::log!("works loaded", works.len());
                        state.set(GalleryState::Ready(Rc::new(build_cards(&works))));
                    }
                    Err(err) => {
                        gloo::console::error!("works failed", err.to_string());
                        state.set(GalleryState::Failed);
                    }
                }
            });
            || ()
        });
    }

    {
        let context = props.context.clone();
        use_effect_with((*state).clone(), move |state| {
            if let GalleryState::Ready(cards) = state {
                let target = context.deep_link.borrow_mut().take_match(cards);
                if let Some(card) = target.and_then(|idx| cards.get(idx)) {
                    context.on_open.emit(card.clone());
                }
            }
            || ()
        });
    }

    match &*state {
        GalleryState::Loading => html! {},
        GalleryState::Failed => html! {
            <p class="gallery-error" style="color:#fff;">{LOAD_FAILED_MESSAGE}</p>
        },
        GalleryState::Ready(cards) => cards
            .iter()
            .map(|card| card_view(card, &props.context.on_open))
            .collect::<Html>(),
    }
}

fn card_view(card: &CardData, on_open: &Callback<CardData>) -> Html {
    let onclick = {
        let card = card.clone();
        on_open.reform(move |_: MouseEvent| card.clone())
    };
    html! {
        <article
            class="art-card"
            style={card.background_style()}
            data-id={card.id.clone()}
            data-img={card.image.clone()}
            data-title={card.title_text().to_string()}
            data-creator={card.creator.clone()}
            data-medium={card.medium.clone()}
            data-grade={card.grade.clone()}
            data-size={card.size.clone()}
            data-concept={card.concept.clone()}
            data-story={card.story.clone()}
            data-contact={card.contact.clone()}
            {onclick}
        >
            <div class="card-overlay">
                <h3>{card.title_text().to_string()}</h3>
                <p>{card.concept_text().to_string()}</p>
            </div>
        </article>
    }
}

pub(crate) fn mount(root: Element, context: Rc<GalleryContext>) {
    root.set_inner_html("");
    let _app_handle =
        yew::Renderer::<Gallery>::with_root_and_props(root, GalleryProps { context }).render();
}

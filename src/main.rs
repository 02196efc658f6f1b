mod config;
mod dom;
mod fetch;
mod gallery;
mod lights;
mod overlay;
mod photo_wall;
mod random;

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Element;
use yew::Callback;

use artwall_core::{CardData, DeepLink};
use gallery::GalleryContext;
use overlay::OverlayController;

fn main() {
    console_error_panic_hook::set_once();
    let config = config::load_page_config();

    let overlays = match OverlayController::install() {
        Ok(controller) => Some(controller),
        Err(err) => {
            gloo::console::warn!("overlays unavailable", dom::js_err(err));
            None
        }
    };
    let on_open = Callback::from(move |card: CardData| match &overlays {
        Some(controller) => controller.open_card(&card),
        None => gloo::console::warn!("card opened without overlays", card.id),
    });

    match dom::element_by_id::<Element>(gallery::GRID_ID) {
        Ok(root) => gallery::mount(
            root,
            Rc::new(GalleryContext {
                works_url: config.works_url.clone(),
                deep_link: RefCell::new(DeepLink::new(config.initial_id.clone())),
                on_open,
            }),
        ),
        Err(err) => gloo::console::error!("gallery grid missing", dom::js_err(err)),
    }

    lights::start();
    photo_wall::start(config.wall_images_url);
}

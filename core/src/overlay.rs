use crate::card::{CardData, ModalView, DEFAULT_ALT};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressUpdate {
    SetId(String),
    RemoveId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalOpened {
    pub view: ModalView,
    pub address: Option<AddressUpdate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullView {
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dismissal {
    FullView,
    Modal,
    Nothing,
}

#[derive(Clone, Debug, Default)]
pub struct Overlays {
    modal_open: bool,
    fullview_open: bool,
    current_image: Option<String>,
    current_title: String,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn fullview_open(&self) -> bool {
        self.fullview_open
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    pub fn open_modal(&mut self, card: &CardData) -> ModalOpened {
        let view = ModalView::from_card(card);
        self.modal_open = true;
        self.current_title = view.title.clone();
        self.current_image = Some(view.image.clone()).filter(|src| !src.is_empty());
        let address = Some(card.id.clone())
            .filter(|id| !id.is_empty())
            .map(AddressUpdate::SetId);
        ModalOpened { view, address }
    }

    pub fn close_modal(&mut self) -> AddressUpdate {
        self.modal_open = false;
        AddressUpdate::RemoveId
    }

    pub fn open_fullview(&mut self) -> Option<FullView> {
        let src = self.current_image.clone()?;
        self.fullview_open = true;
        let alt = if self.current_title.is_empty() {
            DEFAULT_ALT.to_string()
        } else {
            self.current_title.clone()
        };
        Some(FullView { src, alt })
    }

    pub fn close_fullview(&mut self) -> bool {
        std::mem::replace(&mut self.fullview_open, false)
    }

    // Full view first; never both in one call.
    pub fn dismiss_top(&mut self) -> Dismissal {
        if self.fullview_open {
            self.close_fullview();
            Dismissal::FullView
        } else if self.modal_open {
            self.close_modal();
            Dismissal::Modal
        } else {
            Dismissal::Nothing
        }
    }
}

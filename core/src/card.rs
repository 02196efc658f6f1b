use crate::catalog::{non_empty, Work};

pub const FIELD_PLACEHOLDER: &str = "-";
pub const DEFAULT_ALT: &str = "artwork";
pub const CONCEPT_LABEL: &str = "作品理念：";
pub const STORY_LABEL: &str = "創作故事：";
pub const CONTACT_LABEL: &str = "聯絡方式：";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardData {
    pub id: String,
    pub raw_id: Option<String>,
    pub image: String,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub medium: Option<String>,
    pub grade: Option<String>,
    pub size: Option<String>,
    pub concept: Option<String>,
    pub story: Option<String>,
    pub contact: Option<String>,
}

impl From<&Work> for CardData {
    fn from(work: &Work) -> Self {
        Self {
            id: work.card_id(),
            raw_id: work.id.clone(),
            image: work.image.clone().unwrap_or_default(),
            title: work.title.clone(),
            creator: work.creator.clone(),
            medium: work.medium.clone(),
            grade: work.grade.clone(),
            size: work.size.clone(),
            concept: work.concept.clone(),
            story: work.story.clone(),
            contact: work.contact.clone(),
        }
    }
}

impl CardData {
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn concept_text(&self) -> &str {
        self.concept.as_deref().unwrap_or("")
    }

    pub fn matches_id(&self, wanted: &str) -> bool {
        if wanted.is_empty() {
            return false;
        }
        self.raw_id.as_deref() == Some(wanted) || self.id == wanted
    }

    pub fn background_style(&self) -> String {
        format!("--card-img: url('{}')", self.image.replace('\'', "\\'"))
    }
}

pub fn build_cards(works: &[Work]) -> Vec<CardData> {
    works.iter().map(CardData::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub image: String,
    pub alt: String,
    pub creator: String,
    pub medium: String,
    pub grade: String,
    pub size: String,
    pub concept: String,
    pub story: String,
    pub contact: String,
}

impl ModalView {
    pub fn from_card(card: &CardData) -> Self {
        let title = card.title_text().to_string();
        let alt = non_empty(card.title.as_deref())
            .unwrap_or(DEFAULT_ALT)
            .to_string();
        Self {
            title,
            image: card.image.clone(),
            alt,
            creator: or_placeholder(card.creator.as_deref()),
            medium: or_placeholder(card.medium.as_deref()),
            grade: or_placeholder(card.grade.as_deref()),
            size: or_placeholder(card.size.as_deref()),
            concept: labelled(CONCEPT_LABEL, card.concept.as_deref()),
            story: labelled(STORY_LABEL, card.story.as_deref()),
            contact: labelled(CONTACT_LABEL, card.contact.as_deref()),
        }
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(FIELD_PLACEHOLDER).to_string()
}

fn labelled(label: &str, value: Option<&str>) -> String {
    format!("{label}{}", value.unwrap_or(""))
}

pub mod address;
pub mod card;
pub mod catalog;
pub mod cycle;
pub mod deep_link;
pub mod lights;
pub mod overlay;
pub mod preload;
pub mod slug;
pub mod wall;

pub use address::{query_id, with_query_id, ID_PARAM};
pub use card::{build_cards, CardData, ModalView, FIELD_PLACEHOLDER};
pub use catalog::{parse_image_list, parse_works, CatalogError, Work};
pub use cycle::{CycleGate, GateAction};
pub use deep_link::DeepLink;
pub use lights::LightParams;
pub use overlay::{AddressUpdate, Dismissal, FullView, ModalOpened, Overlays};
pub use preload::{BlobCache, PreloadQueue};
pub use slug::slugify;
pub use wall::{Capabilities, Footprint, ImageRotation, ItemLayout, WallSettings, WallTier};

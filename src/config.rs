use web_sys::UrlSearchParams;

use artwall_core::ID_PARAM;

const DEFAULT_WORKS_URL: &str = "../data/works.json";
const DEFAULT_WALL_IMAGES_URL: &str = "../data/first_page_images.json";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageConfig {
    pub(crate) works_url: String,
    pub(crate) wall_images_url: String,
    pub(crate) initial_id: Option<String>,
}

pub(crate) fn load_page_config() -> PageConfig {
    PageConfig {
        works_url: build_time_url(
            option_env!("ARTWALL_WORKS_URL").or(option_env!("TRUNK_PUBLIC_ARTWALL_WORKS_URL")),
            DEFAULT_WORKS_URL,
        ),
        wall_images_url: build_time_url(
            option_env!("ARTWALL_WALL_IMAGES_URL")
                .or(option_env!("TRUNK_PUBLIC_ARTWALL_WALL_IMAGES_URL")),
            DEFAULT_WALL_IMAGES_URL,
        ),
        initial_id: load_initial_id(),
    }
}

fn build_time_url(raw: Option<&str>, fallback: &str) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn load_initial_id() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    parse_initial_id(&search)
}

fn parse_initial_id(search: &str) -> Option<String> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    let id = params.get(ID_PARAM)?;
    let id = id.trim().to_string();
    if id.is_empty() {
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn initial_id_comes_from_query() {
        assert_eq!(parse_initial_id("?id=a&lang=zh").as_deref(), Some("a"));
        assert_eq!(parse_initial_id("?lang=zh"), None);
        assert_eq!(parse_initial_id("?id=%20"), None);
        assert_eq!(parse_initial_id(""), None);
    }

    #[wasm_bindgen_test]
    fn build_time_url_falls_back_when_blank() {
        assert_eq!(build_time_url(Some("  "), DEFAULT_WORKS_URL), DEFAULT_WORKS_URL);
        assert_eq!(build_time_url(Some("/data/w.json"), DEFAULT_WORKS_URL), "/data/w.json");
        assert_eq!(build_time_url(None, DEFAULT_WALL_IMAGES_URL), DEFAULT_WALL_IMAGES_URL);
    }
}

use url::Url;

pub const ID_PARAM: &str = "id";

// Replaces the first `id` where it sits and drops any repeats; a new `id` goes last.
pub fn with_query_id(href: &str, id: Option<&str>) -> Result<String, url::ParseError> {
    let mut url = Url::parse(href)?;
    let existing: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut placed = false;
    let mut pairs = Vec::with_capacity(existing.len() + 1);
    for (key, value) in existing {
        if key != ID_PARAM {
            pairs.push((key, value));
        } else if let Some(id) = id.filter(|_| !placed) {
            pairs.push((key, id.to_string()));
            placed = true;
        }
    }
    if let (Some(id), false) = (id, placed) {
        pairs.push((ID_PARAM.to_string(), id.to_string()));
    }
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    Ok(url.into())
}

pub fn query_id(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == ID_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

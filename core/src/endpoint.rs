//! URL construction for the cards resource.

use url::form_urlencoded;
use url::Url;

pub const SCHEME: &str = "https";
pub const HOST: &str = "api.magicthegathering.io";
pub const CARDS_RESOURCE: &str = "/v1/cards";

/// `https://api.magicthegathering.io`
pub const DEFAULT_BASE_URL: &str = "https://api.magicthegathering.io";

/// Build the cards URL under `base`, optionally filtered by `name`.
///
/// The resource path is appended to whatever path `base` already has. An
/// empty `name` is treated as no filter, so the result never carries an
/// empty `name=` parameter. The value is percent-encoded with `%20` for
/// spaces rather than form-style `+`.
pub fn cards_url(base: &Url, name: Option<&str>) -> Url {
    let mut url = base.clone();
    let path = format!("{}{CARDS_RESOURCE}", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_fragment(None);

    match name.filter(|name| !name.is_empty()) {
        Some(name) => url.set_query(Some(&format!("name={}", encode_query_value(name)))),
        None => url.set_query(None),
    }

    url
}

/// Percent-encode a query value. `byte_serialize` writes a literal `+` as
/// `%2B`, so every remaining `+` stands for a space.
fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

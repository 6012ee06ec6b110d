use const_format::formatcp;
use url::form_urlencoded;

pub const PAGE: u32 = 1;
pub const LIMIT: u32 = 10;

/// Fixed parameters appended to every search query.
pub const QUERY_SUFFIX: &str = formatcp!("&page={}&limit={}", PAGE, LIMIT);

/// Turn raw user input into the query string sent as the `q` parameter of a
/// search, e.g. `"tolkien   hobbit"` becomes `"tolkien+hobbit&page=1&limit=10"`.
///
/// Tokens are form-urlencoded, so characters like `&` typed by the user can't
/// smuggle in extra parameters.
pub fn build(raw_input: &str) -> String {
    let terms = raw_input
        .split_whitespace()
        .map(|token| form_urlencoded::byte_serialize(token.as_bytes()).collect::<String>())
        .collect::<Vec<String>>()
        .join("+");
    format!("{terms}{QUERY_SUFFIX}")
}

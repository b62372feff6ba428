use url::Url;

const SEARCH_BASE: &str = "https://www.google.com/search";

/// Web search link for a phrase selected in an explanation.
///
/// Returns `None` for blank selections.
#[must_use]
pub fn search_url(selection: &str) -> Option<Url> {
    let query = selection.split_whitespace().collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        return None;
    }
    let mut url = Url::parse(SEARCH_BASE).ok()?;
    url.query_pairs_mut().append_pair("q", &query);
    Some(url)
}

/// Shortens `text` to `max` characters, ending in `...` when cut.
#[must_use]
pub fn snippet(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippets_cut_long_selections() {
        assert_eq!(snippet("ledger", 10), "ledger");
        assert_eq!(snippet("depreciation", 10), "depreci...");
        assert_eq!(snippet("straight-line method", 20), "straight-line method");
    }

    #[test]
    fn encodes_selection() {
        let url = search_url("  double\n entry & ledgers ").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.google.com/search?q=double+entry+%26+ledgers"
        );
        assert!(search_url(" \t").is_none());
    }
}

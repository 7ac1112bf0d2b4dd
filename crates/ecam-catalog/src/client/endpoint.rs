//! Request URL construction for the commerce API.

use reqwest::Url;

use crate::error::CatalogError;

/// Joins `base_url` and `api_prefix` into the root every endpoint hangs off.
///
/// `https://api.test/` + `/api/v1/` becomes `https://api.test/api/v1/`.
pub(super) fn api_root(base_url: &str, api_prefix: &str) -> Result<Url, CatalogError> {
    let base = base_url.trim().trim_end_matches('/');
    let prefix = api_prefix.trim().trim_matches('/');
    let joined = if prefix.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{prefix}/")
    };

    let url = Url::parse(&joined).map_err(|e| CatalogError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    Ok(url)
}

/// Appends path `segments` (each percent-encoded) and `query` pairs to `root`.
pub(super) fn endpoint_url(
    root: &Url,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, CatalogError> {
    let mut url = root.clone();
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidBaseUrl {
            base_url: root.to_string(),
            reason: "URL cannot carry a path".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }

    Ok(url)
}

/// Hostname of `url`, for error messages.
pub(super) fn domain_of(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.to_string(), str::to_owned)
}

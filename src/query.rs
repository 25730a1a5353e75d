//! Query builder for the collection listings endpoint.
//!
//! Turns a `FetchOptions` value into the full request target:
//!
//!     {api_base}/collections/{symbol}/listings[?params]
//!
//! Parameters are appended in a fixed order (limit, min_price,
//! max_price, sort_direction) and only when set. The first one
//! is introduced with `?`, every following one with `&`.
//!
//! Prices are always written with six fractional digits. The
//! upstream contract was built against that format, so it is kept
//! even where it truncates precision.
//!
//! The collection symbol is inserted verbatim; callers are expected
//! to pass URL-safe symbols.

use crate::error::FetchError;

/// Default marketplace API root.
pub const DEFAULT_API_BASE: &str = "https://api-mainnet.magiceden.dev/v2";

/// Price sort order requested from the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Filter options for one collection request.
///
/// Zero values mean "unset": `limit == 0` is unbounded and a zero
/// price bound is not sent. Price bounds are not cross-checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    pub collection: String,
    pub limit: u64,
    pub min_price: f64,
    pub max_price: f64,
    pub sort: SortDirection,
}

impl FetchOptions {
    /// Copy of these options targeting another collection.
    pub fn with_collection(&self, collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            ..self.clone()
        }
    }
}

/// Builds the request target for `opts` below `api_base`.
pub fn build_target(api_base: &str, opts: &FetchOptions) -> Result<String, FetchError> {
    if opts.collection.is_empty() {
        return Err(FetchError::InvalidOptions(
            "collection symbol must not be empty".to_string(),
        ));
    }

    let mut target = format!(
        "{}/collections/{}/listings",
        api_base.trim_end_matches('/'),
        opts.collection
    );

    let mut params: Vec<String> = Vec::with_capacity(4);
    if opts.limit != 0 {
        params.push(format!("limit={}", opts.limit));
    }
    if opts.min_price != 0.0 {
        params.push(format!("min_price={:.6}", opts.min_price));
    }
    if opts.max_price != 0.0 {
        params.push(format!("max_price={:.6}", opts.max_price));
    }
    if opts.sort == SortDirection::Descending {
        params.push("sort_direction=desc".to_string());
    }

    for (i, param) in params.iter().enumerate() {
        target.push(if i == 0 { '?' } else { '&' });
        target.push_str(param);
    }

    Ok(target)
}

use crate::error::FetchError;
use crate::schema::{ListingJson, NormalizedListing};

/// Decodes a raw listings payload into flat records.
///
/// The payload must be a JSON array of listing objects. Decoding is
/// all-or-nothing: malformed JSON or a non-array top level fails the
/// whole payload, while missing or null fields inside an element fall
/// back to zero values.
///
/// Output order mirrors the source array order.
pub fn decode_listings(raw: &[u8]) -> Result<Vec<NormalizedListing>, FetchError> {
    let parsed: Vec<ListingJson> = serde_json::from_slice(raw)?;

    Ok(parsed.into_iter().map(NormalizedListing::from).collect())
}

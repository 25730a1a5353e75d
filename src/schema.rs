use serde::{Deserialize, Serialize};

// ------------------------------------------------------------
// Wire format
// ------------------------------------------------------------
//
// Shape of one element of the marketplace listings array.
// Only the fields the pipeline flattens are modelled; everything
// else in the payload is ignored.
//
// Every field is optional so that absent (or null) values fall
// back to zero values instead of failing the whole payload.
//
#[derive(Debug, Deserialize)]
pub struct ListingJson {
    pub seller: Option<String>,
    pub price: Option<f64>,
    pub token: Option<TokenJson>,
}

/// Nested token object of a listing.
#[derive(Debug, Default, Deserialize)]
pub struct TokenJson {
    #[serde(rename = "mintAddress")]
    pub mint_address: Option<String>,
    pub collection: Option<String>,
}

// ------------------------------------------------------------
// Normalized listing
// ------------------------------------------------------------
//
// The flat record handed to the output sink. Field names and
// order define both the JSON object keys and the CSV columns:
//
//     collection,seller,price,mintAddress
//
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    /// Collection symbol taken from the nested token object
    pub collection: String,

    /// Seller wallet address
    pub seller: String,

    /// Listing price in the unit used by the marketplace
    pub price: f64,

    /// Token mint address
    #[serde(rename = "mintAddress")]
    pub mint_address: String,
}

impl From<ListingJson> for NormalizedListing {
    fn from(raw: ListingJson) -> Self {
        let token = raw.token.unwrap_or_default();

        Self {
            collection: token.collection.unwrap_or_default(),
            seller: raw.seller.unwrap_or_default(),
            price: raw.price.unwrap_or_default(),
            mint_address: token.mint_address.unwrap_or_default(),
        }
    }
}

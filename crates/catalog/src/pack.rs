use core::str::FromStr;

use serde::{Deserialize, Serialize};

use packstore_core::PackId;

/// A purchasable sample pack as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePack {
    pub id: PackId,
    pub title: String,
    pub description: String,
    /// Price in minor currency units (cents).
    pub price: u64,
    pub image_url: String,
    /// Embeddable audio player URL.
    pub demo_url: String,
    /// 1 marks a homepage hero candidate. Other values are stored as-is.
    pub featured: i64,
}

impl SamplePack {
    /// Attach a store-assigned id to a draft.
    pub fn from_draft(id: PackId, draft: PackDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            demo_url: draft.demo_url,
            featured: draft.featured,
        }
    }

    pub fn is_featured(&self) -> bool {
        self.featured == 1
    }

    /// Everything except the id.
    pub fn to_draft(&self) -> PackDraft {
        PackDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            demo_url: self.demo_url.clone(),
            featured: self.featured,
        }
    }
}

/// The fields of a pack excluding its id: input to create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDraft {
    pub title: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
    pub demo_url: String,
    pub featured: i64,
}

/// Render a price in cents as dollars, e.g. `2999` -> `$29.99`.
pub fn format_price(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Listing orders offered on top of the default insertion order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PackSort {
    /// Cheapest first.
    Price,
    /// Case-insensitive title order.
    Title,
}

impl FromStr for PackSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(PackSort::Price),
            "title" => Ok(PackSort::Title),
            _ => Err(()),
        }
    }
}

/// Stable sort, so packs that compare equal keep insertion order.
pub fn sort_packs(packs: &mut [SamplePack], by: PackSort) {
    match by {
        PackSort::Price => packs.sort_by_key(|p| p.price),
        PackSort::Title => packs.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
}

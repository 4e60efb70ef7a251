//! Demo catalog loaded at startup unless disabled.

use crate::pack::{PackDraft, SamplePack};
use crate::store::{CatalogStore, InMemoryCatalogStore, StoreResult};

pub fn demo_catalog() -> Vec<PackDraft> {
    vec![
        PackDraft {
            title: "Neon Nights".to_string(),
            description: "Cyberpunk-inspired synth leads and atmospheric pads".to_string(),
            price: 2999,
            image_url: "https://images.unsplash.com/photo-1475275166152-f1e8005f9854".to_string(),
            demo_url: "https://soundcloud.com/example/neon-nights".to_string(),
            featured: 1,
        },
        PackDraft {
            title: "Digital Dreams".to_string(),
            description: "Future bass essentials with glitch percussion".to_string(),
            price: 1999,
            image_url: "https://images.unsplash.com/photo-1471478331149-c72f17e33c73".to_string(),
            demo_url: "https://soundcloud.com/example/digital-dreams".to_string(),
            featured: 0,
        },
        PackDraft {
            title: "Neural Network".to_string(),
            description: "AI-generated soundscapes and textures".to_string(),
            price: 2499,
            image_url: "https://images.unsplash.com/photo-1511671782779-c97d3d27a1d4".to_string(),
            demo_url: "https://soundcloud.com/example/neural-network".to_string(),
            featured: 0,
        },
    ]
}

/// Create each draft through the normal create path, so seeded packs consume
/// ids exactly like admin-created ones.
pub fn seed<S: CatalogStore + ?Sized>(store: &S, drafts: Vec<PackDraft>) -> StoreResult<Vec<SamplePack>> {
    drafts.into_iter().map(|d| store.create(d)).collect()
}

impl InMemoryCatalogStore {
    /// A store pre-populated with [`demo_catalog`].
    pub fn with_demo_catalog() -> StoreResult<Self> {
        let store = Self::new();
        let seeded = seed(&store, demo_catalog())?;
        tracing::debug!(count = seeded.len(), "seeded demo catalog");
        Ok(store)
    }
}

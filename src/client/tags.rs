use crate::models::tag::{Category, DonationPlatform, GameVersion, LicenseTag, Loader};

/// Memoized tag vocabularies, owned by one `ApiClient` instance. Each list is
/// fetched at most once until `clear` is called; there is no ambient global
/// state.
#[derive(Debug, Clone, Default)]
pub(crate) struct TagCache {
    pub(crate) categories: Option<Vec<Category>>,
    pub(crate) loaders: Option<Vec<Loader>>,
    pub(crate) game_versions: Option<Vec<GameVersion>>,
    pub(crate) licenses: Option<Vec<LicenseTag>>,
    pub(crate) donation_platforms: Option<Vec<DonationPlatform>>,
}

impl TagCache {
    pub(crate) fn clear(&mut self) {
        *self = TagCache::default();
    }
}

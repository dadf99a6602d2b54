//! Platform services (adverts, leaderboards) behind a trait.
//!
//! The session never calls these directly; it raises `PlatformRequest`s and
//! the host dispatches them here after the run.

use tracing::info;

use horde_core::events::PlatformRequest;
use horde_progression::Profile;

pub trait PlatformService {
    fn show_interstitial(&mut self);
    /// Returns whether the advert was watched to the end.
    fn show_rewarded_ad(&mut self) -> bool;
    fn submit_score(&mut self, score: u64);
}

/// Does nothing. A rewarded advert is never granted.
#[derive(Debug, Default)]
pub struct NoopPlatform;

impl PlatformService for NoopPlatform {
    fn show_interstitial(&mut self) {}

    fn show_rewarded_ad(&mut self) -> bool {
        false
    }

    fn submit_score(&mut self, _score: u64) {}
}

/// Logs every call and records submitted scores. Rewarded adverts always complete.
#[derive(Debug, Default)]
pub struct LoggingPlatform {
    pub submitted_scores: Vec<u64>,
    pub interstitials_shown: u32,
    pub rewarded_ads_shown: u32,
}

impl PlatformService for LoggingPlatform {
    fn show_interstitial(&mut self) {
        self.interstitials_shown += 1;
        info!("[platform] Interstitial advert shown");
    }

    fn show_rewarded_ad(&mut self) -> bool {
        self.rewarded_ads_shown += 1;
        info!("[platform] Rewarded advert watched");
        true
    }

    fn submit_score(&mut self, score: u64) {
        self.submitted_scores.push(score);
        info!("[platform] Score {score} submitted to leaderboard");
    }
}

/// Forward one session request to the platform.
pub fn dispatch(platform: &mut dyn PlatformService, request: PlatformRequest) {
    match request {
        PlatformRequest::SubmitScore { score } => platform.submit_score(score),
        PlatformRequest::ShowInterstitial => platform.show_interstitial(),
    }
}

/// Offer a rewarded advert; credit the bonus if it was watched. Returns the new total when granted.
///
/// Editions without platform services never show the advert.
pub fn offer_rewarded_ad(platform: &mut dyn PlatformService, profile: &mut Profile) -> Option<u64> {
    if !profile.edition().has_platform_services() {
        return None;
    }
    platform
        .show_rewarded_ad()
        .then(|| profile.grant_rewarded_bonus())
}

#[cfg(test)]
mod tests {
    use super::*;
    use horde_core::constants::REWARDED_AD_BONUS;
    use horde_core::enums::Edition;

    #[test]
    fn test_dispatch_routes_requests() {
        let mut platform = LoggingPlatform::default();
        dispatch(&mut platform, PlatformRequest::SubmitScore { score: 1200 });
        dispatch(&mut platform, PlatformRequest::ShowInterstitial);
        assert_eq!(platform.submitted_scores, vec![1200]);
        assert_eq!(platform.interstitials_shown, 1);
    }

    #[test]
    fn test_rewarded_ad_credits_bonus_when_watched() {
        let mut profile = Profile::in_memory(Edition::Platform);
        let total = offer_rewarded_ad(&mut LoggingPlatform::default(), &mut profile);
        assert_eq!(total, Some(REWARDED_AD_BONUS));
        assert_eq!(profile.store().total_score, REWARDED_AD_BONUS);
    }

    #[test]
    fn test_rewarded_ad_unavailable_without_platform_services() {
        for edition in [Edition::Classic, Edition::Upgraded] {
            let mut platform = LoggingPlatform::default();
            let mut profile = Profile::in_memory(edition);
            assert_eq!(offer_rewarded_ad(&mut platform, &mut profile), None);
            assert_eq!(platform.rewarded_ads_shown, 0);
            assert_eq!(profile.store().total_score, 0);
        }
    }

    #[test]
    fn test_noop_platform_grants_nothing() {
        let mut profile = Profile::in_memory(Edition::Platform);
        assert_eq!(offer_rewarded_ad(&mut NoopPlatform, &mut profile), None);
        assert_eq!(profile.store().total_score, 0);
    }
}

//! Campaigns and their hosted microsite

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reward::{Image, Reward};
use super::taxonomy::{Category, Tag};

/// Marketing campaign (stamp card, game, referral, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    /// Campaign id.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Terms and conditions.
    pub terms_and_conditions: Option<String>,
    /// Start.
    pub begins_at: Option<DateTime<Utc>>,
    /// End.
    pub ends_at: Option<DateTime<Utc>>,
    /// Whether the user has joined.
    #[serde(deserialize_with = "super::nullable")]
    pub enrolled: bool,
    /// Campaign type, e.g. `game`.
    pub campaign_type: Option<String>,
    /// Referral mechanics.
    pub campaign_referral_type: Option<String>,
    /// Type-specific configuration.
    pub campaign_config: Value,
    /// Images.
    #[serde(deserialize_with = "super::nullable")]
    pub images: Vec<Image>,
    /// Marked as favourite by the user.
    #[serde(deserialize_with = "super::nullable")]
    pub favourite: bool,
    /// Tenant-defined fields.
    pub custom_fields: Value,
    /// Categories.
    #[serde(deserialize_with = "super::nullable")]
    pub category_tags: Vec<Category>,
    /// When the campaign became active.
    pub active_at: Option<DateTime<Utc>>,
    /// Game mechanic, for game campaigns.
    pub game_type: Option<String>,
    /// Whether the campaign is running now.
    #[serde(deserialize_with = "super::nullable")]
    pub operating_now: bool,
    /// Rewards on offer.
    #[serde(deserialize_with = "super::nullable")]
    pub rewards: Vec<Reward>,
    /// Presentation hints.
    pub display_properties: Value,
    /// Tags.
    #[serde(deserialize_with = "super::nullable")]
    pub tags: Vec<Tag>,
}

impl Campaign {
    /// URL of the hosted microsite for this campaign, signed in as the
    /// holder of `access_token`.
    pub fn microsite_url(&self, base_url: &str, access_token: &str) -> String {
        format!(
            "{}/loading?token={}&cid={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(access_token),
            self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microsite_url_embeds_token_and_campaign() {
        let campaign = Campaign { id: 77, ..Default::default() };
        assert_eq!(
            campaign.microsite_url("https://game.example/", "abc"),
            "https://game.example/loading?token=abc&cid=77"
        );
    }

    #[test]
    fn microsite_url_encodes_token() {
        let campaign = Campaign { id: 1, ..Default::default() };
        let url = campaign.microsite_url("https://game.example", "a+b/c=");
        assert_eq!(url, "https://game.example/loading?token=a%2Bb%2Fc%3D&cid=1");
    }
}

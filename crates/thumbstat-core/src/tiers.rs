//! Channel size and video performance tiers used by dashboard filters.

use serde::{Deserialize, Serialize};

/// Global subscriber tier of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubscriberTier {
    /// 100M+ subscribers.
    Mega,
    /// 10M+ subscribers.
    Large,
    /// 1M+ subscribers.
    Mid,
    /// 100K+ subscribers.
    Small,
    /// Under 100K subscribers.
    New,
}

impl SubscriberTier {
    pub const ALL: [SubscriberTier; 5] = [
        SubscriberTier::Mega,
        SubscriberTier::Large,
        SubscriberTier::Mid,
        SubscriberTier::Small,
        SubscriberTier::New,
    ];

    #[must_use]
    pub fn from_subscribers(subscribers: f64) -> Self {
        if subscribers >= 100_000_000.0 {
            SubscriberTier::Mega
        } else if subscribers >= 10_000_000.0 {
            SubscriberTier::Large
        } else if subscribers >= 1_000_000.0 {
            SubscriberTier::Mid
        } else if subscribers >= 100_000.0 {
            SubscriberTier::Small
        } else {
            SubscriberTier::New
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriberTier::Mega => "Mega",
            SubscriberTier::Large => "Large",
            SubscriberTier::Mid => "Mid",
            SubscriberTier::Small => "Small",
            SubscriberTier::New => "New",
        }
    }
}

impl std::fmt::Display for SubscriberTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View-volume tier of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewTier {
    /// 10M+ views.
    High,
    /// 1M to 10M views.
    Mid,
    /// Under 1M views.
    Low,
}

impl ViewTier {
    #[must_use]
    pub fn from_views(views: f64) -> Self {
        if views >= 10_000_000.0 {
            ViewTier::High
        } else if views >= 1_000_000.0 {
            ViewTier::Mid
        } else {
            ViewTier::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewTier::High => "high",
            ViewTier::Mid => "mid",
            ViewTier::Low => "low",
        }
    }
}

impl std::fmt::Display for ViewTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative band for an RQS value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RqsBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl RqsBand {
    pub const EXCELLENT: f64 = 80.0;
    pub const GOOD: f64 = 60.0;
    pub const FAIR: f64 = 40.0;

    #[must_use]
    pub fn from_score(rqs: f64) -> Self {
        if rqs >= Self::EXCELLENT {
            RqsBand::Excellent
        } else if rqs >= Self::GOOD {
            RqsBand::Good
        } else if rqs >= Self::FAIR {
            RqsBand::Fair
        } else {
            RqsBand::NeedsImprovement
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RqsBand::Excellent => "Excellent",
            RqsBand::Good => "Good",
            RqsBand::Fair => "Fair",
            RqsBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

//! Tier and bucket labels for the four stratification axes.

use std::fmt;

/// Depth bucket from the shortest IS-A path to the ontology root
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthTier {
    Shallow,
    Medium,
    Deep,
}

impl DepthTier {
    /// Bucket a shortest-path edge count.
    ///
    /// A zero-length path (the root itself) carries no depth information and
    /// stays unclassified.
    #[must_use]
    pub const fn from_path_len(edges: usize) -> Option<Self> {
        match edges {
            0 => None,
            1..=4 => Some(Self::Shallow),
            5..=7 => Some(Self::Medium),
            _ => Some(Self::Deep),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Medium => "medium",
            Self::Deep => "deep",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "shallow" => Some(Self::Shallow),
            "medium" => Some(Self::Medium),
            "deep" => Some(Self::Deep),
            _ => None,
        }
    }
}

impl fmt::Display for DepthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-language classification of how much of a concept's ontological context
/// is already translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextTier {
    /// At least one parent is untranslated
    Tier0,
    /// Every parent is translated
    Tier1,
    /// Every parent and every relationship target is translated
    Tier2,
}

impl ContextTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier0 => "tier_0",
            Self::Tier1 => "tier_1",
            Self::Tier2 => "tier_2",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "tier_0" => Some(Self::Tier0),
            "tier_1" => Some(Self::Tier1),
            "tier_2" => Some(Self::Tier2),
            _ => None,
        }
    }
}

impl fmt::Display for ContextTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-language classification by whether a lexically similar,
/// non-hierarchically-related concept is already translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimilarityTier {
    /// No translated lexical neighbor
    Tier0,
    /// At least one translated lexical neighbor
    Tier1,
}

impl SimilarityTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier0 => "tier_0",
            Self::Tier1 => "tier_1",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "tier_0" => Some(Self::Tier0),
            "tier_1" => Some(Self::Tier1),
            _ => None,
        }
    }
}

impl fmt::Display for SimilarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket from the character length of the tag-stripped canonical name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LengthBucket {
    Short,
    Medium,
    Long,
}

impl LengthBucket {
    /// Bucket a tag-stripped term by character count
    #[must_use]
    pub fn from_term(term: &str) -> Self {
        match term.chars().count() {
            0..=20 => Self::Short,
            21..=30 => Self::Medium,
            _ => Self::Long,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

impl fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! This module contains the subclasses of convex languages that can be tested.

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ConvexError, ConvexErrorKind};

/// A subclass of the convex languages.
///
/// The textual form is the usual abbreviation, e.g. `PF` for prefix-free or `SwC` for
/// subword-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Subclass {
    /// No accepted word is a proper prefix of another accepted word.
    #[cfg_attr(feature = "serde", serde(rename = "PF"))]
    PrefixFree,
    /// No accepted word is a proper suffix of another accepted word.
    #[cfg_attr(feature = "serde", serde(rename = "SF"))]
    SuffixFree,
    /// No accepted word is a proper factor of another accepted word.
    #[cfg_attr(feature = "serde", serde(rename = "FF"))]
    FactorFree,
    /// No accepted word is a proper subword of another accepted word.
    #[cfg_attr(feature = "serde", serde(rename = "SwF"))]
    SubwordFree,
    /// Every prefix of an accepted word is accepted.
    #[cfg_attr(feature = "serde", serde(rename = "PC"))]
    PrefixClosed,
    /// Every suffix of an accepted word is accepted.
    #[cfg_attr(feature = "serde", serde(rename = "SC"))]
    SuffixClosed,
    /// Every factor of an accepted word is accepted.
    #[cfg_attr(feature = "serde", serde(rename = "FC"))]
    FactorClosed,
    /// Every subword of an accepted word is accepted.
    #[cfg_attr(feature = "serde", serde(rename = "SwC"))]
    SubwordClosed,
    /// `L = LΣ*`
    #[cfg_attr(feature = "serde", serde(rename = "RID"))]
    RightIdeal,
    /// `L = Σ*L`
    #[cfg_attr(feature = "serde", serde(rename = "LID"))]
    LeftIdeal,
    /// `L = Σ*LΣ*`
    #[cfg_attr(feature = "serde", serde(rename = "TSID"))]
    TwoSidedIdeal,
    /// Inserting arbitrary words anywhere into an accepted word gives an accepted word.
    #[cfg_attr(feature = "serde", serde(rename = "ASID"))]
    AllSidedIdeal,
}

impl Subclass {
    /// All subclasses in the order free, closed, ideal.
    pub const ALL: [Subclass; 12] = [
        Subclass::PrefixFree,
        Subclass::SuffixFree,
        Subclass::FactorFree,
        Subclass::SubwordFree,
        Subclass::PrefixClosed,
        Subclass::SuffixClosed,
        Subclass::FactorClosed,
        Subclass::SubwordClosed,
        Subclass::RightIdeal,
        Subclass::LeftIdeal,
        Subclass::TwoSidedIdeal,
        Subclass::AllSidedIdeal,
    ];

    /// The abbreviation of the subclass.
    pub fn tag(&self) -> &'static str {
        match self {
            Subclass::PrefixFree => "PF",
            Subclass::SuffixFree => "SF",
            Subclass::FactorFree => "FF",
            Subclass::SubwordFree => "SwF",
            Subclass::PrefixClosed => "PC",
            Subclass::SuffixClosed => "SC",
            Subclass::FactorClosed => "FC",
            Subclass::SubwordClosed => "SwC",
            Subclass::RightIdeal => "RID",
            Subclass::LeftIdeal => "LID",
            Subclass::TwoSidedIdeal => "TSID",
            Subclass::AllSidedIdeal => "ASID",
        }
    }

    /// The subclass that contains the complements of the languages of this subclass.
    /// Closed languages and ideals are paired this way. The free subclasses have no such
    /// counterpart.
    pub fn complement_class(&self) -> Option<Subclass> {
        match self {
            Subclass::PrefixClosed => Some(Subclass::RightIdeal),
            Subclass::SuffixClosed => Some(Subclass::LeftIdeal),
            Subclass::FactorClosed => Some(Subclass::TwoSidedIdeal),
            Subclass::SubwordClosed => Some(Subclass::AllSidedIdeal),
            Subclass::RightIdeal => Some(Subclass::PrefixClosed),
            Subclass::LeftIdeal => Some(Subclass::SuffixClosed),
            Subclass::TwoSidedIdeal => Some(Subclass::FactorClosed),
            Subclass::AllSidedIdeal => Some(Subclass::SubwordClosed),
            Subclass::PrefixFree
            | Subclass::SuffixFree
            | Subclass::FactorFree
            | Subclass::SubwordFree => None,
        }
    }
}

impl FromStr for Subclass {
    type Err = ConvexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subclass::ALL
            .iter()
            .find(|subclass| subclass.tag() == s)
            .copied()
            .ok_or_else(|| ConvexError::new(ConvexErrorKind::UnknownSubclass(s.to_string())))
    }
}

impl std::fmt::Display for Subclass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

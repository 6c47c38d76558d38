//! Timeline entries as handed over by the content layer.
//!
//! Every optional field has a documented fallback; nothing in here fails on missing or
//! malformed content.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// One block of structured rich text (a paragraph, a heading, a list item...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextBlock {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Blocks whose text is missing or not a string carry `None`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::lenient_string"))]
    pub text: Option<String>,
}

impl TextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_owned(),
            text: Some(text.into()),
        }
    }
}

/// A text field that arrives either as structured blocks or as a plain string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RichText {
    #[default]
    Empty,
    Plain(String),
    Blocks(Vec<TextBlock>),
}

impl RichText {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Plain(s) => s.trim().is_empty(),
            Self::Blocks(blocks) => blocks
                .iter()
                .all(|b| b.text.as_deref().is_none_or(|t| t.trim().is_empty())),
        }
    }

    /// Flattens to plain text: block texts joined by newlines, trimmed.
    pub fn to_plain(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Plain(s) => s.trim().to_owned(),
            Self::Blocks(blocks) => {
                let joined = blocks
                    .iter()
                    .map(|b| b.text.as_deref().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\n");
                joined.trim().to_owned()
            }
        }
    }

    /// Splits the text into tags on newlines, commas and bullets.
    pub fn chips(&self) -> Vec<String> {
        split_chips(&self.to_plain())
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_owned())
    }
}

impl From<String> for RichText {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl From<Vec<TextBlock>> for RichText {
    fn from(blocks: Vec<TextBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

fn split_chips(text: &str) -> Vec<String> {
    text.split(['\n', ',', '•'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// One career entry. Index in the resolved sequence is its identity for one mount.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineEntry {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::lenient_string_or_empty"))]
    pub role: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::lenient_string"))]
    pub company: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "startdate",
            alias = "startDate",
            deserialize_with = "de::lenient_string"
        )
    )]
    pub start_date: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "enddate",
            alias = "endDate",
            deserialize_with = "de::lenient_string"
        )
    )]
    pub end_date: Option<String>,
    pub summary: RichText,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "tech",
            alias = "techTags",
            deserialize_with = "de::tech_tags"
        )
    )]
    pub tech_tags: Vec<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "logo",
            alias = "logoUrl",
            deserialize_with = "de::logo_url"
        )
    )]
    pub logo_url: Option<String>,
}

impl TimelineEntry {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_dates(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(ToOwned::to_owned);
        self.end_date = end.map(ToOwned::to_owned);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<RichText>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the tags from a tech field in any accepted shape.
    pub fn with_tech(mut self, tech: impl Into<RichText>) -> Self {
        self.tech_tags = tech.into().chips();
        self
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    /// The nav entry label: the role, or `"Role {index + 1}"` when it is blank.
    pub fn nav_label(&self, index: usize) -> String {
        let role = self.role.trim();
        if role.is_empty() {
            format!("Role {}", index + 1)
        } else {
            role.to_owned()
        }
    }

    pub fn company_label(&self) -> &str {
        self.company.as_deref().unwrap_or("")
    }

    /// The logo URL, only when it is non-empty.
    pub fn logo(&self) -> Option<&str> {
        self.logo_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Text shown in place of a missing logo: the company (or `"LOGO"`), at most 10 chars.
    pub fn logo_placeholder(&self) -> String {
        let source = self
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("LOGO");
        source.chars().take(10).collect()
    }

    /// `"start \u{2014} end"`, or whichever of the two exists.
    pub fn date_range(&self) -> Option<String> {
        let start = self.start_date.as_deref().filter(|s| !s.trim().is_empty());
        let end = self.end_date.as_deref().filter(|s| !s.trim().is_empty());
        match (start, end) {
            (Some(s), Some(e)) => Some(format!("{s} \u{2014} {e}")),
            (Some(s), None) => Some(s.to_owned()),
            (None, Some(e)) => Some(e.to_owned()),
            (None, None) => None,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RichText {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Plain(String),
            Blocks(Vec<TextBlock>),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Plain(s) => Self::Plain(s),
            Repr::Blocks(b) => Self::Blocks(b),
            Repr::Other(_) => Self::Empty,
        })
    }
}

#[cfg(feature = "serde")]
mod de {
    use alloc::string::String;
    use alloc::vec::Vec;

    use serde::{Deserialize, Deserializer};

    use super::{RichText, TextBlock, split_chips};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeString {
        Str(String),
        Other(serde::de::IgnoredAny),
    }

    pub(super) fn lenient_string<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match MaybeString::deserialize(d)? {
            MaybeString::Str(s) => Some(s),
            MaybeString::Other(_) => None,
        })
    }

    pub(super) fn lenient_string_or_empty<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<String, D::Error> {
        Ok(lenient_string(d)?.unwrap_or_default())
    }

    pub(super) fn tech_tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Tech {
            List(Vec<String>),
            Blocks(Vec<TextBlock>),
            Plain(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Tech::deserialize(d)? {
            Tech::List(list) => list.iter().flat_map(|s| split_chips(s)).collect(),
            Tech::Blocks(blocks) => RichText::Blocks(blocks).chips(),
            Tech::Plain(s) => split_chips(&s),
            Tech::Other(_) => Vec::new(),
        })
    }

    /// Accepts a bare URL string or a media object of the form `{ "url": "..." }`.
    pub(super) fn logo_url<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        #[derive(Deserialize)]
        struct Media {
            #[serde(default, deserialize_with = "lenient_string")]
            url: Option<String>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Logo {
            Url(String),
            Media(Media),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Logo::deserialize(d)? {
            Logo::Url(u) => Some(u),
            Logo::Media(m) => m.url,
            Logo::Other(_) => None,
        })
    }
}

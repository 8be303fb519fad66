use super::TeaName;
use crate::wheel::Selection;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::cmp::Ordering;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tea {
    pub id: u32,
    pub name: TeaName,
    pub tea_type: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub year: Option<u16>,
    pub rating: f64,
    #[serde(default)]
    pub brew_count: u32,
    /// ISO `YYYY-MM-DD`, so string order is date order.
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub flavor_profile: Selection,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Type filter choices for the collection, which uses finer Pu-erh and oolong
/// names than the record form.
pub const COLLECTION_TYPES: &[&str] = &[
    "普洱生茶",
    "普洱熟茶",
    "綠茶",
    "白茶",
    "烏龍茶",
    "紅茶",
    "黑茶",
];

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    #[strum(to_string = "name")]
    Name,
    #[strum(to_string = "rating")]
    Rating,
    #[strum(to_string = "brew-count", serialize = "brewcount", serialize = "brews")]
    BrewCount,
    #[strum(to_string = "date-added", serialize = "dateadded", serialize = "added")]
    DateAdded,
    #[strum(to_string = "price")]
    Price,
}

impl SortKey {
    /// Name sorts ascending; every other key puts the largest value first and
    /// missing values last.
    pub fn compare(&self, a: &Tea, b: &Tea) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Rating => b.rating.total_cmp(&a.rating),
            Self::BrewCount => b.brew_count.cmp(&a.brew_count),
            Self::DateAdded => descending(a.date_added.as_ref(), b.date_added.as_ref(), Ord::cmp),
            Self::Price => descending(a.price.as_ref(), b.price.as_ref(), f64::total_cmp),
        }
    }
}

fn descending<T>(a: Option<&T>, b: Option<&T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(b, a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeaQuery {
    pub search: String,
    pub tea_type: Option<String>,
    pub sort: SortKey,
}

impl TeaQuery {
    pub fn matches(&self, tea: &Tea) -> bool {
        let needle = self.search.trim().to_lowercase();
        let found = needle.is_empty()
            || tea.name.to_lowercase().contains(&needle)
            || tea.origin.to_lowercase().contains(&needle);

        found && self.tea_type.as_ref().is_none_or(|t| &tea.tea_type == t)
    }

    pub fn apply<'a>(&self, teas: &'a [Tea]) -> Vec<&'a Tea> {
        let mut found: Vec<&Tea> = teas.iter().filter(|t| self.matches(t)).collect();
        found.sort_by(|a, b| self.sort.compare(a, b));
        found
    }
}

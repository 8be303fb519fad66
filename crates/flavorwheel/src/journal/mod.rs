//! In-memory tea journal: the collection the flavor wheel feeds into.

use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod collection;
pub mod record;
pub mod stats;

pub use collection::{COLLECTION_TYPES, SortKey, Tea, TeaQuery};
pub use record::{
    BREWING_METHODS, BrewParams, COMMON_FLAVORS, RecordError, TEA_TYPES, TeaRecord,
};
pub use stats::BrewingStats;

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct TeaName(String);

crate::impl_string_newtype!(TeaName);

const SAMPLE_JOURNAL: &str = include_str!("sample_journal.toml");

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Failed to read journal data: {0}")]
    Data(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct JournalData {
    #[serde(default)]
    teas: Vec<Tea>,
    #[serde(default)]
    records: Vec<TeaRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryJournal {
    teas: Vec<Tea>,
    records: Vec<TeaRecord>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal seeded with the bundled demo collection and brewing history.
    pub fn with_sample() -> Result<Self, JournalError> {
        let data: JournalData = config::Config::builder()
            .add_source(config::File::from_str(
                SAMPLE_JOURNAL,
                config::FileFormat::Toml,
            ))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            teas: data.teas,
            records: data.records,
        })
    }

    pub fn teas(&self) -> &[Tea] {
        &self.teas
    }

    pub fn records(&self) -> &[TeaRecord] {
        &self.records
    }

    pub fn query(&self, query: &TeaQuery) -> Vec<&Tea> {
        query.apply(&self.teas)
    }

    pub fn stats(&self) -> BrewingStats {
        BrewingStats::from_records(&self.records)
    }

    /// Validates and stores a brewing record. A tea of the same name gets its brew
    /// count bumped and new flavor tags merged in; otherwise a new tea is added.
    /// Returns the id of the tea the record was filed under.
    pub fn save(&mut self, record: TeaRecord) -> Result<u32, RecordError> {
        record.validate()?;

        let id = match self.teas.iter_mut().find(|t| t.name == record.name) {
            Some(tea) => {
                tea.brew_count += 1;
                for tag in &record.flavor_tags {
                    if !tea.flavor_profile.contains(tag) {
                        tea.flavor_profile = tea.flavor_profile.toggled(tag);
                    }
                }
                tea.id
            }
            None => {
                let id = self.next_id();
                self.teas.push(Tea {
                    id,
                    name: record.name.clone(),
                    tea_type: record.tea_type.clone(),
                    origin: record.origin.clone(),
                    year: record.year.trim().parse().ok(),
                    rating: record.rating,
                    brew_count: 1,
                    date_added: None,
                    notes: record.notes.clone(),
                    flavor_profile: record.flavor_tags.clone(),
                    price: None,
                });
                id
            }
        };

        log::info!("Saved brewing record for '{}' (tea #{})", record.name, id);
        self.records.push(record);
        Ok(id)
    }

    fn next_id(&self) -> u32 {
        self.teas.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::Label;

    #[test]
    fn test_sample_loads() {
        let journal = MemoryJournal::with_sample().unwrap();
        assert_eq!(journal.teas().len(), 6);
        assert_eq!(journal.records().len(), 5);
        assert!(journal.teas().iter().all(|t| t.price.is_some()));
        assert!(journal.teas().iter().all(|t| t.date_added.is_some()));
    }

    #[test]
    fn test_save_rejects_invalid_record() {
        let mut journal = MemoryJournal::new();
        assert_eq!(
            journal.save(TeaRecord::new("", "綠茶")),
            Err(RecordError::MissingName)
        );
        assert!(journal.teas().is_empty());
        assert!(journal.records().is_empty());
    }

    #[test]
    fn test_save_new_tea() {
        let mut journal = MemoryJournal::new();
        let mut record = TeaRecord::new("東方美人", "青茶(烏龍)");
        record.year = "2022".to_string();
        record.toggle_flavor(&Label::from("蜂蜜"));

        let id = journal.save(record).unwrap();
        assert_eq!(id, 1);

        let tea = &journal.teas()[0];
        assert_eq!(tea.brew_count, 1);
        assert_eq!(tea.year, Some(2022));
        assert!(tea.flavor_profile.contains("蜂蜜"));
        assert_eq!(journal.records().len(), 1);
    }

    #[test]
    fn test_save_existing_tea_bumps_count_and_merges_flavors() {
        let mut journal = MemoryJournal::with_sample().unwrap();
        let before = journal
            .teas()
            .iter()
            .find(|t| t.name.as_str() == "大益7542")
            .cloned()
            .unwrap();

        let mut record = TeaRecord::new("大益7542", "普洱生茶");
        record.toggle_flavor(&Label::from("甘甜"));
        record.toggle_flavor(&Label::from("烟熏"));

        let id = journal.save(record).unwrap();
        assert_eq!(id, before.id);

        let after = journal.teas().iter().find(|t| t.id == id).unwrap();
        assert_eq!(after.brew_count, before.brew_count + 1);
        assert!(after.flavor_profile.contains("烟熏"));
        assert_eq!(after.flavor_profile.len(), before.flavor_profile.len() + 1);
        assert_eq!(journal.teas().len(), 6);
    }

    #[test]
    fn test_new_ids_follow_highest() {
        let mut journal = MemoryJournal::with_sample().unwrap();
        let highest = journal.teas().iter().map(|t| t.id).max().unwrap();
        let id = journal.save(TeaRecord::new("凍頂烏龍", "青茶(烏龍)")).unwrap();
        assert_eq!(id, highest + 1);
    }
}

use flavorwheel::journal::{BREWING_METHODS, TEA_TYPES, TeaRecord};

pub const WEIGHT_STEP: f64 = 0.5;
pub const WATER_TEMP_STEP: f64 = 5.0;
pub const STEEP_TIME_STEP: f64 = 10.0;
pub const ROUNDS_STEP: f64 = 1.0;
pub const RATING_STEP: f64 = 0.5;

/// One widget change on the record form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Name(String),
    TeaType(u32),
    Origin(String),
    Year(String),
    Grade(String),
    BrewingMethod(u32),
    Notes(String),
    Weight(f64),
    WaterTemp(f64),
    SteepTime(f64),
    Rounds(f64),
    Rating(f64),
}

impl FormEdit {
    /// Writes the edit into the draft. Dropdown indices past the list clear the
    /// field, which validation then reports.
    pub fn apply(self, draft: &mut TeaRecord) {
        match self {
            Self::Name(name) => draft.name = name.trim().into(),
            Self::TeaType(index) => draft.tea_type = choice(TEA_TYPES, index),
            Self::Origin(origin) => draft.origin = origin,
            Self::Year(year) => draft.year = year,
            Self::Grade(grade) => draft.grade = grade,
            Self::BrewingMethod(index) => draft.brewing_method = choice(BREWING_METHODS, index),
            Self::Notes(notes) => draft.notes = notes,
            Self::Weight(grams) => draft.params.weight = grams,
            Self::WaterTemp(celsius) => draft.params.water_temp = whole(celsius),
            Self::SteepTime(seconds) => draft.params.steep_time = whole(seconds),
            Self::Rounds(rounds) => draft.params.rounds = whole(rounds),
            Self::Rating(rating) => draft.rating = rating,
        }
    }
}

/// Fresh draft matching the form's initial widget state.
pub fn initial_draft() -> TeaRecord {
    let mut draft = TeaRecord::default();
    FormEdit::TeaType(0).apply(&mut draft);
    FormEdit::BrewingMethod(0).apply(&mut draft);
    draft
}

fn choice(options: &[&str], index: u32) -> String {
    options
        .get(index as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn whole(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavorwheel::journal::{BrewParams, MemoryJournal, RecordError};

    #[test]
    fn test_initial_draft_needs_only_a_name() {
        let mut draft = initial_draft();
        assert_eq!(draft.tea_type, TEA_TYPES[0]);
        assert_eq!(draft.brewing_method, BREWING_METHODS[0]);
        assert_eq!(draft.validate(), Err(RecordError::MissingName));

        FormEdit::Name("  西湖龍井 ".to_string()).apply(&mut draft);
        assert_eq!(draft.name.as_str(), "西湖龍井");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_edits_fill_every_field() {
        let mut draft = initial_draft();
        let edits = vec![
            FormEdit::Name("凍頂烏龍".to_string()),
            FormEdit::TeaType(3),
            FormEdit::Origin("南投鹿谷".to_string()),
            FormEdit::Year("2021".to_string()),
            FormEdit::Grade("特等".to_string()),
            FormEdit::BrewingMethod(1),
            FormEdit::Notes("焙火香沉穩".to_string()),
            FormEdit::Weight(8.5),
            FormEdit::WaterTemp(90.0),
            FormEdit::SteepTime(45.0),
            FormEdit::Rounds(6.0),
            FormEdit::Rating(4.5),
        ];
        for edit in edits {
            edit.apply(&mut draft);
        }

        assert_eq!(draft.tea_type, "青茶(烏龍)");
        assert_eq!(draft.origin, "南投鹿谷");
        assert_eq!(draft.year, "2021");
        assert_eq!(draft.grade, "特等");
        assert_eq!(draft.brewing_method, "紫砂壺");
        assert_eq!(draft.notes, "焙火香沉穩");
        assert_eq!(
            draft.params,
            BrewParams {
                weight: 8.5,
                water_temp: 90,
                steep_time: 45,
                rounds: 6,
            }
        );
        assert_eq!(draft.rating, 4.5);
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let mut draft = initial_draft();
        FormEdit::Name("大紅袍".to_string()).apply(&mut draft);

        FormEdit::WaterTemp(65.0).apply(&mut draft);
        assert!(matches!(
            draft.validate(),
            Err(RecordError::OutOfRange {
                field: "water_temp",
                ..
            })
        ));

        FormEdit::WaterTemp(100.0).apply(&mut draft);
        FormEdit::TeaType(99).apply(&mut draft);
        assert_eq!(draft.validate(), Err(RecordError::MissingType));
    }

    #[test]
    fn test_saved_form_values_reach_stats() {
        let mut journal = MemoryJournal::new();
        let mut draft = initial_draft();
        FormEdit::Name("正山小種".to_string()).apply(&mut draft);
        FormEdit::WaterTemp(85.0).apply(&mut draft);
        FormEdit::Rounds(4.0).apply(&mut draft);

        journal.save(draft).unwrap();
        let stats = journal.stats();
        assert_eq!(stats.favorite_temperature, Some(85));
        assert_eq!(stats.average_rounds, Some(4.0));
    }
}

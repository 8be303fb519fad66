use super::{TeaName, TeaRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrewingStats {
    pub total_sessions: usize,
    pub average_rating: Option<f64>,
    pub favorite_temperature: Option<u32>,
    pub average_rounds: Option<f64>,
    pub most_brewed: Option<TeaName>,
    pub best_rated: Option<TeaName>,
}

impl BrewingStats {
    pub fn from_records(records: &[TeaRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let count = records.len() as f64;
        let average = |f: fn(&TeaRecord) -> f64| records.iter().map(f).sum::<f64>() / count;

        Self {
            total_sessions: records.len(),
            average_rating: Some(average(|r| r.rating)),
            favorite_temperature: most_common(records.iter().map(|r| r.params.water_temp)),
            average_rounds: Some(average(|r| f64::from(r.params.rounds))),
            most_brewed: most_common(records.iter().map(|r| r.name.clone())),
            best_rated: records
                .iter()
                .reduce(|best, r| if r.rating > best.rating { r } else { best })
                .map(|r| r.name.clone()),
        }
    }
}

/// Most frequent item; ties go to whichever was seen first.
fn most_common<T: PartialEq>(items: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }

    counts
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(item, _)| item)
}

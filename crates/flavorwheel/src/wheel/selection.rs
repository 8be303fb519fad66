use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
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
pub struct Label(String);

crate::impl_string_newtype!(Label);

/// Caller-owned set of selected labels, flat across both rings.
///
/// Insertion order is kept so hosts can list the flavors in the order they were
/// picked, but equality only compares membership.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Deref, Into)]
#[serde(from = "Vec<Label>", into = "Vec<Label>")]
pub struct Selection(Vec<Label>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l.as_str() == label)
    }

    /// The set with `label` removed if present, appended otherwise.
    pub fn toggled(&self, label: &Label) -> Self {
        if self.contains(label) {
            Self(self.0.iter().filter(|l| *l != label).cloned().collect())
        } else {
            let mut labels = self.0.clone();
            labels.push(label.clone());
            Self(labels)
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.0
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|l| other.contains(l))
    }
}

impl Eq for Selection {}

impl From<Vec<Label>> for Selection {
    fn from(labels: Vec<Label>) -> Self {
        labels.into_iter().collect()
    }
}

impl<L: Into<Label>> FromIterator<L> for Selection {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut selection = Self::new();
        for label in iter.into_iter().map(Into::into) {
            if !selection.contains(&label) {
                selection.0.push(label);
            }
        }
        selection
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

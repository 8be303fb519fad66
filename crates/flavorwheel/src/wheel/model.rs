use super::selection::Label;
use crate::geometry::{Point, Polar, WheelGeometry, slice_index};
use palette::Srgb;
use std::collections::HashSet;
use std::f64::consts::TAU;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WheelError {
    #[error("wheel needs at least one category")]
    NoCategories,
    #[error("category '{0}' has no sub-labels")]
    EmptyCategory(Label),
    #[error("label '{0}' appears more than once")]
    DuplicateLabel(Label),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: Label,
    pub color: Srgb<u8>,
    pub sub_labels: Vec<Label>,
}

impl Category {
    pub fn new(
        name: impl Into<Label>,
        color: Srgb<u8>,
        sub_labels: impl IntoIterator<Item = impl Into<Label>>,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            sub_labels: sub_labels.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Ring {
    Outer,
    Inner,
}

/// Where a label lives on the wheel. Category names and sub-labels share one flat
/// namespace in the selection set; this keeps the two levels apart internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Category { sector: usize },
    SubLabel { sector: usize, index: usize },
}

impl Segment {
    pub fn sector(&self) -> usize {
        match *self {
            Self::Category { sector } | Self::SubLabel { sector, .. } => sector,
        }
    }

    pub fn ring(&self) -> Ring {
        match self {
            Self::Category { .. } => Ring::Outer,
            Self::SubLabel { .. } => Ring::Inner,
        }
    }
}

/// Immutable category layout of the wheel. Construction guarantees at least one
/// category, non-empty sub-labels everywhere and no label used twice.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfiguration {
    categories: Vec<Category>,
}

impl WheelConfiguration {
    pub fn new(categories: Vec<Category>) -> Result<Self, WheelError> {
        if categories.is_empty() {
            return Err(WheelError::NoCategories);
        }

        if let Some(empty) = categories.iter().find(|c| c.sub_labels.is_empty()) {
            return Err(WheelError::EmptyCategory(empty.name.clone()));
        }

        let mut seen = HashSet::new();
        for label in categories
            .iter()
            .flat_map(|c| std::iter::once(&c.name).chain(&c.sub_labels))
        {
            if !seen.insert(label) {
                return Err(WheelError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn sector_span(&self) -> f64 {
        TAU / self.len() as f64
    }

    pub fn sector_start(&self, sector: usize) -> f64 {
        sector as f64 * self.sector_span()
    }

    pub fn sub_span(&self, sector: usize) -> f64 {
        self.sector_span() / self.categories[sector].sub_labels.len() as f64
    }

    pub fn label(&self, segment: Segment) -> &Label {
        match segment {
            Segment::Category { sector } => &self.categories[sector].name,
            Segment::SubLabel { sector, index } => &self.categories[sector].sub_labels[index],
        }
    }

    /// Reverse lookup of a flat label. `None` for labels this wheel does not know.
    pub fn find(&self, label: &str) -> Option<Segment> {
        self.categories.iter().enumerate().find_map(|(sector, c)| {
            if c.name.as_str() == label {
                Some(Segment::Category { sector })
            } else {
                c.sub_labels
                    .iter()
                    .position(|s| s.as_str() == label)
                    .map(|index| Segment::SubLabel { sector, index })
            }
        })
    }

    pub fn segment_at(&self, geometry: &WheelGeometry, polar: Polar) -> Option<Segment> {
        if self.is_empty() || geometry.in_hub(polar) {
            return None;
        }

        let sector = slice_index(polar.angle, TAU, self.len());

        if geometry.in_outer_ring(polar) {
            Some(Segment::Category { sector })
        } else if geometry.in_inner_ring(polar) {
            let relative = polar.angle - self.sector_start(sector);
            let count = self.categories[sector].sub_labels.len();
            let index = slice_index(relative, self.sector_span(), count);
            Some(Segment::SubLabel { sector, index })
        } else {
            None
        }
    }

    pub fn label_at(&self, geometry: &WheelGeometry, cursor: Point) -> Option<&Label> {
        self.segment_at(geometry, geometry.locate(cursor))
            .map(|segment| self.label(segment))
    }
}

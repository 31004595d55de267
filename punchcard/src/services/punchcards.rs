//! Full punchcard builds.
//!
//! [`PunchcardSet`] runs the whole pipeline in one go: validate the dataset,
//! derive bounds, pick a timeframe, plan buckets, aggregate every identity,
//! then color each grid on a scale shared by all identities. There is no
//! incremental path; every change goes through a complete rebuild.

use log::{debug, info, warn};
use std::collections::BTreeMap;

use super::aggregation::{aggregate, BucketLayout, NumericGrid};
use crate::api::{Cell, GridColumn, Punchcard};
use crate::config::{BuildOptions, ResolvedOptions};
use crate::error::{PunchcardError, PunchcardResult};
use crate::models::{Bounds, ColorScale, Dataset, RgbColor, Timeframe};
use crate::parsing::DataConverter;
use crate::time::{select_timeframe, TimeframePolicy, PREFERRED_COLUMNS};

/// Explicit timeframes producing more than this many times the preferred
/// column count are reported as unusually wide.
const WIDE_GRID_FACTOR: f64 = 10.0;

/// An immutable snapshot of punchcards for every identity in a dataset.
#[derive(Debug, Clone)]
pub struct PunchcardSet {
    dataset: Dataset,
    options: ResolvedOptions,
    bounds: Bounds,
    layout: BucketLayout,
    grids: BTreeMap<String, NumericGrid>,
    cards: BTreeMap<String, Punchcard>,
    max_value: f64,
}

impl PunchcardSet {
    /// Build punchcards for `dataset`.
    ///
    /// # Errors
    /// - [`PunchcardError::MalformedColor`](crate::PunchcardError::MalformedColor) for a bad color option
    /// - [`PunchcardError::InvalidObservation`](crate::PunchcardError::InvalidObservation) for a negative or non-finite value
    /// - [`PunchcardError::EmptyDataset`](crate::PunchcardError::EmptyDataset) when there are no observations
    /// - [`PunchcardError::ValueOverflow`](crate::PunchcardError::ValueOverflow) when a bucket total is not finite
    pub fn build(dataset: Dataset, options: &BuildOptions) -> PunchcardResult<Self> {
        let resolved = options.resolve()?;
        Self::assemble(dataset, resolved)
    }

    /// Convert `raw` with `converter`, then [`build`](Self::build).
    ///
    /// Converter failures surface as
    /// [`PunchcardError::Conversion`](crate::PunchcardError::Conversion).
    pub fn from_raw<T, C>(raw: T, converter: C, options: &BuildOptions) -> PunchcardResult<Self>
    where
        C: DataConverter<T>,
    {
        let resolved = options.resolve()?;
        let dataset = converter.convert(raw)?;
        Self::assemble(dataset, resolved)
    }

    fn assemble(dataset: Dataset, options: ResolvedOptions) -> PunchcardResult<Self> {
        dataset.validate()?;
        let bounds = Bounds::from_dataset(&dataset)?;

        let timeframe = match options.timeframe {
            Some(timeframe) => timeframe,
            None => {
                let selected = select_timeframe(bounds.earliest, bounds.latest);
                debug!(
                    "Selected {} timeframe for a span of {:.2} days",
                    selected,
                    bounds.span_days()
                );
                selected
            }
        };

        let layout = BucketLayout::plan(&bounds, TimeframePolicy::new(timeframe))?;
        debug!(
            "Planned {} buckets over {} columns (buffer rows: {})",
            layout.buckets().len(),
            layout.column_count(),
            layout.buffer_rows()
        );
        if options.timeframe.is_some()
            && layout.column_count() as f64 > WIDE_GRID_FACTOR * PREFERRED_COLUMNS
        {
            warn!(
                "{} timeframe produces {} columns; a coarser timeframe may read better",
                timeframe,
                layout.column_count()
            );
        }

        let grids: BTreeMap<String, NumericGrid> = dataset
            .iter()
            .map(|(identity, observations)| (identity.to_string(), aggregate(observations, &layout)))
            .collect();

        // Finite values can still sum past f64::MAX inside one bucket.
        if let Some((identity, _)) = grids.iter().find(|(_, grid)| !grid.max_value().is_finite()) {
            return Err(PunchcardError::ValueOverflow {
                identity: identity.clone(),
            });
        }

        let max_value = grids
            .values()
            .map(NumericGrid::max_value)
            .fold(0.0, f64::max);

        let cards = grids
            .iter()
            .map(|(identity, grid)| {
                let card = color_grid(identity, grid, &layout, &options.colors, max_value);
                (identity.clone(), card)
            })
            .collect();

        info!(
            "Built {} punchcard(s): timeframe={}, columns={}, max_value={}",
            grids.len(),
            timeframe,
            layout.column_count(),
            max_value
        );

        Ok(Self {
            dataset,
            options,
            bounds,
            layout,
            grids,
            cards,
            max_value,
        })
    }

    /// Replace the data and rebuild. The timeframe override and colors are kept.
    ///
    /// On error the current snapshot is left untouched.
    pub fn set_dataset(&mut self, dataset: Dataset) -> PunchcardResult<()> {
        *self = Self::assemble(dataset, self.options)?;
        Ok(())
    }

    /// Fix the timeframe, or pass `None` to select it from the data again.
    pub fn set_timeframe(&mut self, timeframe: Option<Timeframe>) -> PunchcardResult<()> {
        let options = ResolvedOptions {
            timeframe,
            ..self.options
        };
        *self = Self::assemble(self.dataset.clone(), options)?;
        Ok(())
    }

    /// Change the color endpoints; `None` keeps the current color for that end.
    pub fn set_colors(&mut self, min_color: Option<&str>, max_color: Option<&str>) -> PunchcardResult<()> {
        let min = match min_color {
            Some(color) => RgbColor::from_hex(color)?,
            None => self.options.colors.min,
        };
        let max = match max_color {
            Some(color) => RgbColor::from_hex(color)?,
            None => self.options.colors.max,
        };
        let options = ResolvedOptions {
            colors: ColorScale::new(min, max),
            ..self.options
        };
        *self = Self::assemble(self.dataset.clone(), options)?;
        Ok(())
    }

    pub fn timeframe(&self) -> Timeframe {
        self.layout.timeframe()
    }

    /// Whether the timeframe was fixed by the caller rather than selected.
    pub fn is_timeframe_explicit(&self) -> bool {
        self.options.timeframe.is_some()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Largest bucket total across every identity.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn min_color(&self) -> RgbColor {
        self.options.colors.min
    }

    pub fn max_color(&self) -> RgbColor {
        self.options.colors.max
    }

    pub fn row_headers(&self) -> &'static [&'static str] {
        self.layout.policy().row_headers()
    }

    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    pub fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, identity: &str) -> Option<&Punchcard> {
        self.cards.get(identity)
    }

    /// Every punchcard, ordered by identity.
    pub fn cards(&self) -> impl Iterator<Item = &Punchcard> {
        self.cards.values()
    }

    pub fn numeric_grid(&self, identity: &str) -> Option<&NumericGrid> {
        self.grids.get(identity)
    }
}

/// Turn one identity's totals into colored cells with thinned headers.
pub fn color_grid(
    identity: &str,
    grid: &NumericGrid,
    layout: &BucketLayout,
    scale: &ColorScale,
    max_value: f64,
) -> Punchcard {
    let policy = layout.policy();
    let mut previous: Option<&str> = None;

    let columns = grid
        .columns()
        .iter()
        .zip(layout.column_labels())
        .enumerate()
        .map(|(index, (values, label))| {
            let header = policy
                .shows_column_header(index, label, previous)
                .then(|| label.clone());
            previous = Some(label.as_str());

            let cells = values
                .iter()
                .map(|value| match value {
                    Some(v) => Cell::Color(scale.color_for(*v, max_value)),
                    None => Cell::Transparent,
                })
                .collect();

            GridColumn { header, cells }
        })
        .collect();

    Punchcard {
        identity: identity.to_string(),
        timeframe: policy.timeframe(),
        columns,
        row_headers: policy.row_headers().iter().map(|h| h.to_string()).collect(),
    }
}

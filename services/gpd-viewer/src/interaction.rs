//! Slider-driven selection of the fixed `x` and `t` indices.
//!
//! Selectors report a domain value (what the slider displays), which is
//! resolved back to an index by exact lookup in the axis values. Every
//! successful selection marks the state dirty; the render loop consumes the
//! flag with [`InteractionState::take_dirty`].

use std::fmt;
use std::str::FromStr;

use gpd_common::{Axis, GpdError, GpdResult, SampleArray, SliceIndex};
use gpd_grid::GpdDataset;

/// A change event coming from one of the two selectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// Select `x` by domain value.
    X(f64),
    /// Select `t` by domain value.
    T(f64),
    /// Select `x` by index.
    XIndex(usize),
    /// Select `t` by index.
    TIndex(usize),
}

impl SelectionEvent {
    pub fn axis(&self) -> Axis {
        match self {
            SelectionEvent::X(_) | SelectionEvent::XIndex(_) => Axis::X,
            SelectionEvent::T(_) | SelectionEvent::TIndex(_) => Axis::T,
        }
    }
}

impl fmt::Display for SelectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionEvent::X(v) => write!(f, "x={}", v),
            SelectionEvent::T(v) => write!(f, "t={}", v),
            SelectionEvent::XIndex(i) => write!(f, "x_index={}", i),
            SelectionEvent::TIndex(i) => write!(f, "t_index={}", i),
        }
    }
}

impl FromStr for SelectionEvent {
    type Err = GpdError;

    /// Parse `x=0.25`, `t -0.3`, `x_index=4` or `t_index 0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GpdError::InvalidConfig(format!("invalid selection '{}'", s));

        let mut parts = s
            .split(|c: char| c == '=' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let key = parts.next().ok_or_else(invalid)?;
        let value = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let (axis_name, by_index) = match key.strip_suffix("_index") {
            Some(base) => (base, true),
            None => (key, false),
        };

        match (Axis::parse(axis_name), by_index) {
            (Some(Axis::X), false) => value.parse().map(SelectionEvent::X).map_err(|_| invalid()),
            (Some(Axis::T), false) => value.parse().map(SelectionEvent::T).map_err(|_| invalid()),
            (Some(Axis::X), true) => value.parse().map(SelectionEvent::XIndex).map_err(|_| invalid()),
            (Some(Axis::T), true) => value.parse().map(SelectionEvent::TIndex).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

/// Parse an event script: one selection per line, `#` starts a comment.
pub fn parse_event_script(script: &str) -> GpdResult<Vec<SelectionEvent>> {
    let mut events = Vec::new();
    for (n, line) in script.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let event = line
            .parse()
            .map_err(|e| GpdError::InvalidConfig(format!("line {}: {}", n + 1, e)))?;
        events.push(event);
    }
    Ok(events)
}

/// One selector bound to the values of a single, non-empty axis.
#[derive(Debug, Clone)]
pub struct AxisSelector {
    axis: Axis,
    values: SampleArray,
    index: usize,
}

impl AxisSelector {
    /// Create a selector positioned at index 0.
    pub fn new(axis: Axis, values: SampleArray) -> GpdResult<Self> {
        if values.is_empty() {
            return Err(GpdError::EmptyArray(axis.to_string()));
        }
        Ok(Self {
            axis,
            values,
            index: 0,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Domain value at the current index.
    pub fn value(&self) -> f64 {
        self.values[self.index]
    }

    /// Exact-match lookup of a domain value.
    pub fn resolve(&self, value: f64) -> GpdResult<usize> {
        self.values
            .position_of(value)
            .ok_or(GpdError::ValueNotFound {
                axis: self.axis,
                value,
            })
    }

    fn set_index(&mut self, index: usize) -> GpdResult<()> {
        if index >= self.values.len() {
            return Err(GpdError::IndexOutOfRange {
                axis: self.axis,
                index,
                len: self.values.len(),
            });
        }
        self.index = index;
        Ok(())
    }
}

/// The selected slice plus the dirty flag the render loop polls.
#[derive(Debug, Clone)]
pub struct InteractionState {
    x: AxisSelector,
    t: AxisSelector,
    dirty: bool,
    generation: u64,
}

impl InteractionState {
    /// Start at `(0, 0)`, dirty so the first tick renders.
    pub fn new(x_values: SampleArray, t_values: SampleArray) -> GpdResult<Self> {
        Ok(Self {
            x: AxisSelector::new(Axis::X, x_values)?,
            t: AxisSelector::new(Axis::T, t_values)?,
            dirty: true,
            generation: 0,
        })
    }

    pub fn from_dataset(dataset: &GpdDataset) -> GpdResult<Self> {
        Self::new(
            dataset.axis(Axis::X).clone(),
            dataset.axis(Axis::T).clone(),
        )
    }

    /// Select `x` by domain value. Returns the resolved index.
    pub fn select_x(&mut self, value: f64) -> GpdResult<usize> {
        let index = self.x.resolve(value)?;
        self.x.set_index(index)?;
        self.mark_dirty();
        Ok(index)
    }

    /// Select `t` by domain value. Returns the resolved index.
    pub fn select_t(&mut self, value: f64) -> GpdResult<usize> {
        let index = self.t.resolve(value)?;
        self.t.set_index(index)?;
        self.mark_dirty();
        Ok(index)
    }

    pub fn select_x_index(&mut self, index: usize) -> GpdResult<()> {
        self.x.set_index(index)?;
        self.mark_dirty();
        Ok(())
    }

    pub fn select_t_index(&mut self, index: usize) -> GpdResult<()> {
        self.t.set_index(index)?;
        self.mark_dirty();
        Ok(())
    }

    /// Apply a selector event; on error nothing changes.
    pub fn apply(&mut self, event: SelectionEvent) -> GpdResult<SliceIndex> {
        match event {
            SelectionEvent::X(v) => self.select_x(v).map(|_| ())?,
            SelectionEvent::T(v) => self.select_t(v).map(|_| ())?,
            SelectionEvent::XIndex(i) => self.select_x_index(i)?,
            SelectionEvent::TIndex(i) => self.select_t_index(i)?,
        }
        Ok(self.slice_index())
    }

    pub fn slice_index(&self) -> SliceIndex {
        SliceIndex::new(self.x.index(), self.t.index())
    }

    pub fn x(&self) -> &AxisSelector {
        &self.x
    }

    pub fn t(&self) -> &AxisSelector {
        &self.t
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of successful selections so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consume the dirty flag, returning the slice to rebuild if it was set.
    pub fn take_dirty(&mut self) -> Option<SliceIndex> {
        if std::mem::take(&mut self.dirty) {
            Some(self.slice_index())
        } else {
            None
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InteractionState {
        InteractionState::new(
            SampleArray::new("x", vec![0.0, 1.0]),
            SampleArray::new("t", vec![100.0, 200.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_dirty_at_origin() {
        let mut s = state();
        assert!(s.is_dirty());
        assert_eq!(s.take_dirty(), Some(SliceIndex::new(0, 0)));
        assert!(!s.is_dirty());
        assert_eq!(s.take_dirty(), None);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn test_each_selection_marks_dirty_once() {
        let mut s = state();
        s.take_dirty();

        assert_eq!(s.select_x(1.0).unwrap(), 1);
        assert!(s.is_dirty());
        assert_eq!(s.generation(), 1);

        assert_eq!(s.select_t(200.0).unwrap(), 1);
        assert_eq!(s.generation(), 2);

        assert_eq!(s.take_dirty(), Some(SliceIndex::new(1, 1)));
        assert_eq!(s.take_dirty(), None);
    }

    #[test]
    fn test_unknown_value_leaves_state_untouched() {
        let mut s = state();
        s.take_dirty();
        s.select_x(1.0).unwrap();
        s.take_dirty();

        let err = s.select_x(0.5).unwrap_err();
        assert!(matches!(err, GpdError::ValueNotFound { axis: Axis::X, .. }));
        assert!(!s.is_dirty());
        assert_eq!(s.x().index(), 1);
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn test_index_selection_is_bounds_checked() {
        let mut s = state();
        s.take_dirty();
        assert!(matches!(
            s.select_t_index(2),
            Err(GpdError::IndexOutOfRange { axis: Axis::T, index: 2, len: 2 })
        ));
        assert!(!s.is_dirty());

        s.select_t_index(1).unwrap();
        assert_eq!(s.t().value(), 200.0);
    }

    #[test]
    fn test_reselecting_same_value_still_marks_dirty() {
        let mut s = state();
        s.take_dirty();
        s.select_x(0.0).unwrap();
        assert!(s.is_dirty());
    }

    #[test]
    fn test_apply_events() {
        let mut s = state();
        assert_eq!(s.apply(SelectionEvent::T(200.0)).unwrap(), SliceIndex::new(0, 1));
        assert_eq!(s.apply(SelectionEvent::XIndex(1)).unwrap(), SliceIndex::new(1, 1));
        assert!(s.apply(SelectionEvent::X(3.0)).is_err());
    }

    #[test]
    fn test_parse_events() {
        assert_eq!("x=0.25".parse::<SelectionEvent>().unwrap(), SelectionEvent::X(0.25));
        assert_eq!("t -0.5".parse::<SelectionEvent>().unwrap(), SelectionEvent::T(-0.5));
        assert_eq!(
            "x_index = 4".parse::<SelectionEvent>().unwrap(),
            SelectionEvent::XIndex(4)
        );
        assert_eq!(
            "t_index=0".parse::<SelectionEvent>().unwrap(),
            SelectionEvent::TIndex(0)
        );
        assert_eq!("T=200".parse::<SelectionEvent>().unwrap(), SelectionEvent::T(200.0));
        assert!("q2=1".parse::<SelectionEvent>().is_err());
        assert!("xi_index=1".parse::<SelectionEvent>().is_err());
        assert!("x".parse::<SelectionEvent>().is_err());
        assert!("x=abc".parse::<SelectionEvent>().is_err());
        assert!("x=1 2".parse::<SelectionEvent>().is_err());
    }

    #[test]
    fn test_parse_event_script() {
        let script = "# sweep x\nx 0\n\nx=1   # last x\nt_index 1\n";
        assert_eq!(
            parse_event_script(script).unwrap(),
            vec![
                SelectionEvent::X(0.0),
                SelectionEvent::X(1.0),
                SelectionEvent::TIndex(1),
            ]
        );

        let err = parse_event_script("x 0\nbogus\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_event_display_round_trips() {
        for event in [
            SelectionEvent::X(0.125),
            SelectionEvent::T(-1.5),
            SelectionEvent::XIndex(3),
            SelectionEvent::TIndex(7),
        ] {
            assert_eq!(event.to_string().parse::<SelectionEvent>().unwrap(), event);
        }
    }

    #[test]
    fn test_empty_axis_rejected() {
        let result = InteractionState::new(
            SampleArray::new("x", vec![]),
            SampleArray::new("t", vec![1.0]),
        );
        assert!(matches!(result, Err(GpdError::EmptyArray(_))));
    }
}

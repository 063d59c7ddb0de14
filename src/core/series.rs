use serde::{Deserialize, Serialize};

/// One labelled sample of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Ordered `{label, value}` pairs exchanged between aggregation and charts.
///
/// Order is meaningful: categorical series keep first-occurrence order and
/// time series are already sorted chronologically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSeries {
    points: Vec<SeriesPoint>,
}

impl ChartSeries {
    #[must_use]
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SeriesPoint> {
        self.points.get(index)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|point| point.label.as_str())
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.values().sum()
    }
}

impl FromIterator<SeriesPoint> for ChartSeries {
    fn from_iter<T: IntoIterator<Item = SeriesPoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for ChartSeries {
    fn from_iter<T: IntoIterator<Item = (L, f64)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(label, value)| SeriesPoint::new(label, value))
            .collect()
    }
}

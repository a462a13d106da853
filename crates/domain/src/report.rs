use crate::ReadError;

pub trait ReportService {
    /// Count the flats per status.
    ///
    /// Fails with [`ReadError::NoData`] if there are no flats.
    fn get_status_counts(&self) -> Result<StatusCounts, ReadError>;
}

pub trait ReportRepository {
    fn read_status_counts(&self) -> Result<StatusCounts, ReadError>;
}

/// Number of flats per status label, most frequent label first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusCounts(Vec<(String, u64)>);

impl StatusCounts {
    #[must_use]
    pub fn new(counts: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut merged: Vec<(String, u64)> = vec![];
        for (label, count) in counts {
            if count == 0 {
                continue;
            }
            match merged.iter_mut().find(|(l, _)| *l == label) {
                Some((_, c)) => *c += count,
                None => merged.push((label, count)),
            }
        }
        merged.sort_by(|(a_label, a_count), (b_label, b_count)| {
            b_count.cmp(a_count).then_with(|| a_label.cmp(b_label))
        });
        Self(merged)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| c).sum()
    }

    /// Share of a count in the total in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, count: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64 * 100.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

use crate::flow::StepId;
use serde::Serialize;

pub const PROGRESS_TOTAL: u8 = 6;

// Branches reach the same ordinal at different real depths.
const PROGRESS_TABLE: [(StepId, u8); 13] = [
    (StepId::Start, 1),
    (StepId::PathALevel, 2),
    (StepId::PathAInterest, 3),
    (StepId::PathBArea, 3),
    (StepId::PathBServiceClients, 4),
    (StepId::PathBServiceDifficulty, 5),
    (StepId::PathBProductRevenue, 4),
    (StepId::PathBProductDifficulty, 5),
    (StepId::PathCArea, 2),
    (StepId::PathCDesc, 3),
    (StepId::PathCRevenue, 4),
    (StepId::ResultElecti, 5),
    (StepId::ResultCalendly, 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: u8,
    pub total: u8,
}

impl Progress {
    pub fn ratio(self) -> f64 {
        f64::from(self.current) / f64::from(self.total)
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Coarse ordinal for a progress indicator. Unmapped steps read as 1.
pub fn progress_of(step: StepId) -> u8 {
    PROGRESS_TABLE
        .iter()
        .find(|(id, _)| *id == step)
        .map(|(_, ordinal)| *ordinal)
        .unwrap_or(1)
}

pub fn progress_snapshot(step: StepId) -> Progress {
    Progress {
        current: progress_of(step),
        total: PROGRESS_TOTAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::ALL_STEP_IDS;

    #[test]
    fn parallel_branches_share_ordinals() {
        assert_eq!(progress_of(StepId::PathAInterest), 3);
        assert_eq!(progress_of(StepId::PathBArea), 3);
        assert_eq!(progress_of(StepId::PathCDesc), 3);
    }

    #[test]
    fn every_step_maps_inside_range() {
        for id in ALL_STEP_IDS {
            let ordinal = progress_of(id);
            assert!((1..=PROGRESS_TOTAL).contains(&ordinal), "{id} -> {ordinal}");
        }
        assert_eq!(progress_of(StepId::Start), 1);
        assert_eq!(progress_of(StepId::ResultCalendly), PROGRESS_TOTAL);
    }

    #[test]
    fn snapshot_formats_as_fraction() {
        let progress = progress_snapshot(StepId::PathCRevenue);
        assert_eq!(progress.to_string(), "4/6");
        assert!((progress.ratio() - 4.0 / 6.0).abs() < f64::EPSILON);
    }
}

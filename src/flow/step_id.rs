use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a node in the quiz graph. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepId {
    Start,
    PathALevel,
    PathAInterest,
    PathBArea,
    PathBServiceClients,
    PathBServiceDifficulty,
    PathBProductRevenue,
    PathBProductDifficulty,
    PathCArea,
    PathCDesc,
    PathCRevenue,
    ResultElecti,
    ResultCalendly,
}

pub const ALL_STEP_IDS: [StepId; 13] = [
    StepId::Start,
    StepId::PathALevel,
    StepId::PathAInterest,
    StepId::PathBArea,
    StepId::PathBServiceClients,
    StepId::PathBServiceDifficulty,
    StepId::PathBProductRevenue,
    StepId::PathBProductDifficulty,
    StepId::PathCArea,
    StepId::PathCDesc,
    StepId::PathCRevenue,
    StepId::ResultElecti,
    StepId::ResultCalendly,
];

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Start => "START",
            StepId::PathALevel => "PATH_A_LEVEL",
            StepId::PathAInterest => "PATH_A_INTEREST",
            StepId::PathBArea => "PATH_B_AREA",
            StepId::PathBServiceClients => "PATH_B_SERVICE_CLIENTS",
            StepId::PathBServiceDifficulty => "PATH_B_SERVICE_DIFFICULTY",
            StepId::PathBProductRevenue => "PATH_B_PRODUCT_REVENUE",
            StepId::PathBProductDifficulty => "PATH_B_PRODUCT_DIFFICULTY",
            StepId::PathCArea => "PATH_C_AREA",
            StepId::PathCDesc => "PATH_C_DESC",
            StepId::PathCRevenue => "PATH_C_REVENUE",
            StepId::ResultElecti => "RESULT_ELECTI",
            StepId::ResultCalendly => "RESULT_CALENDLY",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim();
        ALL_STEP_IDS
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| format!("unknown step id `{normalized}`"))
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for StepId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StepId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_canonical_name() {
        for id in ALL_STEP_IDS {
            assert_eq!(StepId::parse(id.as_str()), Ok(id));
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(StepId::parse("  path_c_desc "), Ok(StepId::PathCDesc));
        assert!(StepId::parse("PATH_D").is_err());
    }

    #[test]
    fn serializes_as_canonical_string() {
        let encoded = serde_json::to_string(&StepId::PathBProductRevenue).expect("encode");
        assert_eq!(encoded, "\"PATH_B_PRODUCT_REVENUE\"");
        let decoded: StepId = serde_json::from_str("\"RESULT_ELECTI\"").expect("decode");
        assert_eq!(decoded, StepId::ResultElecti);
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of analysis agents a briefing can be attributed to.
///
/// There is deliberately no "unknown" variant: unrecognized authors are
/// attributed to [`SourceAgent::RecoveryCoordinator`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SourceAgent {
    #[default]
    RecoveryCoordinator,
    BurnAnalyst,
    TrailAssessor,
    CruisingAssistant,
    NepaAdvisor,
}

impl SourceAgent {
    pub const ALL: [SourceAgent; 5] = [
        SourceAgent::RecoveryCoordinator,
        SourceAgent::BurnAnalyst,
        SourceAgent::TrailAssessor,
        SourceAgent::CruisingAssistant,
        SourceAgent::NepaAdvisor,
    ];

    /// Maps any author spelling onto a known agent.
    ///
    /// Input is lowercased and `-` becomes `_` before the table lookup.
    /// The final arm is the documented fallback, not an accident.
    pub fn normalize(author: &str) -> SourceAgent {
        let key = author.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "coordinator" | "recovery_coordinator" | "recoverycoordinator" => {
                SourceAgent::RecoveryCoordinator
            }
            "burn_analyst" | "burnanalyst" | "burn" => SourceAgent::BurnAnalyst,
            "trail_assessor" | "trailassessor" | "trail" => SourceAgent::TrailAssessor,
            "cruising_assistant" | "cruisingassistant" | "cruising" => {
                SourceAgent::CruisingAssistant
            }
            "nepa_advisor" | "nepaadvisor" | "nepa" => SourceAgent::NepaAdvisor,
            _ => SourceAgent::RecoveryCoordinator,
        }
    }

    /// Hyphenated id used by the chat/coordination surface.
    pub fn as_id(self) -> &'static str {
        match self {
            SourceAgent::RecoveryCoordinator => "recovery-coordinator",
            SourceAgent::BurnAnalyst => "burn-analyst",
            SourceAgent::TrailAssessor => "trail-assessor",
            SourceAgent::CruisingAssistant => "cruising-assistant",
            SourceAgent::NepaAdvisor => "nepa-advisor",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceAgent::RecoveryCoordinator => "recovery_coordinator",
            SourceAgent::BurnAnalyst => "burn_analyst",
            SourceAgent::TrailAssessor => "trail_assessor",
            SourceAgent::CruisingAssistant => "cruising_assistant",
            SourceAgent::NepaAdvisor => "nepa_advisor",
        }
    }

    /// The canonical data source this agent's findings are drawn from.
    pub fn data_source(self) -> DataSource {
        match self {
            SourceAgent::RecoveryCoordinator => DataSource {
                source_type: "RANGER",
                label: "Recovery coordination briefing",
            },
            SourceAgent::BurnAnalyst => DataSource {
                source_type: "MTBS",
                label: "Monitoring Trends in Burn Severity",
            },
            SourceAgent::TrailAssessor => DataSource {
                source_type: "TRACS",
                label: "Trail Assessment and Condition Surveys",
            },
            SourceAgent::CruisingAssistant => DataSource {
                source_type: "FSVeg",
                label: "Field Sampled Vegetation timber cruise",
            },
            SourceAgent::NepaAdvisor => DataSource {
                source_type: "FSM",
                label: "Forest Service Manual and NEPA handbook",
            },
        }
    }
}

impl fmt::Display for SourceAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSource {
    pub source_type: &'static str,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings_normalize_to_known_agents() {
        let cases = [
            ("burn-analyst", SourceAgent::BurnAnalyst),
            ("Burn_Analyst", SourceAgent::BurnAnalyst),
            ("burnanalyst", SourceAgent::BurnAnalyst),
            ("trail-assessor", SourceAgent::TrailAssessor),
            ("TrailAssessor", SourceAgent::TrailAssessor),
            ("cruising-assistant", SourceAgent::CruisingAssistant),
            ("nepa-advisor", SourceAgent::NepaAdvisor),
            ("NEPAAdvisor", SourceAgent::NepaAdvisor),
            ("recovery-coordinator", SourceAgent::RecoveryCoordinator),
            ("coordinator", SourceAgent::RecoveryCoordinator),
        ];
        for (input, expected) in cases {
            assert_eq!(SourceAgent::normalize(input), expected, "input {input}");
        }
    }

    #[test]
    fn unknown_authors_fall_back_to_coordinator() {
        assert_eq!(
            SourceAgent::normalize("weather-bot"),
            SourceAgent::RecoveryCoordinator
        );
        assert_eq!(SourceAgent::normalize(""), SourceAgent::RecoveryCoordinator);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_value(SourceAgent::BurnAnalyst).unwrap();
        assert_eq!(json, "burn_analyst");
    }
}

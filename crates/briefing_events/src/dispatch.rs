//! Keyword-scored agent selection for free-text questions.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::agent::SourceAgent;

// Table order is the tie-break order.
const KEYWORDS: &[(SourceAgent, &[&str])] = &[
    (
        SourceAgent::BurnAnalyst,
        &[
            r"\bburn",
            r"\bfire\b",
            r"\bseverity\b",
            r"\bdnbr\b",
            r"\bmtbs\b",
            r"\bperimeter",
            r"\bscorch",
            r"\bsoil\b",
        ],
    ),
    (
        SourceAgent::TrailAssessor,
        &[
            r"\btrail",
            r"\bbridge",
            r"\bdamage",
            r"\berosion\b",
            r"\bculvert",
            r"\btread\b",
            r"\bwashout",
            r"\bclosure",
        ],
    ),
    (
        SourceAgent::CruisingAssistant,
        &[
            r"\btimber\b",
            r"\bsalvage\b",
            r"\bcruis",
            r"\btrees?\b",
            r"\bvolume\b",
            r"\bboard feet\b",
            r"\bstand\b",
            r"\blogging\b",
        ],
    ),
    (
        SourceAgent::NepaAdvisor,
        &[
            r"\bnepa\b",
            r"\benvironmental\b",
            r"\bcompliance\b",
            r"\bcategorical exclusion\b",
            r"\bpermits?\b",
            r"\bregulat",
            r"\b(ea|eis)\b",
        ],
    ),
    (
        SourceAgent::RecoveryCoordinator,
        &[
            r"\bbriefing\b",
            r"\boverview\b",
            r"\bstatus\b",
            r"\bplan\b",
            r"\bprioriti",
            r"\bcoordinat",
        ],
    ),
];

fn scoring_table() -> &'static [(SourceAgent, Vec<Regex>)] {
    static TABLE: OnceLock<Vec<(SourceAgent, Vec<Regex>)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|(agent, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("static dispatch pattern"))
                    .collect();
                (*agent, compiled)
            })
            .collect()
    })
}

/// Number of the agent's keyword patterns matching the lowercased query.
pub fn score(agent: SourceAgent, query: &str) -> usize {
    let lowered = query.to_lowercase();
    scoring_table()
        .iter()
        .find(|(candidate, _)| *candidate == agent)
        .map(|(_, patterns)| patterns.iter().filter(|re| re.is_match(&lowered)).count())
        .unwrap_or(0)
}

/// Agents to consult for `query`, primary first.
///
/// An explicit target bypasses scoring. Otherwise agents with a non-zero
/// score are returned by descending score, ties in table order; when nothing
/// scores, the coordinator handles the query alone.
pub fn route(query: &str, explicit_target: Option<SourceAgent>) -> Vec<SourceAgent> {
    if let Some(target) = explicit_target {
        return vec![target];
    }

    let lowered = query.to_lowercase();
    let mut scored: Vec<(SourceAgent, usize)> = scoring_table()
        .iter()
        .map(|(agent, patterns)| {
            let hits = patterns.iter().filter(|re| re.is_match(&lowered)).count();
            (*agent, hits)
        })
        .filter(|(_, hits)| *hits > 0)
        .collect();
    // `sort_by` is stable, so equal scores keep table order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    debug!(?scored, "scored agents for query");

    if scored.is_empty() {
        return vec![SourceAgent::RecoveryCoordinator];
    }
    scored.into_iter().map(|(agent, _)| agent).collect()
}

/// A routed query split into the primary agent and cascade targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub primary: SourceAgent,
    pub cascade: Vec<SourceAgent>,
}

impl Dispatch {
    pub fn for_query(query: &str, explicit_target: Option<SourceAgent>) -> Self {
        let mut agents = route(query, explicit_target).into_iter();
        let primary = agents.next().unwrap_or_default();
        Self {
            primary,
            cascade: agents.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_target_bypasses_scoring() {
        assert_eq!(
            route("burn severity", Some(SourceAgent::NepaAdvisor)),
            vec![SourceAgent::NepaAdvisor]
        );
    }

    #[test]
    fn unmatched_query_goes_to_coordinator() {
        assert_eq!(
            route("hello there", None),
            vec![SourceAgent::RecoveryCoordinator]
        );
    }

    #[test]
    fn higher_score_comes_first() {
        let query = "What's the trail bridge damage near the burn zone?";
        assert_eq!(score(SourceAgent::TrailAssessor, query), 3);
        assert_eq!(score(SourceAgent::BurnAnalyst, query), 1);
        assert_eq!(
            route(query, None),
            vec![SourceAgent::TrailAssessor, SourceAgent::BurnAnalyst]
        );
    }

    #[test]
    fn ties_keep_table_order() {
        assert_eq!(
            route("timber near the fire", None),
            vec![SourceAgent::BurnAnalyst, SourceAgent::CruisingAssistant]
        );
    }

    #[test]
    fn dispatch_splits_primary_and_cascade() {
        let dispatch = Dispatch::for_query("NEPA permit and compliance for salvage", None);
        assert_eq!(dispatch.primary, SourceAgent::NepaAdvisor);
        assert_eq!(dispatch.cascade, vec![SourceAgent::CruisingAssistant]);
    }
}

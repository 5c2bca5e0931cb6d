use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A developmental area of the Portage inventory. Every question belongs to
/// exactly one area, and area scores are aggregated per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DevelopmentalArea {
    Socialization,
    Language,
    SelfHelp,
    Cognition,
    Motor,
    InfantStimulation,
}

impl DevelopmentalArea {
    /// Canonical display order, used whenever a catalog does not declare its own.
    pub const ALL: [DevelopmentalArea; 6] = [
        DevelopmentalArea::Socialization,
        DevelopmentalArea::Language,
        DevelopmentalArea::SelfHelp,
        DevelopmentalArea::Cognition,
        DevelopmentalArea::Motor,
        DevelopmentalArea::InfantStimulation,
    ];

    /// Wire identifier (`"self_help"`, ...).
    pub fn id(&self) -> &'static str {
        match self {
            DevelopmentalArea::Socialization => "socialization",
            DevelopmentalArea::Language => "language",
            DevelopmentalArea::SelfHelp => "self_help",
            DevelopmentalArea::Cognition => "cognition",
            DevelopmentalArea::Motor => "motor",
            DevelopmentalArea::InfantStimulation => "infant_stimulation",
        }
    }

    /// Human-readable label shown in tabulations and narrative prompts.
    pub fn label(&self) -> &'static str {
        match self {
            DevelopmentalArea::Socialization => "Socialization",
            DevelopmentalArea::Language => "Language",
            DevelopmentalArea::SelfHelp => "Self-Help",
            DevelopmentalArea::Cognition => "Cognition",
            DevelopmentalArea::Motor => "Motor Development",
            DevelopmentalArea::InfantStimulation => "Infant Stimulation",
        }
    }
}

impl std::fmt::Display for DevelopmentalArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

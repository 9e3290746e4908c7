//! Static catalogue of project deliverables.
//!
//! One entry per deliverable a project is expected to produce, grouped by
//! lifecycle [`Stage`] and management [`Area`]. The table is reference data:
//! ids are globally unique, stable across catalogue revisions (relabeling
//! preserves the id), and declaration order is the canonical ordering for
//! flattened views and CSV export.

use crate::models::{Area, Stage};

/// A single deliverable definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverableDef {
    pub id: &'static str,
    pub stage: Stage,
    pub area: Area,
    pub label: &'static str,
}

const fn entry(
    id: &'static str,
    stage: Stage,
    area: Area,
    label: &'static str,
) -> DeliverableDef {
    DeliverableDef { id, stage, area, label }
}

/// Every deliverable definition, in declaration order.
pub fn all() -> &'static [DeliverableDef] {
    CATALOGUE
}

/// Look up a definition by its stable id.
pub fn find(id: &str) -> Option<&'static DeliverableDef> {
    CATALOGUE.iter().find(|d| d.id == id)
}

/// Definitions belonging to one lifecycle stage, in declaration order.
pub fn for_stage(stage: Stage) -> impl Iterator<Item = &'static DeliverableDef> {
    CATALOGUE.iter().filter(move |d| d.stage == stage)
}

/// Total number of catalogue entries.
pub fn len() -> usize {
    CATALOGUE.len()
}

const CATALOGUE: &[DeliverableDef] = &[
    entry("chg-feas-1", Stage::Feasibility, Area::ChangeManagement, "Stakeholder identification and mapping"),
    entry("chg-feas-2", Stage::Feasibility, Area::ChangeManagement, "Initial change impact assessment"),
    entry("chg-feas-3", Stage::Feasibility, Area::ChangeManagement, "Communication plan template"),
    entry("chg-feas-4", Stage::Feasibility, Area::ChangeManagement, "Stakeholder engagement strategy"),
    entry("chg-pre-1", Stage::PreConstruction, Area::ChangeManagement, "Change management plan"),
    entry("chg-pre-2", Stage::PreConstruction, Area::ChangeManagement, "Training needs assessment"),
    entry("chg-pre-3", Stage::PreConstruction, Area::ChangeManagement, "Communication schedule"),
    entry("chg-pre-4", Stage::PreConstruction, Area::ChangeManagement, "Stakeholder feedback mechanisms"),
    entry("chg-pre-5", Stage::PreConstruction, Area::ChangeManagement, "Change readiness assessment"),
    entry("chg-con-1", Stage::Construction, Area::ChangeManagement, "Weekly change updates"),
    entry("chg-con-2", Stage::Construction, Area::ChangeManagement, "Training delivery plan"),
    entry("chg-con-3", Stage::Construction, Area::ChangeManagement, "Change resistance management plan"),
    entry("chg-con-4", Stage::Construction, Area::ChangeManagement, "Stakeholder communication logs"),
    entry("chg-com-1", Stage::Commissioning, Area::ChangeManagement, "Go-live readiness assessment"),
    entry("chg-com-2", Stage::Commissioning, Area::ChangeManagement, "Post-implementation review plan"),
    entry("chg-com-3", Stage::Commissioning, Area::ChangeManagement, "Knowledge transfer documentation"),
    entry("chg-com-4", Stage::Commissioning, Area::ChangeManagement, "Lessons learned register"),
    entry("chg-ops-1", Stage::Operations, Area::ChangeManagement, "Change sustainability plan"),
    entry("chg-ops-2", Stage::Operations, Area::ChangeManagement, "Ongoing training schedule"),
    entry("chg-ops-3", Stage::Operations, Area::ChangeManagement, "Performance metrics tracking"),
    entry("chg-ops-4", Stage::Operations, Area::ChangeManagement, "Continuous improvement process"),
    entry("risk-feas-1", Stage::Feasibility, Area::RiskManagement, "Risk identification workshop results"),
    entry("risk-feas-2", Stage::Feasibility, Area::RiskManagement, "Initial risk register"),
    entry("risk-feas-3", Stage::Feasibility, Area::RiskManagement, "Risk appetite statement"),
    entry("risk-feas-4", Stage::Feasibility, Area::RiskManagement, "Risk management strategy"),
    entry("risk-pre-1", Stage::PreConstruction, Area::RiskManagement, "Detailed risk register with mitigation plans"),
    entry("risk-pre-2", Stage::PreConstruction, Area::RiskManagement, "Risk matrix and heat map"),
    entry("risk-pre-3", Stage::PreConstruction, Area::RiskManagement, "Risk ownership assignments"),
    entry("risk-pre-4", Stage::PreConstruction, Area::RiskManagement, "Contingency planning documentation"),
    entry("risk-pre-5", Stage::PreConstruction, Area::RiskManagement, "Insurance requirements analysis"),
    entry("risk-con-1", Stage::Construction, Area::RiskManagement, "Monthly risk review reports"),
    entry("risk-con-2", Stage::Construction, Area::RiskManagement, "Updated risk register"),
    entry("risk-con-3", Stage::Construction, Area::RiskManagement, "Incident reporting logs"),
    entry("risk-con-4", Stage::Construction, Area::RiskManagement, "Safety risk assessments"),
    entry("risk-con-5", Stage::Construction, Area::RiskManagement, "Environmental risk monitoring"),
    entry("risk-com-1", Stage::Commissioning, Area::RiskManagement, "Commissioning risk assessment"),
    entry("risk-com-2", Stage::Commissioning, Area::RiskManagement, "Safety protocols verification"),
    entry("risk-com-3", Stage::Commissioning, Area::RiskManagement, "Emergency response procedures"),
    entry("risk-com-4", Stage::Commissioning, Area::RiskManagement, "Risk handover documentation"),
    entry("risk-ops-1", Stage::Operations, Area::RiskManagement, "Operational risk register"),
    entry("risk-ops-2", Stage::Operations, Area::RiskManagement, "Ongoing safety audits"),
    entry("risk-ops-3", Stage::Operations, Area::RiskManagement, "Risk monitoring dashboard"),
    entry("risk-ops-4", Stage::Operations, Area::RiskManagement, "Annual risk review report"),
    entry("fin-feas-1", Stage::Feasibility, Area::FinancialManagement, "Preliminary cost estimates"),
    entry("fin-feas-2", Stage::Feasibility, Area::FinancialManagement, "Funding options analysis"),
    entry("fin-feas-3", Stage::Feasibility, Area::FinancialManagement, "Economic feasibility study"),
    entry("fin-feas-4", Stage::Feasibility, Area::FinancialManagement, "Financial model (high-level)"),
    entry("fin-feas-5", Stage::Feasibility, Area::FinancialManagement, "Grant and incentive opportunities list"),
    entry("fin-pre-1", Stage::PreConstruction, Area::FinancialManagement, "Detailed project budget"),
    entry("fin-pre-2", Stage::PreConstruction, Area::FinancialManagement, "Financial model (detailed)"),
    entry("fin-pre-3", Stage::PreConstruction, Area::FinancialManagement, "Funding agreements"),
    entry("fin-pre-4", Stage::PreConstruction, Area::FinancialManagement, "Procurement strategy"),
    entry("fin-pre-5", Stage::PreConstruction, Area::FinancialManagement, "Cost-benefit analysis"),
    entry("fin-pre-6", Stage::PreConstruction, Area::FinancialManagement, "Cash flow projections"),
    entry("fin-con-1", Stage::Construction, Area::FinancialManagement, "Monthly budget variance reports"),
    entry("fin-con-2", Stage::Construction, Area::FinancialManagement, "Change order tracking"),
    entry("fin-con-3", Stage::Construction, Area::FinancialManagement, "Payment schedules and invoices"),
    entry("fin-con-4", Stage::Construction, Area::FinancialManagement, "Expenditure forecasts"),
    entry("fin-con-5", Stage::Construction, Area::FinancialManagement, "Financial status reports"),
    entry("fin-com-1", Stage::Commissioning, Area::FinancialManagement, "Final cost reconciliation"),
    entry("fin-com-2", Stage::Commissioning, Area::FinancialManagement, "As-spent vs budget analysis"),
    entry("fin-com-3", Stage::Commissioning, Area::FinancialManagement, "Financial closeout documentation"),
    entry("fin-com-4", Stage::Commissioning, Area::FinancialManagement, "Warranty and maintenance cost provisions"),
    entry("fin-ops-1", Stage::Operations, Area::FinancialManagement, "Operational budget"),
    entry("fin-ops-2", Stage::Operations, Area::FinancialManagement, "Revenue tracking"),
    entry("fin-ops-3", Stage::Operations, Area::FinancialManagement, "Operating cost analysis"),
    entry("fin-ops-4", Stage::Operations, Area::FinancialManagement, "Annual financial statements"),
    entry("fin-ops-5", Stage::Operations, Area::FinancialManagement, "ROI performance tracking"),
    entry("tech-feas-1", Stage::Feasibility, Area::TechnicalManagement, "Technology assessment report"),
    entry("tech-feas-2", Stage::Feasibility, Area::TechnicalManagement, "Site selection criteria and analysis"),
    entry("tech-feas-3", Stage::Feasibility, Area::TechnicalManagement, "Preliminary engineering study"),
    entry("tech-feas-4", Stage::Feasibility, Area::TechnicalManagement, "Feedstock availability assessment"),
    entry("tech-feas-5", Stage::Feasibility, Area::TechnicalManagement, "Production capacity analysis"),
    entry("tech-feas-6", Stage::Feasibility, Area::TechnicalManagement, "Utility requirements assessment"),
    entry("tech-pre-1", Stage::PreConstruction, Area::TechnicalManagement, "Detailed engineering design"),
    entry("tech-pre-2", Stage::PreConstruction, Area::TechnicalManagement, "Equipment specifications"),
    entry("tech-pre-3", Stage::PreConstruction, Area::TechnicalManagement, "Process flow diagrams"),
    entry("tech-pre-4", Stage::PreConstruction, Area::TechnicalManagement, "Site layout plans"),
    entry("tech-pre-5", Stage::PreConstruction, Area::TechnicalManagement, "Permitting and regulatory compliance documentation"),
    entry("tech-pre-6", Stage::PreConstruction, Area::TechnicalManagement, "HAZOP study results"),
    entry("tech-pre-7", Stage::PreConstruction, Area::TechnicalManagement, "Environmental impact assessment"),
    entry("tech-con-1", Stage::Construction, Area::TechnicalManagement, "Construction drawings (as-built)"),
    entry("tech-con-2", Stage::Construction, Area::TechnicalManagement, "Quality control reports"),
    entry("tech-con-3", Stage::Construction, Area::TechnicalManagement, "Equipment installation records"),
    entry("tech-con-4", Stage::Construction, Area::TechnicalManagement, "Safety data sheets"),
    entry("tech-con-5", Stage::Construction, Area::TechnicalManagement, "Inspection and testing reports"),
    entry("tech-con-6", Stage::Construction, Area::TechnicalManagement, "Progress photographs and documentation"),
    entry("tech-com-1", Stage::Commissioning, Area::TechnicalManagement, "Commissioning plan"),
    entry("tech-com-2", Stage::Commissioning, Area::TechnicalManagement, "System integration testing results"),
    entry("tech-com-3", Stage::Commissioning, Area::TechnicalManagement, "Performance testing data"),
    entry("tech-com-4", Stage::Commissioning, Area::TechnicalManagement, "Operations and maintenance manuals"),
    entry("tech-com-5", Stage::Commissioning, Area::TechnicalManagement, "As-built documentation package"),
    entry("tech-com-6", Stage::Commissioning, Area::TechnicalManagement, "Warranty documentation"),
    entry("tech-ops-1", Stage::Operations, Area::TechnicalManagement, "Standard operating procedures"),
    entry("tech-ops-2", Stage::Operations, Area::TechnicalManagement, "Maintenance schedules"),
    entry("tech-ops-3", Stage::Operations, Area::TechnicalManagement, "Production performance data"),
    entry("tech-ops-4", Stage::Operations, Area::TechnicalManagement, "Equipment maintenance logs"),
    entry("tech-ops-5", Stage::Operations, Area::TechnicalManagement, "Process optimization reports"),
    entry("tech-ops-6", Stage::Operations, Area::TechnicalManagement, "Annual technical audits"),
    entry("stake-feas-1", Stage::Feasibility, Area::StakeholderManagement, "Stakeholder register"),
    entry("stake-feas-2", Stage::Feasibility, Area::StakeholderManagement, "Stakeholder analysis matrix"),
    entry("stake-feas-3", Stage::Feasibility, Area::StakeholderManagement, "Initial consultation records"),
    entry("stake-feas-4", Stage::Feasibility, Area::StakeholderManagement, "Community engagement plan outline"),
    entry("stake-pre-1", Stage::PreConstruction, Area::StakeholderManagement, "Stakeholder engagement plan"),
    entry("stake-pre-2", Stage::PreConstruction, Area::StakeholderManagement, "Communication matrix"),
    entry("stake-pre-3", Stage::PreConstruction, Area::StakeholderManagement, "Community consultation records"),
    entry("stake-pre-4", Stage::PreConstruction, Area::StakeholderManagement, "Partnership agreements"),
    entry("stake-pre-5", Stage::PreConstruction, Area::StakeholderManagement, "Regulatory stakeholder correspondence"),
    entry("stake-pre-6", Stage::PreConstruction, Area::StakeholderManagement, "Public information materials"),
    entry("stake-con-1", Stage::Construction, Area::StakeholderManagement, "Stakeholder meeting minutes"),
    entry("stake-con-2", Stage::Construction, Area::StakeholderManagement, "Community update newsletters"),
    entry("stake-con-3", Stage::Construction, Area::StakeholderManagement, "Issue and complaint log"),
    entry("stake-con-4", Stage::Construction, Area::StakeholderManagement, "Stakeholder satisfaction surveys"),
    entry("stake-con-5", Stage::Construction, Area::StakeholderManagement, "Media and public relations materials"),
    entry("stake-com-1", Stage::Commissioning, Area::StakeholderManagement, "Stakeholder notification plan"),
    entry("stake-com-2", Stage::Commissioning, Area::StakeholderManagement, "Community open house documentation"),
    entry("stake-com-3", Stage::Commissioning, Area::StakeholderManagement, "Final stakeholder report"),
    entry("stake-com-4", Stage::Commissioning, Area::StakeholderManagement, "Handover stakeholder briefings"),
    entry("stake-ops-1", Stage::Operations, Area::StakeholderManagement, "Ongoing stakeholder engagement schedule"),
    entry("stake-ops-2", Stage::Operations, Area::StakeholderManagement, "Community benefit reporting"),
    entry("stake-ops-3", Stage::Operations, Area::StakeholderManagement, "Annual stakeholder meetings"),
    entry("stake-ops-4", Stage::Operations, Area::StakeholderManagement, "Stakeholder feedback mechanism"),
    entry("stake-ops-5", Stage::Operations, Area::StakeholderManagement, "Corporate social responsibility reports"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for def in all() {
            assert!(seen.insert(def.id), "duplicate catalogue id: {}", def.id);
        }
    }

    #[test]
    fn test_no_id_is_a_dash_suffix_of_another() {
        // RecordKey::parse relies on suffix matching being unambiguous.
        for a in all() {
            for b in all() {
                if a.id != b.id {
                    assert!(
                        !b.id.ends_with(&format!("-{}", a.id)),
                        "{} is a suffix of {}",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_stage_and_area_is_covered() {
        for stage in Stage::ALL {
            for area in Area::ALL {
                assert!(
                    all().iter().any(|d| d.stage == stage && d.area == area),
                    "no deliverables for {stage:?}/{area:?}"
                );
            }
        }
    }

    #[test]
    fn test_find_returns_declared_entry() {
        let def = find("chg-feas-1").expect("known id");
        assert_eq!(def.stage, Stage::Feasibility);
        assert_eq!(def.area, Area::ChangeManagement);
    }

    #[test]
    fn test_for_stage_matches_manual_filter() {
        let count = for_stage(Stage::Construction).count();
        let manual = all().iter().filter(|d| d.stage == Stage::Construction).count();
        assert_eq!(count, manual);
        assert!(count > 0);
    }
}

//! The alert rule registry.
//!
//! Rules are a closed enum evaluated in [`RULE_REGISTRY`] order. Within a
//! metric the critical rule comes first and the warn rule only fires below
//! the critical band, so at most one severity fires per metric.

use serde::{Deserialize, Serialize};

use praxis_compliance::assert_all_text_compliance;
use praxis_core::{
    AggregationLevel, AlertSeverity, HrAlert, HrKpiSnapshot, HrMetric, HrThresholds, OverallStatus,
};
use praxis_kpi::overall_status;

use crate::error::Result;

pub const HR_ALL_HEALTHY: &str = "HR_ALL_HEALTHY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrAlertRule {
    FteQuoteCritical,
    FteQuoteWarn,
    FteOvercapacity,
    AbsenceCritical,
    AbsenceWarn,
    OvertimeCritical,
    OvertimeWarn,
    LaborCostCritical,
    LaborCostWarn,
    AllHealthy,
}

/// Evaluation order.
pub const RULE_REGISTRY: &[HrAlertRule] = &[
    HrAlertRule::FteQuoteCritical,
    HrAlertRule::FteQuoteWarn,
    HrAlertRule::FteOvercapacity,
    HrAlertRule::AbsenceCritical,
    HrAlertRule::AbsenceWarn,
    HrAlertRule::OvertimeCritical,
    HrAlertRule::OvertimeWarn,
    HrAlertRule::LaborCostCritical,
    HrAlertRule::LaborCostWarn,
    HrAlertRule::AllHealthy,
];

impl HrAlertRule {
    pub fn code(&self) -> &'static str {
        match self {
            HrAlertRule::FteQuoteCritical => "HR_FTE_QUOTE_CRITICAL",
            HrAlertRule::FteQuoteWarn => "HR_FTE_QUOTE_WARN",
            HrAlertRule::FteOvercapacity => "HR_FTE_OVERCAPACITY",
            HrAlertRule::AbsenceCritical => "HR_ABSENCE_CRITICAL",
            HrAlertRule::AbsenceWarn => "HR_ABSENCE_WARN",
            HrAlertRule::OvertimeCritical => "HR_OVERTIME_CRITICAL",
            HrAlertRule::OvertimeWarn => "HR_OVERTIME_WARN",
            HrAlertRule::LaborCostCritical => "HR_LABOR_COST_CRITICAL",
            HrAlertRule::LaborCostWarn => "HR_LABOR_COST_WARN",
            HrAlertRule::AllHealthy => HR_ALL_HEALTHY,
        }
    }

    pub fn severity(&self) -> AlertSeverity {
        match self {
            HrAlertRule::FteQuoteCritical
            | HrAlertRule::AbsenceCritical
            | HrAlertRule::OvertimeCritical
            | HrAlertRule::LaborCostCritical => AlertSeverity::Critical,
            HrAlertRule::FteQuoteWarn
            | HrAlertRule::AbsenceWarn
            | HrAlertRule::OvertimeWarn
            | HrAlertRule::LaborCostWarn => AlertSeverity::Warn,
            HrAlertRule::FteOvercapacity | HrAlertRule::AllHealthy => AlertSeverity::Info,
        }
    }

    /// `Ok(None)` when the rule does not fire.
    pub fn evaluate(&self, snapshot: &HrKpiSnapshot, t: &HrThresholds) -> Result<Option<HrAlert>> {
        let m = &snapshot.metrics;
        let loc = location(snapshot);

        let alert = match self {
            HrAlertRule::FteQuoteCritical if m.fte_quote < t.fte_quote.critical => Some(self.build(
                snapshot,
                HrMetric::FteQuote,
                m.fte_quote,
                Some(t.fte_quote.critical),
                "Deutliche Unterbesetzung",
                format!(
                    "Die VZAE-Quote {loc} liegt bei {:.0} % des Solls und damit unter der kritischen Schwelle von {:.0} %. Es fehlen {:.1} VZAE.",
                    m.fte_quote * 100.0,
                    t.fte_quote.critical * 100.0,
                    -m.fte_delta
                ),
                &[
                    "Offene Stellen priorisiert besetzen.",
                    "Dienstplan auf Engpaesse pruefen und Termine entzerren.",
                    "Befristete Unterstuetzung durch Aushilfen oder Zeitarbeit pruefen.",
                ],
            )?),
            HrAlertRule::FteQuoteWarn
                if m.fte_quote >= t.fte_quote.critical && m.fte_quote < t.fte_quote.warn =>
            {
                Some(self.build(
                    snapshot,
                    HrMetric::FteQuote,
                    m.fte_quote,
                    Some(t.fte_quote.warn),
                    "Unterbesetzung",
                    format!(
                        "Die VZAE-Quote {loc} liegt bei {:.0} % des Solls (Warnschwelle {:.0} %).",
                        m.fte_quote * 100.0,
                        t.fte_quote.warn * 100.0
                    ),
                    &[
                        "Personalplanung fuer die naechsten Monate ueberpruefen.",
                        "Rekrutierung fuer absehbare Luecken vorbereiten.",
                    ],
                )?)
            }
            HrAlertRule::FteOvercapacity if m.fte_quote > t.fte_quote_overcapacity => Some(self.build(
                snapshot,
                HrMetric::FteQuote,
                m.fte_quote,
                Some(t.fte_quote_overcapacity),
                "Personalkapazitaet ueber Plan",
                format!(
                    "Die VZAE-Quote {loc} liegt bei {:.0} % des Solls und damit ueber {:.0} %.",
                    m.fte_quote * 100.0,
                    t.fte_quote_overcapacity * 100.0
                ),
                &[
                    "Soll-Planung an die aktuelle Auslastung anpassen.",
                    "Freie Kapazitaet fuer Prophylaxe oder Fortbildung einplanen.",
                ],
            )?),
            HrAlertRule::AbsenceCritical if m.absence_rate_percent >= t.absence_rate_percent.critical => {
                Some(self.build(
                    snapshot,
                    HrMetric::AbsenceRatePercent,
                    m.absence_rate_percent,
                    Some(t.absence_rate_percent.critical),
                    "Sehr hohe Abwesenheitsquote",
                    format!(
                        "Die Abwesenheitsquote {loc} liegt bei {:.1} % (kritisch ab {:.1} %).",
                        m.absence_rate_percent, t.absence_rate_percent.critical
                    ),
                    &[
                        "Arbeitsbelastung und Dienstplanung im Team ueberpruefen.",
                        "Betriebliches Gesundheitsmanagement und Stresspraevention staerken.",
                        "Vertretungsregeln fuer Ausfaelle festlegen.",
                    ],
                )?)
            }
            HrAlertRule::AbsenceWarn
                if m.absence_rate_percent >= t.absence_rate_percent.warn
                    && m.absence_rate_percent < t.absence_rate_percent.critical =>
            {
                Some(self.build(
                    snapshot,
                    HrMetric::AbsenceRatePercent,
                    m.absence_rate_percent,
                    Some(t.absence_rate_percent.warn),
                    "Erhoehte Abwesenheitsquote",
                    format!(
                        "Die Abwesenheitsquote {loc} liegt bei {:.1} % (Warnschwelle {:.1} %).",
                        m.absence_rate_percent, t.absence_rate_percent.warn
                    ),
                    &[
                        "Entwicklung im naechsten Zeitraum beobachten.",
                        "Urlaubsplanung gleichmaessig ueber das Jahr verteilen.",
                    ],
                )?)
            }
            HrAlertRule::OvertimeCritical
                if m.overtime_rate_percent >= t.overtime_rate_percent.critical =>
            {
                Some(self.build(
                    snapshot,
                    HrMetric::OvertimeRatePercent,
                    m.overtime_rate_percent,
                    Some(t.overtime_rate_percent.critical),
                    "Sehr hohe Ueberstundenquote",
                    format!(
                        "Ueberstunden {loc} entsprechen {:.1} % der vertraglichen Arbeitszeit (kritisch ab {:.1} %).",
                        m.overtime_rate_percent, t.overtime_rate_percent.critical
                    ),
                    &[
                        "Ueberstunden zeitnah durch Freizeit ausgleichen.",
                        "Terminplanung an die verfuegbare Kapazitaet anpassen.",
                        "Personalbedarf mit dem Bedarfsrechner neu bewerten.",
                    ],
                )?)
            }
            HrAlertRule::OvertimeWarn
                if m.overtime_rate_percent >= t.overtime_rate_percent.warn
                    && m.overtime_rate_percent < t.overtime_rate_percent.critical =>
            {
                Some(self.build(
                    snapshot,
                    HrMetric::OvertimeRatePercent,
                    m.overtime_rate_percent,
                    Some(t.overtime_rate_percent.warn),
                    "Erhoehte Ueberstundenquote",
                    format!(
                        "Ueberstunden {loc} entsprechen {:.1} % der vertraglichen Arbeitszeit (Warnschwelle {:.1} %).",
                        m.overtime_rate_percent, t.overtime_rate_percent.warn
                    ),
                    &[
                        "Ursachen fuer Mehrarbeit in der Terminstruktur pruefen.",
                        "Ausgleich von Ueberstunden regelmaessig einplanen.",
                    ],
                )?)
            }
            HrAlertRule::LaborCostCritical => match m.labor_cost_ratio_percent {
                Some(lc) if lc >= t.labor_cost_ratio_percent.critical => Some(self.build(
                    snapshot,
                    HrMetric::LaborCostRatioPercent,
                    lc,
                    Some(t.labor_cost_ratio_percent.critical),
                    "Personalkostenquote kritisch",
                    format!(
                        "Die geschaetzten Personalkosten {loc} entsprechen {:.1} % des Monatsumsatzes (kritisch ab {:.1} %).",
                        lc, t.labor_cost_ratio_percent.critical
                    ),
                    &[
                        "Leistungsmix und Honorarstruktur ueberpruefen.",
                        "Auslastung der Behandlungszeiten analysieren.",
                        "Stellenplanung mit der Umsatzentwicklung abgleichen.",
                    ],
                )?),
                _ => None,
            },
            HrAlertRule::LaborCostWarn => match m.labor_cost_ratio_percent {
                Some(lc)
                    if lc >= t.labor_cost_ratio_percent.warn
                        && lc < t.labor_cost_ratio_percent.critical =>
                {
                    Some(self.build(
                        snapshot,
                        HrMetric::LaborCostRatioPercent,
                        lc,
                        Some(t.labor_cost_ratio_percent.warn),
                        "Erhoehte Personalkostenquote",
                        format!(
                            "Die geschaetzten Personalkosten {loc} entsprechen {:.1} % des Monatsumsatzes (Warnschwelle {:.1} %).",
                            lc, t.labor_cost_ratio_percent.warn
                        ),
                        &[
                            "Umsatz- und Kostenentwicklung monatlich verfolgen.",
                            "Leerlaufzeiten im Terminbuch reduzieren.",
                        ],
                    )?)
                }
                _ => None,
            },
            HrAlertRule::AllHealthy if overall_status(m, t) == OverallStatus::Ok => Some(self.build(
                snapshot,
                HrMetric::OverallStatus,
                0.0,
                None,
                "Alle Kennzahlen im Zielbereich",
                format!("Alle HR-Kennzahlen {loc} liegen innerhalb der konfigurierten Schwellen."),
                &["Kennzahlen im naechsten Zeitraum erneut pruefen."],
            )?),
            _ => None,
        };
        Ok(alert)
    }

    /// Assemble an alert and lint every piece of its text.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        &self,
        snapshot: &HrKpiSnapshot,
        metric: HrMetric,
        current_value: f64,
        threshold_value: Option<f64>,
        title: &str,
        explanation: String,
        actions: &[&str],
    ) -> Result<HrAlert> {
        assert_all_text_compliance(
            std::iter::once(title)
                .chain(std::iter::once(explanation.as_str()))
                .chain(actions.iter().copied()),
        )?;
        Ok(HrAlert {
            code: self.code().to_string(),
            severity: self.severity(),
            title: title.to_string(),
            explanation,
            recommended_actions: actions.iter().map(|a| a.to_string()).collect(),
            metric,
            current_value,
            threshold_value,
            aggregation_level: snapshot.aggregation_level,
            group_key: snapshot.group_key.clone(),
        })
    }
}

/// Where the numbers apply, phrased for alert text.
fn location(snapshot: &HrKpiSnapshot) -> String {
    match snapshot.aggregation_level {
        AggregationLevel::Practice => "in der Praxis".to_string(),
        AggregationLevel::Role => format!("in der Gruppe {}", snapshot.group_key),
    }
}

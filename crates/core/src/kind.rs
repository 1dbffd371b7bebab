//! Ingest kinds
//!
//! The closed set of payload kinds accepted by the ledger. The wire name of
//! each kind (its `snake_case` form) is also the child key the normalized
//! payload is stored under: `runs/{runId}/{kind}`.

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of an analytics payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestKind {
    /// Weighted overview of the whole pipeline
    TotalPipelineOverview,
    /// Pipeline weighted by deal value
    TotalDealValuePipeline,
    /// Pipeline weighted by qualification stage
    QualificationWeightedPipeline,
    /// Week-over-week progression chart
    PipelineProgression,
    /// Won / lost breakdown
    WonLostAnalysis,
    /// Per-rep overview tables
    RepOverviews,
    /// Representatives selected for focused analysis
    RepAnalysisFocus,
    /// Narrative analysis per rep
    RepAnalyses,
    /// Narrative insights per rep with flagged deals
    RepInsights,
    /// Individual pipeline deals
    PipelineDeals,
    /// Free-form pipeline metrics
    PipelineMetrics,
    /// Pipeline stage definitions
    PipelineStages,
    /// Team member performance rows
    TeamPerformance,
    /// RGA table keyed by rep
    RepRgaData,
    /// Pipeline development insights and totals
    PipelineDevelopment,
}

impl IngestKind {
    /// Every kind, in declaration order.
    pub const ALL: [IngestKind; 15] = [
        IngestKind::TotalPipelineOverview,
        IngestKind::TotalDealValuePipeline,
        IngestKind::QualificationWeightedPipeline,
        IngestKind::PipelineProgression,
        IngestKind::WonLostAnalysis,
        IngestKind::RepOverviews,
        IngestKind::RepAnalysisFocus,
        IngestKind::RepAnalyses,
        IngestKind::RepInsights,
        IngestKind::PipelineDeals,
        IngestKind::PipelineMetrics,
        IngestKind::PipelineStages,
        IngestKind::TeamPerformance,
        IngestKind::RepRgaData,
        IngestKind::PipelineDevelopment,
    ];

    /// Wire name, also used as the storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestKind::TotalPipelineOverview => "total_pipeline_overview",
            IngestKind::TotalDealValuePipeline => "total_deal_value_pipeline",
            IngestKind::QualificationWeightedPipeline => "qualification_weighted_pipeline",
            IngestKind::PipelineProgression => "pipeline_progression",
            IngestKind::WonLostAnalysis => "won_lost_analysis",
            IngestKind::RepOverviews => "rep_overviews",
            IngestKind::RepAnalysisFocus => "rep_analysis_focus",
            IngestKind::RepAnalyses => "rep_analyses",
            IngestKind::RepInsights => "rep_insights",
            IngestKind::PipelineDeals => "pipeline_deals",
            IngestKind::PipelineMetrics => "pipeline_metrics",
            IngestKind::PipelineStages => "pipeline_stages",
            IngestKind::TeamPerformance => "team_performance",
            IngestKind::RepRgaData => "rep_rga_data",
            IngestKind::PipelineDevelopment => "pipeline_development",
        }
    }
}

impl fmt::Display for IngestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngestKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> LedgerResult<Self> {
        IngestKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LedgerError::unsupported_kind(s))
    }
}

//! Sync engine: one stateless batch per cycle
//!
//! read → normalize → dedupe → filter → aggregate → publish, then swap the
//! derived artifacts in for readers. Cycles never overlap.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use parking_lot::RwLock;
use serde_json::Value;
use shared::models::{AccessEntry, CanonicalTransaction, Row, Snapshot, SyncReport, TeamRegistry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

use super::error::SyncError;
use super::stats::CycleStats;
use crate::aggregation::aggregate;
use crate::core::Config;
use crate::ingest::{self, row};
use crate::publish::SnapshotSink;
use crate::snapshot::{SnapshotBuilder, to_value};
use crate::sources::{RowSource, SourceTable};

/// Wall clock, injectable so tests get byte-identical snapshots
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub snapshot_path: String,
    pub access_path: String,
    pub feed_limit: usize,
    pub timezone: Tz,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            snapshot_path: config.snapshot_path.clone(),
            access_path: config.access_path.clone(),
            feed_limit: config.recent_transactions_limit,
            timezone: config.timezone,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            snapshot_path: "sparkTank".into(),
            access_path: "access".into(),
            feed_limit: crate::snapshot::DEFAULT_FEED_LIMIT,
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

/// Everything one successful cycle derived, swapped in as a unit
#[derive(Debug, Clone)]
pub struct CycleArtifacts {
    pub cycle_id: Uuid,
    pub registry: TeamRegistry,
    pub eligible: Vec<CanonicalTransaction>,
    pub snapshot: Snapshot,
    pub stats: CycleStats,
}

/// Outcome of [`SyncEngine::run_cycle`]
#[derive(Debug)]
pub struct CycleResult {
    pub outcome: Result<Arc<CycleArtifacts>, SyncError>,
    /// Access list reached the sink, whatever the leaderboard outcome
    pub access_synced: bool,
    pub duration: Duration,
}

pub struct SyncEngine {
    source: Arc<dyn RowSource>,
    sink: Arc<dyn SnapshotSink>,
    settings: EngineSettings,
    clock: Clock,
    cycle_lock: tokio::sync::Mutex<()>,
    current: RwLock<Option<Arc<CycleArtifacts>>>,
    access: RwLock<Arc<Vec<AccessEntry>>>,
}

impl SyncEngine {
    pub fn new(
        source: Arc<dyn RowSource>,
        sink: Arc<dyn SnapshotSink>,
        settings: EngineSettings,
    ) -> Self {
        Self::with_clock(source, sink, settings, system_clock())
    }

    pub fn with_clock(
        source: Arc<dyn RowSource>,
        sink: Arc<dyn SnapshotSink>,
        settings: EngineSettings,
        clock: Clock,
    ) -> Self {
        Self {
            source,
            sink,
            settings,
            clock,
            cycle_lock: tokio::sync::Mutex::new(()),
            current: RwLock::new(None),
            access: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Artifacts of the last successful cycle
    pub fn current(&self) -> Option<Arc<CycleArtifacts>> {
        self.current.read().clone()
    }

    /// Access list as last published
    pub fn access(&self) -> Arc<Vec<AccessEntry>> {
        self.access.read().clone()
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.current.read().as_ref().map(|a| a.snapshot.last_sync)
    }

    /// Run one cycle and summarize it for `POST /api/sync`
    pub async fn sync(&self) -> SyncReport {
        let result = self.run_cycle().await;
        let secs = result.duration.as_secs_f64();
        match result.outcome {
            Ok(artifacts) => SyncReport::completed(
                secs,
                artifacts.registry.len(),
                artifacts.snapshot.recent_transactions.len(),
                result.access_synced,
            ),
            Err(e) => SyncReport::failed(e, result.access_synced),
        }
    }

    /// Run one full cycle, waiting for any cycle already in flight
    pub async fn run_cycle(&self) -> CycleResult {
        let _guard = self.cycle_lock.lock().await;
        let cycle_id = Uuid::new_v4();
        let started = Instant::now();

        let span = tracing::info_span!("sync_cycle", %cycle_id);
        let (outcome, access_synced) = self.cycle(cycle_id).instrument(span.clone()).await;
        let duration = started.elapsed();

        span.in_scope(|| match &outcome {
            Ok(artifacts) => {
                artifacts.stats.log();
                tracing::info!(
                    duration_ms = duration.as_millis() as u64,
                    teams = artifacts.registry.len(),
                    eligible = artifacts.eligible.len(),
                    access_synced,
                    "Sync cycle completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    kind = e.kind(),
                    error = %e,
                    access_synced,
                    "Sync cycle failed, keeping previous snapshot"
                );
            }
        });

        CycleResult {
            outcome,
            access_synced,
            duration,
        }
    }

    async fn cycle(&self, cycle_id: Uuid) -> (Result<Arc<CycleArtifacts>, SyncError>, bool) {
        let (teams, payments, access) = tokio::join!(
            self.source.fetch(SourceTable::Teams),
            self.source.fetch(SourceTable::Payments),
            self.source.fetch(SourceTable::Access),
        );

        let access_synced = match access {
            Ok(rows) => self.publish_access(&rows).await,
            Err(e) => {
                tracing::warn!(error = %e, "Access table unavailable, not republished");
                false
            }
        };

        let outcome = match (teams, payments) {
            (Ok(teams), Ok(payments)) => self.build_and_publish(cycle_id, &teams, &payments).await,
            (Err(e), _) | (_, Err(e)) => Err(e),
        };

        (outcome, access_synced)
    }

    async fn publish_access(&self, rows: &[Row]) -> bool {
        let entries = row::parse_access(rows);
        let value = Value::Array(row::access_rows(rows).into_iter().map(Value::Object).collect());

        match self.sink.put(&self.settings.access_path, &value).await {
            Ok(()) => {
                tracing::info!(entries = entries.len(), "Access list published");
                *self.access.write() = Arc::new(entries);
                true
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Access list publish failed");
                false
            }
        }
    }

    async fn build_and_publish(
        &self,
        cycle_id: Uuid,
        team_rows: &[Row],
        payment_rows: &[Row],
    ) -> Result<Arc<CycleArtifacts>, SyncError> {
        let now = self.now();
        let registry = row::parse_teams(team_rows);
        let events = row::parse_payments(payment_rows);
        let prepared = ingest::prepare(&events, &registry, self.settings.timezone);

        let aggregation = aggregate(&registry, &prepared.eligible);
        for account_id in &aggregation.unknown_accounts {
            tracing::warn!(account_id = %account_id, "UnknownAccountReference");
        }
        if aggregation.missing_account_refs > 0 {
            tracing::warn!(
                count = aggregation.missing_account_refs,
                "Eligible transactions without an account id"
            );
        }

        let snapshot = SnapshotBuilder::new(self.settings.feed_limit).build(
            aggregation.entries,
            &prepared.feed_records,
            &registry,
            now,
        );
        let value = to_value(&snapshot)?;
        self.sink.put(&self.settings.snapshot_path, &value).await?;

        let stats = CycleStats {
            teams: registry.len(),
            access_entries: self.access.read().len(),
            payment_rows: payment_rows.len(),
            normalize: prepared.normalize,
            collapsed: prepared.collapsed,
            unkeyed: prepared.unkeyed,
            eligible: prepared.eligible.len(),
            unknown_accounts: aggregation.unknown_accounts.len(),
            missing_account_refs: aggregation.missing_account_refs,
            feed_len: snapshot.recent_transactions.len(),
        };

        let artifacts = Arc::new(CycleArtifacts {
            cycle_id,
            registry,
            eligible: prepared.eligible,
            snapshot,
            stats,
        });
        *self.current.write() = Some(artifacts.clone());
        Ok(artifacts)
    }
}

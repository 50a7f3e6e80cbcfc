//! One extraction job, end to end
//!
//! Extraction feeds the workbook; the KMZ export runs last and only when
//! requested. Both outputs are staged beside their destinations and moved
//! into place together once the caller is confirmed to still be listening,
//! so an abandoned job leaves earlier files untouched. A KMZ failure does not
//! fail the job: the outcome carries it next to the report.

use crate::app::services::extractor::{
    ExtractionOptions, ExtractionStats, Extractor, ProgressSink, Reporter, ScaledSink,
    dated_output_path, kmz_path_for,
};
use crate::app::services::kmz_exporter::{GeoExportOptions, KmzExporter, KmzStats, SiteSelection};
use crate::app::services::reference_data::ReferenceData;
use crate::app::services::report_writer::{ReportStats, ReportWriter};
use crate::app::services::status_filter::StatusFilter;
use crate::constants::{PUBLIC_SITE_STATUS, phases};
use crate::{Error, Result, StatusField};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use std::sync::Arc;

/// Run parameters of one job
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub input_path: PathBuf,
    /// Requested report path; the run date is appended to the file name
    pub report_path: PathBuf,
    pub chunk_size: usize,
    pub target_region: String,
    pub filter: StatusFilter,
    pub export_kmz: bool,
    /// Moment the job runs; drives the dated file name and KMZ header
    pub run_at: NaiveDateTime,
}

impl ExtractionJob {
    pub fn run_date(&self) -> NaiveDate {
        self.run_at.date()
    }

    /// Report path with the run-date suffix
    pub fn resolved_report_path(&self) -> PathBuf {
        dated_output_path(&self.report_path, self.run_date())
    }

    /// Whether the job's filter already limits records to public sites
    fn site_selection(&self) -> SiteSelection {
        match &self.filter {
            StatusFilter::Codes(codes)
                if codes.len() == 1 && codes.contains(PUBLIC_SITE_STATUS) =>
            {
                SiteSelection::AlreadyFiltered
            }
            _ => SiteSelection::FilterPublicSites,
        }
    }
}

impl Default for ExtractionJob {
    fn default() -> Self {
        let options = ExtractionOptions::default();
        Self {
            input_path: PathBuf::from(crate::constants::DEFAULT_INPUT_PATH),
            report_path: PathBuf::from(crate::constants::DEFAULT_OUTPUT_PATH),
            chunk_size: options.chunk_size,
            target_region: options.target_region,
            filter: options.filter,
            export_kmz: false,
            run_at: Local::now().naive_local(),
        }
    }
}

/// Everything a job produced
#[derive(Debug)]
pub struct JobOutcome {
    pub report_path: PathBuf,
    pub status_field: StatusField,
    pub extraction: ExtractionStats,
    pub report: ReportStats,
    /// `None` when the KMZ was not requested
    pub kmz: Option<std::result::Result<KmzStats, Error>>,
}

impl JobOutcome {
    pub fn kmz_path(&self) -> Option<&PathBuf> {
        match &self.kmz {
            Some(Ok(stats)) => Some(&stats.path),
            _ => None,
        }
    }
}

/// Run a job synchronously, reporting to `sink`
pub fn run_job(
    job: &ExtractionJob,
    reference: Arc<ReferenceData>,
    sink: &dyn ProgressSink,
) -> Result<JobOutcome> {
    let reporter = Reporter::new(sink);
    let report_path = job.resolved_report_path();

    reporter.info(format!(
        "Extracting region {} ({})",
        job.target_region,
        reference.resolve_region(&job.target_region)
    ));
    reporter.info(format!("Input: {}", job.input_path.display()));
    reporter.info(format!("Report: {}", report_path.display()));
    job.filter.describe(&reference);

    let extraction_end = if job.export_kmz {
        phases::EXTRACTION_END
    } else {
        phases::REPORT_END
    };

    let extractor = Extractor::new(
        Arc::clone(&reference),
        ExtractionOptions {
            target_region: job.target_region.clone(),
            chunk_size: job.chunk_size,
            filter: job.filter.clone(),
        },
    );
    let extraction = extractor.extract(&job.input_path, &ScaledSink::new(sink, 0.0, extraction_end))?;

    ensure_listening(&reporter)?;
    let report_end = if job.export_kmz {
        phases::REPORT_END
    } else {
        phases::GEO_END
    };
    let report_sink = ScaledSink::new(sink, extraction_end, report_end);
    let (staged_report, report) =
        ReportWriter::new(&report_sink).stage(&extraction.records, &report_path)?;

    let staged_kmz = if job.export_kmz {
        ensure_listening(&reporter)?;
        let kmz_path = kmz_path_for(&report_path);
        let geo_sink = ScaledSink::new(sink, phases::REPORT_END, phases::GEO_END);
        let options = GeoExportOptions {
            selection: job.site_selection(),
            region: job.target_region.clone(),
            generated_at: job.run_at,
        };
        let result = KmzExporter::new(&reference)
            .with_sink(&geo_sink)
            .stage(&extraction.records, &kmz_path, &options);
        if let Err(e) = &result {
            reporter.warn(format!("KMZ export failed, workbook kept: {}", e));
        }
        Some(result)
    } else {
        None
    };

    // Outputs stay staged until here; dropping them discards both
    ensure_listening(&reporter)?;
    staged_report.commit()?;
    reporter.info(format!("Workbook saved: {}", report_path.display()));

    let kmz = staged_kmz.map(|staged| -> Result<KmzStats> {
        let (file, stats) = staged?;
        if let Err(e) = file.commit() {
            reporter.warn(format!("KMZ export failed, workbook kept: {}", e));
            return Err(e);
        }
        reporter.info(format!("KMZ saved: {}", stats.path.display()));
        Ok(stats)
    });

    reporter.progress(100.0, "Done");

    Ok(JobOutcome {
        report_path,
        status_field: extraction.status_field,
        extraction: extraction.stats,
        report,
        kmz,
    })
}

fn ensure_listening(reporter: &Reporter<'_>) -> Result<()> {
    if reporter.is_abandoned() {
        return Err(Error::processing_interrupted("Job abandoned by caller"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::extractor::tests::{
        AbandonedSink, RecordingSink, create_test_dataset, three_region_rows,
    };
    use crate::app::services::extractor::LogLevel;
    use chrono::NaiveDate;
    use std::fs;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Sink whose caller leaves as soon as a log line containing `trigger` arrives
    struct LeavesAfterLog {
        trigger: &'static str,
        gone: AtomicBool,
    }

    impl LeavesAfterLog {
        fn new(trigger: &'static str) -> Self {
            Self {
                trigger,
                gone: AtomicBool::new(false),
            }
        }
    }

    impl ProgressSink for LeavesAfterLog {
        fn on_progress(&self, _percent: f64, _message: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn on_log(&self, _level: LogLevel, message: &str) -> anyhow::Result<()> {
            if message.contains(self.trigger) {
                self.gone.store(true, Ordering::SeqCst);
            }
            Ok(())
        }

        fn is_abandoned(&self) -> bool {
            self.gone.load(Ordering::SeqCst)
        }
    }

    fn job_for(input: &std::path::Path, output_dir: &std::path::Path) -> ExtractionJob {
        ExtractionJob {
            input_path: input.to_path_buf(),
            report_path: output_dir.join("out").join("coverage.xlsx"),
            run_at: NaiveDate::from_ymd_opt(2025, 7, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            ..ExtractionJob::default()
        }
    }

    /// Test a job without geo export
    ///
    /// Ensures the workbook lands at the dated path and no KMZ is attempted
    #[test]
    fn test_job_writes_dated_report() {
        let (temp_dir, input) = create_test_dataset(&three_region_rows());
        let job = job_for(&input, temp_dir.path());

        let outcome = run_job(&job, Arc::new(ReferenceData::builtin()), &RecordingSink::default())
            .unwrap();

        assert!(outcome.report_path.ends_with("out/coverage_20250715.xlsx"));
        assert!(outcome.report_path.exists());
        assert_eq!(outcome.extraction.records_accepted, 4);
        assert_eq!(outcome.report.records_written, 4);
        assert!(outcome.kmz.is_none());
        assert!(outcome.kmz_path().is_none());
    }

    /// Test a job with geo export enabled
    ///
    /// Ensures the KMZ sits next to the report and only public sites count
    #[test]
    fn test_job_exports_public_sites() {
        let (temp_dir, input) = create_test_dataset(&three_region_rows());
        let job = ExtractionJob {
            export_kmz: true,
            ..job_for(&input, temp_dir.path())
        };

        let outcome = run_job(&job, Arc::new(ReferenceData::builtin()), &RecordingSink::default())
            .unwrap();

        let kmz_path = outcome.kmz_path().unwrap();
        assert!(kmz_path.ends_with("out/coverage_20250715_PAC_PAL.kmz"));
        assert!(kmz_path.exists());
        let stats = outcome.kmz.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(stats.sites_selected, 2);
    }

    /// Test geo failure isolation
    ///
    /// Ensures a KMZ with nothing to export leaves the saved report intact
    #[test]
    fn test_geo_failure_keeps_report() {
        let (temp_dir, input) = create_test_dataset(&[
            ("02", "007003", "102", "AOCUA"),
            ("02", "007003", "101", "AOCUA"),
        ]);
        let job = ExtractionJob {
            export_kmz: true,
            ..job_for(&input, temp_dir.path())
        };

        let outcome = run_job(&job, Arc::new(ReferenceData::builtin()), &RecordingSink::default())
            .unwrap();

        assert!(outcome.report_path.exists());
        assert!(matches!(
            outcome.kmz,
            Some(Err(Error::NothingToExport { .. }))
        ));
    }

    /// Test site selection with a public-site filter
    ///
    /// Ensures the exporter skips its own status check only for exactly {302}
    #[test]
    fn test_site_selection_follows_filter() {
        let mut job = ExtractionJob::default();
        assert_eq!(job.site_selection(), SiteSelection::FilterPublicSites);

        job.filter = StatusFilter::parse_list("302");
        assert_eq!(job.site_selection(), SiteSelection::AlreadyFiltered);

        job.filter = StatusFilter::parse_list("102,302");
        assert_eq!(job.site_selection(), SiteSelection::FilterPublicSites);
    }

    /// Test abandonment before persistence
    ///
    /// Ensures nothing is written once the caller has gone away
    #[test]
    fn test_abandoned_job_writes_nothing() {
        let (temp_dir, input) = create_test_dataset(&three_region_rows());
        let job = job_for(&input, temp_dir.path());
        let sink = AbandonedSink::default();
        sink.abandoned.store(true, Ordering::SeqCst);

        let result = run_job(&job, Arc::new(ReferenceData::builtin()), &sink);

        assert!(matches!(result, Err(Error::ProcessingInterrupted { .. })));
        assert!(!job.resolved_report_path().exists());
    }

    /// Test progress reporting across phases
    ///
    /// Ensures the overall progress never decreases and finishes at 100
    #[test]
    fn test_progress_is_monotonic() {
        let (temp_dir, input) = create_test_dataset(&three_region_rows());
        let job = ExtractionJob {
            export_kmz: true,
            ..job_for(&input, temp_dir.path())
        };
        let sink = RecordingSink::default();

        run_job(&job, Arc::new(ReferenceData::builtin()), &sink).unwrap();

        let progress = sink.progress.lock().unwrap();
        assert!(progress.windows(2).all(|pair| pair[0].0 <= pair[1].0));
        assert_eq!(progress.last().map(|(percent, _)| *percent), Some(100.0));
    }

    /// Test a caller leaving after extraction and while outputs are written
    ///
    /// Ensures the same-day report and KMZ from an earlier run survive and no
    /// staged file is left in the output directory
    #[test]
    fn test_abandoned_during_write_keeps_earlier_outputs() {
        let (temp_dir, input) = create_test_dataset(&three_region_rows());
        let job = ExtractionJob {
            export_kmz: true,
            ..job_for(&input, temp_dir.path())
        };
        let report_path = job.resolved_report_path();
        let kmz_path = kmz_path_for(&report_path);
        fs::create_dir_all(report_path.parent().unwrap()).unwrap();

        for trigger in ["Extraction complete", "Workbook ready", "KMZ ready"] {
            fs::write(&report_path, "earlier report").unwrap();
            fs::write(&kmz_path, "earlier archive").unwrap();
            let sink = LeavesAfterLog::new(trigger);

            let result = run_job(&job, Arc::new(ReferenceData::builtin()), &sink);

            assert!(
                matches!(result, Err(Error::ProcessingInterrupted { .. })),
                "left after '{}'",
                trigger
            );
            assert_eq!(fs::read_to_string(&report_path).unwrap(), "earlier report");
            assert_eq!(fs::read_to_string(&kmz_path).unwrap(), "earlier archive");
            assert_eq!(fs::read_dir(report_path.parent().unwrap()).unwrap().count(), 2);
        }
    }

    /// Test a same-day rerun that completes
    ///
    /// Ensures the new outputs replace the earlier ones in place
    #[test]
    fn test_completed_rerun_replaces_outputs() {
        let (temp_dir, input) = create_test_dataset(&three_region_rows());
        let job = ExtractionJob {
            export_kmz: true,
            ..job_for(&input, temp_dir.path())
        };
        let report_path = job.resolved_report_path();
        fs::create_dir_all(report_path.parent().unwrap()).unwrap();
        fs::write(&report_path, "earlier report").unwrap();

        let outcome =
            run_job(&job, Arc::new(ReferenceData::builtin()), &RecordingSink::default()).unwrap();

        assert_eq!(
            fs::metadata(&report_path).unwrap().len(),
            outcome.report.file_size
        );
        assert_ne!(fs::read(&report_path).unwrap(), b"earlier report");
        assert_eq!(fs::read_dir(report_path.parent().unwrap()).unwrap().count(), 2);
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use super::codec;
use super::error::SetupError;
use super::formats::OutputFormat;

/// Cooperative cancellation token shared between the UI thread and the
/// worker. The worker checks it once per file, so a conversion already in
/// flight finishes before the flag is honored.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Everything one run needs, snapshotted at start so the UI is free to keep
/// its own state mutable.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub quality: u8,
    pub destination: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
enum ConversionOutcome {
    Converted(PathBuf),
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cancelled: bool,
}

/// Callbacks from the worker back to the shell. All of them run on the worker
/// thread; `on_file_exists` blocks the worker until the user decides.
pub trait RunObserver {
    fn on_progress(&self, current: usize, total: usize);
    fn on_log(&self, message: &str);
    fn on_file_exists(&self, candidate_name: &str) -> bool;
    fn on_run_complete(&self, summary: &RunSummary);
}

/// Validates the request synchronously, then converts on a fresh worker
/// thread. Setup errors are returned before the thread spawns; only one run
/// should be in flight at a time (the shell keeps the convert control
/// disabled until `on_run_complete`).
pub fn start_run<O>(
    request: ConversionRequest,
    cancel: CancelFlag,
    observer: O,
) -> Result<JoinHandle<RunSummary>, SetupError>
where
    O: RunObserver + Send + 'static,
{
    let destination = check_preconditions(&request)?;
    cancel.reset();
    Ok(thread::spawn(move || {
        run(
            &request.files,
            request.format,
            request.quality,
            &destination,
            &cancel,
            &observer,
        )
    }))
}

fn check_preconditions(request: &ConversionRequest) -> Result<PathBuf, SetupError> {
    let destination = request
        .destination
        .clone()
        .ok_or(SetupError::NoDestination)?;
    if request.files.is_empty() {
        return Err(SetupError::NoFiles);
    }
    probe_writable(&destination)?;
    Ok(destination)
}

/// Synchronous write test: create a scratch file in the destination, write
/// to it, delete it.
fn probe_writable(dir: &Path) -> Result<(), SetupError> {
    let probe = dir.join("test_write_permission.tmp");
    fs::write(&probe, b"test")
        .and_then(|()| fs::remove_file(&probe))
        .map_err(|_| SetupError::DestinationNotWritable(dir.to_path_buf()))
}

fn run(
    files: &[PathBuf],
    format: OutputFormat,
    quality: u8,
    destination: &Path,
    cancel: &CancelFlag,
    observer: &dyn RunObserver,
) -> RunSummary {
    let total = files.len();
    let mut summary = RunSummary::default();

    for (i, source) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        match convert_one(source, destination, format, quality, observer) {
            ConversionOutcome::Converted(dest) => {
                summary.converted += 1;
                observer.on_log(&format!("Saved: {}", dest.display()));
                observer.on_progress(i + 1, total);
            }
            ConversionOutcome::Skipped(name) => {
                summary.skipped += 1;
                observer.on_log(&format!("Skipped (not overwritten): {name}"));
            }
            ConversionOutcome::Failed(reason) => {
                summary.failed += 1;
                observer.on_log(&reason);
            }
        }
    }

    if summary.cancelled {
        observer.on_log("Conversion cancelled by user.");
    } else {
        observer.on_log(&format!(
            "Finished conversion. Succeeded: {}, failed: {}",
            summary.converted, summary.failed
        ));
    }
    observer.on_run_complete(&summary);
    summary
}

fn convert_one(
    source: &Path,
    destination: &Path,
    format: OutputFormat,
    quality: u8,
    observer: &dyn RunObserver,
) -> ConversionOutcome {
    let Some(stem) = source.file_stem().and_then(|s| s.to_str()) else {
        return ConversionOutcome::Failed(format!("Invalid file name: {}", source.display()));
    };
    let dest_name = format!("{stem}.{}", format.extension());
    let dest = destination.join(&dest_name);

    if dest.exists() && !observer.on_file_exists(&dest_name) {
        return ConversionOutcome::Skipped(dest_name);
    }

    observer.on_log(&format!("Converting: {}", source.display()));

    if let Err(e) = codec::verify_image(source) {
        return ConversionOutcome::Failed(e.to_string());
    }
    // verify consumed the decode; re-open for the actual encode.
    let img = match codec::open_image(source) {
        Ok(img) => img,
        Err(e) => return ConversionOutcome::Failed(e.to_string()),
    };
    match codec::encode_image(&img, &dest, format, quality) {
        Ok(()) => ConversionOutcome::Converted(dest),
        Err(e) => ConversionOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use std::sync::Mutex;

    fn write_image(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let buffer = ImageBuffer::from_fn(w, h, |x, y| {
            Rgb([(x * 3 % 256) as u8, (y * 7 % 256) as u8, 120u8])
        });
        let path = dir.join(name);
        DynamicImage::ImageRgb8(buffer).save(&path).unwrap();
        path
    }

    /// Records every callback; optionally cancels after the n-th progress
    /// event and answers overwrite prompts with a fixed decision.
    struct RecordingObserver {
        logs: Mutex<Vec<String>>,
        progress: Mutex<Vec<(usize, usize)>>,
        completed: Mutex<Option<RunSummary>>,
        overwrite_answer: bool,
        cancel_after: Option<(usize, CancelFlag)>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                logs: Mutex::new(Vec::new()),
                progress: Mutex::new(Vec::new()),
                completed: Mutex::new(None),
                overwrite_answer: true,
                cancel_after: None,
            }
        }

        fn declining() -> Self {
            Self {
                overwrite_answer: false,
                ..Self::new()
            }
        }

        fn cancelling_after(n: usize, flag: CancelFlag) -> Self {
            Self {
                cancel_after: Some((n, flag)),
                ..Self::new()
            }
        }

        fn logs(&self) -> Vec<String> {
            self.logs.lock().unwrap().clone()
        }
    }

    impl RunObserver for std::sync::Arc<RecordingObserver> {
        fn on_progress(&self, current: usize, total: usize) {
            self.as_ref().on_progress(current, total);
        }
        fn on_log(&self, message: &str) {
            self.as_ref().on_log(message);
        }
        fn on_file_exists(&self, candidate_name: &str) -> bool {
            self.as_ref().on_file_exists(candidate_name)
        }
        fn on_run_complete(&self, summary: &RunSummary) {
            self.as_ref().on_run_complete(summary);
        }
    }

    impl RunObserver for RecordingObserver {
        fn on_progress(&self, current: usize, total: usize) {
            self.progress.lock().unwrap().push((current, total));
            if let Some((n, flag)) = &self.cancel_after {
                if current >= *n {
                    flag.cancel();
                }
            }
        }

        fn on_log(&self, message: &str) {
            self.logs.lock().unwrap().push(message.to_string());
        }

        fn on_file_exists(&self, _candidate_name: &str) -> bool {
            self.overwrite_answer
        }

        fn on_run_complete(&self, summary: &RunSummary) {
            *self.completed.lock().unwrap() = Some(summary.clone());
        }
    }

    #[test]
    fn files_are_processed_in_input_order() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let files = vec![
            write_image(src.path(), "zeta.png", 8, 8),
            write_image(src.path(), "alpha.jpg", 8, 8),
            write_image(src.path(), "mid.bmp", 8, 8),
        ];

        let observer = RecordingObserver::new();
        let cancel = CancelFlag::new();
        let summary = run(
            &files,
            OutputFormat::Png,
            100,
            dst.path(),
            &cancel,
            &observer,
        );

        assert_eq!(summary.converted, 3);
        let converting: Vec<String> = observer
            .logs()
            .iter()
            .filter(|l| l.starts_with("Converting: "))
            .cloned()
            .collect();
        let expected: Vec<String> = files
            .iter()
            .map(|f| format!("Converting: {}", f.display()))
            .collect();
        assert_eq!(converting, expected);
    }

    #[test]
    fn progress_is_monotonic_and_complete() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..4)
            .map(|i| write_image(src.path(), &format!("f{i}.png"), 4, 4))
            .collect();

        let observer = RecordingObserver::new();
        run(
            &files,
            OutputFormat::Bmp,
            100,
            dst.path(),
            &CancelFlag::new(),
            &observer,
        );

        let progress = observer.progress.lock().unwrap().clone();
        assert_eq!(progress, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn corrupt_file_does_not_abort_the_run() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let good = write_image(src.path(), "good.jpg", 8, 8);
        let corrupt = src.path().join("corrupt.jpg");
        std::fs::write(&corrupt, b"not an image at all").unwrap();
        let good2 = write_image(src.path(), "good2.png", 8, 8);

        let observer = RecordingObserver::new();
        let summary = run(
            &[good, corrupt, good2],
            OutputFormat::Png,
            100,
            dst.path(),
            &CancelFlag::new(),
            &observer,
        );

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.cancelled);
        assert!(dst.path().join("good.png").is_file());
        assert!(dst.path().join("good2.png").is_file());
        assert!(!dst.path().join("corrupt.png").exists());
    }

    #[test]
    fn cancellation_stops_before_the_next_file() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..5)
            .map(|i| write_image(src.path(), &format!("f{i}.png"), 4, 4))
            .collect();

        let cancel = CancelFlag::new();
        let observer = RecordingObserver::cancelling_after(2, cancel.clone());
        let summary = run(
            &files,
            OutputFormat::Png,
            100,
            dst.path(),
            &cancel,
            &observer,
        );

        assert!(summary.cancelled);
        assert_eq!(summary.converted, 2);
        assert!(dst.path().join("f1.png").is_file());
        assert!(!dst.path().join("f2.png").exists());
        assert!(observer.logs().iter().any(|l| l.contains("cancelled")));
    }

    #[test]
    fn cancel_flag_is_idempotent_and_resets_per_run() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        cancel.cancel();
        assert!(cancel.is_cancelled());
        cancel.reset();
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn declined_overwrite_is_skipped_and_run_continues() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let a = write_image(src.path(), "a.jpg", 8, 8);
        let b = write_image(src.path(), "b.jpg", 8, 8);
        // Pre-existing destination for "a" only.
        write_image(dst.path(), "a.jpg", 2, 2);

        let observer = RecordingObserver::declining();
        let summary = run(
            &[a, b],
            OutputFormat::Jpeg,
            90,
            dst.path(),
            &CancelFlag::new(),
            &observer,
        );

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 0);
        // The pre-existing 2x2 file was left alone.
        let untouched = codec::open_image(&dst.path().join("a.jpg")).unwrap();
        assert_eq!((untouched.width(), untouched.height()), (2, 2));
        assert!(dst.path().join("b.jpg").is_file());
    }

    #[test]
    fn confirmed_overwrite_replaces_the_destination() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let a = write_image(src.path(), "a.jpg", 8, 8);
        write_image(dst.path(), "a.jpg", 2, 2);

        let observer = RecordingObserver::new();
        let summary = run(
            &[a],
            OutputFormat::Jpeg,
            100,
            dst.path(),
            &CancelFlag::new(),
            &observer,
        );

        assert_eq!(summary.converted, 1);
        let replaced = codec::open_image(&dst.path().join("a.jpg")).unwrap();
        assert_eq!((replaced.width(), replaced.height()), (8, 8));
    }

    #[test]
    fn same_format_round_trip_preserves_dimensions() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let source = write_image(src.path(), "photo.jpg", 37, 23);

        let observer = RecordingObserver::new();
        let summary = run(
            &[source],
            OutputFormat::Jpeg,
            100,
            dst.path(),
            &CancelFlag::new(),
            &observer,
        );

        assert_eq!(summary.converted, 1);
        let out = codec::open_image(&dst.path().join("photo.jpg")).unwrap();
        assert_eq!((out.width(), out.height()), (37, 23));
    }

    #[test]
    fn start_run_rejects_missing_destination() {
        let request = ConversionRequest {
            files: vec![PathBuf::from("a.png")],
            format: OutputFormat::Png,
            quality: 100,
            destination: None,
        };
        let err = start_run(request, CancelFlag::new(), RecordingObserver::new()).unwrap_err();
        assert!(matches!(err, SetupError::NoDestination));
    }

    #[test]
    fn start_run_rejects_empty_file_list() {
        let dst = tempfile::tempdir().unwrap();
        let request = ConversionRequest {
            files: Vec::new(),
            format: OutputFormat::Png,
            quality: 100,
            destination: Some(dst.path().to_path_buf()),
        };
        let err = start_run(request, CancelFlag::new(), RecordingObserver::new()).unwrap_err();
        assert!(matches!(err, SetupError::NoFiles));
    }

    #[test]
    fn unwritable_destination_is_rejected_before_any_file_is_opened() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let file = write_image(src.path(), "a.png", 4, 4);
        // A regular file as destination makes the write probe fail on every
        // platform, root included.
        let not_a_dir = dst.path().join("blocked");
        std::fs::write(&not_a_dir, b"file, not a folder").unwrap();

        let observer = std::sync::Arc::new(RecordingObserver::new());
        let request = ConversionRequest {
            files: vec![file],
            format: OutputFormat::Png,
            quality: 100,
            destination: Some(not_a_dir),
        };
        let err = match start_run(request, CancelFlag::new(), observer.clone()) {
            Err(e) => e,
            Ok(_) => panic!("expected setup error"),
        };
        assert!(matches!(err, SetupError::DestinationNotWritable(_)));
        // Rejected before processing: no per-file log line was ever emitted.
        assert!(observer.logs().is_empty());
    }

    #[test]
    fn run_completes_through_worker_thread() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let file = write_image(src.path(), "threaded.png", 6, 6);

        let request = ConversionRequest {
            files: vec![file],
            format: OutputFormat::Webp,
            quality: 100,
            destination: Some(dst.path().to_path_buf()),
        };
        let handle = start_run(request, CancelFlag::new(), RecordingObserver::new()).unwrap();
        let summary = handle.join().unwrap();

        assert_eq!(summary.converted, 1);
        assert!(dst.path().join("threaded.webp").is_file());
    }

    #[test]
    fn write_probe_leaves_no_residue() {
        let dst = tempfile::tempdir().unwrap();
        probe_writable(dst.path()).unwrap();
        assert_eq!(std::fs::read_dir(dst.path()).unwrap().count(), 0);
    }
}

//! Command-line interface for batch entropy cropping of image files

use crate::crop::EntropyCropper;
use crate::io::configuration::{
    DEFAULT_MAX_PERCENT, DEFAULT_MAX_STEPS, DEFAULT_MIN_PERCENT, OUTPUT_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, invalid_source};
use crate::io::image::{load_grayscale, save_grayscale};
use crate::io::progress::ProgressManager;
use crate::math::scaling::LinearStretch;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "entropycrop")]
#[command(
    author,
    version,
    about = "Crop images to the region with the most information content"
)]
/// Command-line arguments for the cropping tool
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Width of the cropped image in pixels
    #[arg(short = 'w', long)]
    pub width: usize,

    /// Height of the cropped image in pixels
    #[arg(short = 'H', long)]
    pub height: usize,

    /// Number of border strips removed per axis
    #[arg(short = 's', long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Lower percentile mapped to black
    #[arg(long, default_value_t = DEFAULT_MIN_PERCENT)]
    pub min_percent: f64,

    /// Upper percentile mapped to white
    #[arg(long, default_value_t = DEFAULT_MAX_PERCENT)]
    pub max_percent: f64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Cropper configured from the size arguments
    pub const fn cropper(&self) -> EntropyCropper {
        EntropyCropper::new(self.width, self.height).with_max_steps(self.max_steps)
    }

    /// Intensity stretch configured from the percentile arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the percentiles are out of range or not ordered.
    pub fn stretch(&self) -> Result<LinearStretch> {
        LinearStretch::new(self.min_percent, self.max_percent)
    }
}

/// Orchestrates batch cropping of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, target collection or
    /// processing of any file fails
    pub fn process(&mut self) -> Result<()> {
        let stretch = self.cli.stretch()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("Nothing to process in {}", self.cli.target.display());
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        // The bar is cleared even when a file fails part way through
        let outcome = files
            .iter()
            .try_for_each(|file| self.process_file(file, stretch));

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        outcome
    }

    /// Progress display, absent in quiet mode
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    /// Gather the input files named by the target argument
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_source(&format!(
                    "'{}' is not a supported image ({})",
                    self.cli.target.display(),
                    SUPPORTED_EXTENSIONS.join(", ")
                )))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.is_file()
                    && is_supported(&path)
                    && !is_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_source(&format!(
                "'{}' must be an image file or directory",
                self.cli.target.display()
            )))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            log::warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, stretch: LinearStretch) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let image = load_grayscale(input_path)?;
        let cropped = self.cli.cropper().crop(&image)?;
        save_grayscale(&stretch.apply(&cropped), &output_path)?;

        log::info!(
            "Cropped {} ({}x{}) to {} ({}x{}) in {:?}",
            input_path.display(),
            image.ncols(),
            image.nrows(),
            output_path.display(),
            cropped.ncols(),
            cropped.nrows(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    /// Output location for a given input: `<stem>_cropped.<ext>` beside it
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

// Previous results sit beside their inputs and must not be cropped again
fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

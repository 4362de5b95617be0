use indicatif::{ProgressBar, ProgressStyle};

pub fn create_lookup_progress_bar(total_records: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_records);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}

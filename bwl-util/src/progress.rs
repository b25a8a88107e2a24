//! Terminal progress bar bridging the core batch observer.

use indicatif::{ProgressBar, ProgressStyle};

use bwl_util_core::contract::ProgressObserver;

pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("progress bar template is valid")
                .progress_chars("█▓▒░ "),
        );
        Self { bar }
    }

    pub fn finish(&self, successes: usize, failures: usize) {
        self.bar
            .finish_with_message(format!("Completed: {successes} successful, {failures} failed"));
    }
}

impl ProgressObserver for BarProgress {
    fn on_item_complete(&self) {
        self.bar.inc(1);
    }
}

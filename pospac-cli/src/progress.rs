use indicatif::{ProgressBar, ProgressStyle};

use crate::Error;

/// Percentage progress bar, hidden in quiet mode
pub fn percentage_bar(message: &str, quiet: bool) -> Result<ProgressBar, Error> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg} ({eta})")?
            .progress_chars("##-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

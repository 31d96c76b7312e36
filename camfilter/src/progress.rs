use log::debug;

/// Receives completion percent (0 to 100) and a label. May be called from
/// worker threads.
pub type Progress<'a> = &'a (dyn Fn(u8, &str) + Sync);

pub fn no_progress(_percent: u8, _label: &str) {}

pub fn log_progress(percent: u8, label: &str) {
    debug!("{}: {}%", label, percent);
}

//! Log output for the binary

use std::io::Write;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

/// Timestamped `"{time} [{level}] - {message}"` lines on stderr
pub fn init(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();
}

use std::path::PathBuf;

use eyre::Result;
use log::info;

/// Directory holding `<app>.log`
pub fn log_dir(app: &str) -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app)
        .join("logs")
}

pub fn log_file(app: &str) -> PathBuf {
    log_dir(app).join(format!("{app}.log"))
}

/// Append log records to the app's log file, level from `RUST_LOG`
pub fn setup_logging(app: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir(app))?;
    let log_file = log_file(app);

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

/// File logging, or stderr when the log file cannot be opened
pub fn init(app: &str) {
    if let Err(e) = setup_logging(app) {
        eprintln!("Warning: file logging unavailable ({e}), logging to stderr");
        env_logger::Builder::from_default_env().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_is_per_app() {
        let path = log_file("seo-registry");
        assert!(path.ends_with("seo-registry/logs/seo-registry.log"));
        assert_ne!(log_file("ytextract"), path);
    }
}

use std::path::PathBuf;
use log::LevelFilter;

/// Installs logger writing to stdout or to `log_file`.
/// `engine_level` applies to engine crates, `log_level` to everything else.
pub fn setup_logger(log_level: LevelFilter, engine_level: LevelFilter, log_file: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let dispatch  = fern::Dispatch::new()

        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log_level)
        .level_for("rondo_core", engine_level)
        .level_for("rondo_classic", engine_level);

        match log_file{
            None => dispatch.chain(std::io::stdout()),
            Some(f) => dispatch.chain(fern::log_file(f)?)
        }

        .apply()?;
    Ok(())
}

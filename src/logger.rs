use log::{LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: Logger = Logger;

/// Prints every record as `LEVEL file:line message`.
pub struct Logger;

impl Logger {
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!(
            "{} {}:{} {}",
            record.level(),
            record.file().unwrap_or("*unknown file*"),
            record.line().unwrap_or_default(),
            record.args()
        );
        match record.level() {
            log::Level::Error | log::Level::Warn => eprintln!("{}", message),
            _ => println!("{}", message),
        }
    }

    fn flush(&self) {}
}

pub fn init_with(log_file: Option<std::path::PathBuf>) {
    use env_logger::Target;
    use std::fs;
    use std::io;

    // The TUI owns the terminal, so logs go to a file when one is requested.
    // If the file cannot be created (permissions, readonly FS, etc.), fall
    // back to stderr.
    let target = match log_file {
        Some(path) => (|| -> io::Result<Target> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
            Ok(Target::Pipe(Box::new(file)))
        })()
        .unwrap_or(Target::Stderr),
        None => Target::Stderr,
    };

    env_logger::Builder::from_default_env()
        .target(target)
        .filter_level(log::LevelFilter::Info)
        .init();
}

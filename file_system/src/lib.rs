use std::{fs, io, path::PathBuf};

use directories_next::ProjectDirs;

/// Returns path to database file located in default data dir for application.
pub fn get_database_path() -> io::Result<PathBuf> {
    Ok(get_default_data_dir()?.join("db.sqlite"))
}

/// Returns path to the directory where rotated log files are written.
pub fn get_log_dir() -> io::Result<PathBuf> {
    let log_dir = get_default_data_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

fn get_default_data_dir() -> io::Result<PathBuf> {
    let project_dirs = get_project_dirs()?;
    let data_dir = project_dirs.data_local_dir();
    fs::create_dir_all(data_dir)?;
    Ok(PathBuf::from(data_dir))
}

fn get_project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from("org", "nodetree", "unpublish").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine project directory",
        )
    })
}

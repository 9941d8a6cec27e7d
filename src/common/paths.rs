use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "ocrprobe.toml";

pub fn local_config_file() -> PathBuf {
    PathBuf::from("configs").join(CONFIG_FILE_NAME)
}

pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ocrprobe").join(CONFIG_FILE_NAME))
}

/// Candidate config files, in lookup order.
pub fn config_search_path() -> Vec<PathBuf> {
    let mut candidates = vec![local_config_file()];
    candidates.extend(user_config_file());
    candidates
}

pub fn find_config_file() -> Option<PathBuf> {
    first_existing(config_search_path())
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

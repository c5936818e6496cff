use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConfigViewModel {
    pub config_path: String,
    pub exists: bool,
    /// Set by `config init` when it wrote the file.
    pub written: bool,
    pub data_dir: String,
    pub cursor_user_dir: String,
    pub trash_db: String,
    pub native_batch: bool,
}

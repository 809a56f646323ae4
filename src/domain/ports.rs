use crate::core::indicators::Markers;
use crate::utils::error::Result;

/// Where subject lists are read from and design files are written to.
pub trait Storage {
    /// The location `path` refers to, as reported in errors.
    fn resolve_path(&self, path: &str) -> String {
        path.to_string()
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn working_dir(&self) -> &str;
    fn subjects_file(&self) -> &str;
    /// Defaults to the working directory when unset.
    fn output_dir(&self) -> &str;
    fn markers(&self) -> Markers;
    fn indicator_table(&self) -> Option<&str>;
}

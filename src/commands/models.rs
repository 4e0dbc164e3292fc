use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory holding one CSV file per shard
    pub input_dir: PathBuf,

    /// Profession substring for the filtered series
    pub profession: String,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// TOML config with rate table and ranking policy (optional)
    pub config: Option<PathBuf>,

    /// Worker pool size (None = available cores minus reserve)
    pub workers: Option<usize>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("csv"),
            profession: String::new(),
            output_json: Some(PathBuf::from("report.json")),
            config: None,
            workers: None,
            print_summary: false,
        }
    }
}

//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - human readable, one row per entry (default)
    #[default]
    Table,
    /// JSON format - full records with metadata, for scripts
    Json,
}

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("allocation {landfill}/{combustion}/{compost} sums to {sum}, expected 100")]
    InconsistentAllocation {
        landfill: i64,
        combustion: i64,
        compost: i64,
        sum: i64,
    },
    #[error("unknown selection '{0}'")]
    UnknownSelection(String),
    #[error("unknown pathway '{0}'")]
    UnknownPathway(String),
    #[error("allocation sliders are disabled in the aggregate view")]
    NotEditable,
    #[error("invalid dashboard configuration: {0}")]
    InvalidConfig(String),
    #[error("failed reading '{path}': {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },
    #[error("failure decoding configuration JSON: {source}")]
    ConfigParse {
        #[from]
        source: serde_json::Error,
    },
}

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Predict production and yield for one record.
    Predict(PredictArgs),
    /// List the categorical values a record may use.
    Options(OptionsArgs),
    /// Show the model's training feature schema.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    /// State name
    #[arg(long, required_unless_present = "record")]
    pub state: Option<String>,

    /// District name
    #[arg(long, required_unless_present = "record")]
    pub district: Option<String>,

    /// Crop name
    #[arg(long, required_unless_present = "record")]
    pub crop: Option<String>,

    /// Season name
    #[arg(long, required_unless_present = "record")]
    pub season: Option<String>,

    /// Cultivated area in hectares
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub area: f64,

    /// Whole record as a JSON object, e.g. '{"State": "X", "Area": 10}'
    #[arg(long, conflicts_with_all = ["state", "district", "crop", "season"])]
    pub record: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct OptionsArgs {
    /// Only list values for this field (e.g. Crop)
    #[arg(long)]
    pub field: Option<String>,
}

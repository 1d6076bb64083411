use std::fmt;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SchemaResponse {
    categorical_fields: Vec<String>,
    features: Vec<String>,
    trees: usize,
    link: String,
}

impl fmt::Display for SchemaResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Categorical fields: {}",
            self.categorical_fields.join(", ")
        )?;
        writeln!(f, "Model: {} trees, {} link", self.trees, self.link)?;
        write!(f, "Training features ({}):", self.features.len())?;
        for (position, name) in self.features.iter().enumerate() {
            write!(f, "\n  {position:>4}  {name}")?;
        }
        Ok(())
    }
}

/// Handle `cropcast schema`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = SchemaResponse {
        categorical_fields: ctx.service.fields().as_slice().to_vec(),
        features: ctx.service.schema().names().to_vec(),
        trees: ctx.artifacts.model().num_trees(),
        link: ctx.artifacts.model().link().as_str().to_string(),
    };
    output(&response, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::SchemaResponse;

    #[test]
    fn text_lists_features_with_positions() {
        let response = SchemaResponse {
            categorical_fields: vec!["Crop".into(), "Season".into()],
            features: vec!["Area".into(), "Crop_Rice".into()],
            trees: 2,
            link: "identity".into(),
        };
        assert_eq!(
            response.to_string(),
            "Categorical fields: Crop, Season\nModel: 2 trees, identity link\nTraining features (2):\n     0  Area\n     1  Crop_Rice"
        );
    }
}

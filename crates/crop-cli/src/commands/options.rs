use std::collections::BTreeMap;
use std::fmt;

use crop_predict::LookupTable;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OptionsArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct OptionsResponse {
    fields: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for OptionsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, values) in &self.fields {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{field}:")?;
            for value in values {
                write!(f, "\n  {value}")?;
            }
        }
        Ok(())
    }
}

/// Handle `cropcast options`.
pub fn handle(args: &OptionsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let table = ctx.lookup_table()?;
    let response = select(&table, args.field.as_deref())?;
    output(&response, flags.format)
}

fn select(table: &LookupTable, field: Option<&str>) -> anyhow::Result<OptionsResponse> {
    let fields = match field {
        Some(name) => {
            let values = table.values(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "'{name}' is not a categorical field (expected one of: {})",
                    table.fields().collect::<Vec<_>>().join(", ")
                )
            })?;
            BTreeMap::from([(name.to_string(), values.to_vec())])
        }
        None => table
            .iter()
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect(),
    };
    Ok(OptionsResponse { fields })
}

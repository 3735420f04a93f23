// crates/dalemeta-core/src/appliances.rs

use std::collections::{HashMap, HashSet};

use dalemeta_parser::LabelTable;

use crate::error::{MetadataError, Result};
use crate::types::Appliance;

/// Resolves meter references and instance numbers for one household's
/// appliance entries, in table order.
///
/// Entries without an explicit `meters` list are matched to the single
/// channel whose label equals their `original_name`; a missing or ambiguous
/// label is fatal for the household. Entries without an explicit `instance`
/// get the next unused ordinal for their type, counted from 1. Explicit
/// instance numbers never advance the counter.
pub fn reconcile_appliances(
    mut appliances: Vec<Appliance>,
    labels: &LabelTable,
) -> Result<Vec<Appliance>> {
    let mut next_instance: HashMap<String, u32> = HashMap::new();

    for appliance in &mut appliances {
        let needs_meters = appliance.meters.as_ref().map_or(true, Vec::is_empty);
        if needs_meters {
            let name = appliance.original_name.as_deref().ok_or_else(|| {
                MetadataError::Validation(format!(
                    "appliance '{}' has neither meters nor an original_name to resolve them from",
                    appliance.kind
                ))
            })?;
            let channel = labels.channel_for_label(name)?;
            appliance.meters = Some(vec![channel]);
        }

        if appliance.instance.is_none() {
            let counter = next_instance.entry(appliance.kind.clone()).or_insert(1);
            appliance.instance = Some(*counter);
            *counter += 1;
        }
    }

    detect_instance_collisions(&appliances)?;
    Ok(appliances)
}

/// (type, instance) pairs must be unique within a household. The counter
/// only tracks auto-assigned numbers, so an explicit number can still collide
/// with one of them; that is a catalog bug and gets rejected here.
fn detect_instance_collisions(appliances: &[Appliance]) -> Result<()> {
    let mut seen: HashSet<(&str, u32)> = HashSet::new();
    for appliance in appliances {
        if let Some(instance) = appliance.instance {
            if !seen.insert((appliance.kind.as_str(), instance)) {
                return Err(MetadataError::Validation(format!(
                    "appliance type '{}' instance {} appears more than once",
                    appliance.kind, instance
                )));
            }
        }
    }
    Ok(())
}

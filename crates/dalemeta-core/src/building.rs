// crates/dalemeta-core/src/building.rs

use dalemeta_parser::{DataSource, LabelTable};

use crate::appliances::reconcile_appliances;
use crate::catalog::BuildingSeed;
use crate::error::Result;
use crate::meters::build_meters;
use crate::types::{Appliance, Building};

/// Combines the meter map, the reconciled appliance list, and the static
/// household metadata into one record. The returned building carries its own
/// timeframe; the caller folds it into the dataset bounds.
pub fn assemble_building(
    seed: &BuildingSeed,
    appliances: Vec<Appliance>,
    source: &dyn DataSource,
) -> Result<Building> {
    let original_name = format!("house_{}", seed.instance);
    let labels =
        LabelTable::parse(&source.read_text(&format!("{original_name}/labels.dat"))?)?;

    let meter_set = build_meters(seed.instance, &original_name, &labels, source)?;
    let appliances = reconcile_appliances(appliances, &labels)?;

    Ok(Building {
        instance: seed.instance,
        original_name,
        metadata: seed.metadata.clone(),
        elec_meters: meter_set.meters,
        timeframe: meter_set.timeframe,
        appliances,
    })
}

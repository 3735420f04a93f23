// crates/dalemeta-core/src/rules.rs

use once_cell::sync::Lazy;

use crate::types::DeviceModel;

/// A metadata exception for one (building, label) pair, applied by the meter
/// builder after default classification. Keeping these in one table instead
/// of inline conditionals means a new household's exceptions land here and
/// nowhere else.
#[derive(Debug, Clone)]
pub struct MeterRule {
    pub building: u32,
    pub label: &'static str,
    pub action: RuleAction,
}

#[derive(Debug, Clone)]
pub enum RuleAction {
    /// The channel is metered by a different sensor model than the default.
    DeviceModel(DeviceModel),
    /// The channel is wired downstream of the channel carrying this label.
    SubmeterOfLabel(&'static str),
    /// Known data-quality problem worth surfacing alongside the data.
    Warning(&'static str),
}

const TOASTER_SWAP_WARNING: &str = "For the five days from Mon 24th June 2013 to \
Fri 28th June we had someone staying at the house who occassionally swapped the \
toaster and kettle around (i.e. the toaster was plugged into the kettle sensor \
and visa-versa!) and also appeared to plug the hoover sensor into the kettle \
sensor (i.e. both the hoover and kettle sensor would have recorded the same \
appliance for a few hours).";

static METER_RULES: Lazy<Vec<MeterRule>> = Lazy::new(|| {
    vec![
        MeterRule {
            building: 1,
            label: "boiler",
            action: RuleAction::DeviceModel(DeviceModel::CurrentCostTx),
        },
        MeterRule {
            building: 1,
            label: "solar_thermal_pump",
            action: RuleAction::DeviceModel(DeviceModel::CurrentCostTx),
        },
        MeterRule {
            building: 1,
            label: "lighting_circuit",
            action: RuleAction::DeviceModel(DeviceModel::CurrentCostTx),
        },
        MeterRule {
            building: 1,
            label: "kitchen_lights",
            action: RuleAction::DeviceModel(DeviceModel::CurrentCostTx),
        },
        // The kitchen ceiling lights are a sub-circuit of the main lighting
        // circuit, not a direct child of the site meter.
        MeterRule {
            building: 1,
            label: "kitchen_lights",
            action: RuleAction::SubmeterOfLabel("lighting_circuit"),
        },
        MeterRule {
            building: 1,
            label: "toaster",
            action: RuleAction::Warning(TOASTER_SWAP_WARNING),
        },
    ]
});

pub fn all_meter_rules() -> &'static [MeterRule] {
    METER_RULES.as_slice()
}

/// Every rule matching this (building, label) pair, in table order.
pub fn rules_for<'a>(
    building: u32,
    label: &'a str,
) -> impl Iterator<Item = &'static MeterRule> + 'a {
    METER_RULES
        .iter()
        .filter(move |rule| rule.building == building && rule.label == label)
}

// crates/dalemeta-core/src/meters.rs

use std::collections::BTreeMap;

use dalemeta_parser::{DataSource, LabelTable};
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::rules::{rules_for, RuleAction};
use crate::types::{DeviceModel, Meter, Preprocessing, Timeframe};

/// Reserved label marking a whole-house aggregate channel.
pub const AGGREGATE_LABEL: &str = "aggregate";

/// Dedicated whole-house sensor file, present for some households.
pub const WHOLE_HOUSE_SENSOR_FILE: &str = "mains.dat";

/// Saturation points of the two transmitter families, recorded as clip
/// bounds for downstream preprocessing.
const SITE_METER_CLIP_W: u32 = 20_000;
const SUBMETER_CLIP_W: u32 = 4_000;

#[derive(Debug)]
pub struct MeterSet {
    pub meters: BTreeMap<u32, Meter>,
    /// min(start)/max(end) over every meter in the map, the synthetic
    /// whole-house meter included.
    pub timeframe: Timeframe,
}

/// Builds the meter map for one household: one record per labelled channel,
/// in ascending channel order, plus a synthetic whole-house meter appended at
/// channel max+1 when a dedicated sensor file exists.
pub fn build_meters(
    building: u32,
    original_name: &str,
    labels: &LabelTable,
    source: &dyn DataSource,
) -> Result<MeterSet> {
    if labels.is_empty() {
        return Err(MetadataError::Validation(format!(
            "household {original_name} has an empty label table; cannot derive a timeframe"
        )));
    }

    let has_aggregate = labels.contains_label(AGGREGATE_LABEL);
    let mut meters = BTreeMap::new();
    let mut span: Option<Timeframe> = None;

    for (channel, label) in labels.iter() {
        let location = format!("{original_name}/channel_{channel}.dat");
        let timeframe = Timeframe::from(source.log_bounds(&location)?);
        fold_span(&mut span, &timeframe);

        let mut meter = if label == AGGREGATE_LABEL {
            Meter {
                data_location: location,
                timeframe,
                device_model: DeviceModel::EcoManagerWholeHouseTx,
                site_meter: Some(true),
                submeter_of: None,
                preprocessing_applied: Some(Preprocessing::clip(SITE_METER_CLIP_W)),
                warning: None,
            }
        } else {
            Meter {
                data_location: location,
                timeframe,
                device_model: DeviceModel::EcoManagerTxPlug,
                site_meter: None,
                // Channels hang off the aggregate meter when one exists,
                // otherwise directly under the synthetic whole-house sensor.
                submeter_of: Some(if has_aggregate { 0 } else { 1 }),
                preprocessing_applied: Some(Preprocessing::clip(SUBMETER_CLIP_W)),
                warning: None,
            }
        };

        for rule in rules_for(building, label) {
            match &rule.action {
                RuleAction::DeviceModel(model) => meter.device_model = *model,
                RuleAction::SubmeterOfLabel(parent) => {
                    meter.submeter_of = Some(labels.channel_for_label(parent)?);
                }
                RuleAction::Warning(text) => meter.warning = Some((*text).to_string()),
            }
        }

        debug!(building, channel, label, "built meter record");
        meters.insert(channel, meter);
    }

    let sensor_location = format!("{original_name}/{WHOLE_HOUSE_SENSOR_FILE}");
    if source.exists(&sensor_location) {
        let timeframe = Timeframe::from(source.log_bounds(&sensor_location)?);
        fold_span(&mut span, &timeframe);

        let channel = meters.keys().next_back().copied().unwrap_or(0) + 1;
        debug!(building, channel, "appended synthetic whole-house meter");
        meters.insert(
            channel,
            Meter {
                data_location: sensor_location,
                timeframe,
                device_model: DeviceModel::SoundCardPowerMeter,
                site_meter: Some(true),
                submeter_of: Some(1),
                preprocessing_applied: None,
                warning: None,
            },
        );
    }

    let timeframe = span.ok_or_else(|| {
        MetadataError::Validation(format!(
            "household {original_name} produced no meter timeframes"
        ))
    })?;

    Ok(MeterSet { meters, timeframe })
}

fn fold_span(span: &mut Option<Timeframe>, timeframe: &Timeframe) {
    *span = Some(match span.take() {
        Some(current) => current.union(timeframe),
        None => timeframe.clone(),
    });
}

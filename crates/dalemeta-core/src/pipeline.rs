// crates/dalemeta-core/src/pipeline.rs

use std::path::Path;

use dalemeta_parser::DataSource;
use tracing::info;

use crate::building::assemble_building;
use crate::catalog::Catalog;
use crate::emit::DocumentSet;
use crate::error::{MetadataError, Result};
use crate::types::{DatasetDocument, Timeframe};

/// What a conversion run produced, for operator-facing summaries.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub buildings: usize,
    pub meters: usize,
    pub appliances: usize,
    pub documents: usize,
    pub timeframe: Timeframe,
}

/// Runs the whole conversion: every household in instance order, then the
/// dataset document, then a single buffered write of the full document set.
/// The dataset timeframe is the min/max fold of the household timeframes,
/// so household order cannot change it.
pub fn run(source: &dyn DataSource, catalog: &Catalog, out_dir: &Path) -> Result<ConvertSummary> {
    let mut documents = DocumentSet::new();
    let mut span: Option<Timeframe> = None;
    let mut meters = 0;
    let mut appliances = 0;

    for seed in &catalog.buildings {
        let entries = catalog.appliances_for(seed.instance).to_vec();
        let building = assemble_building(seed, entries, source)?;

        span = Some(match span.take() {
            Some(current) => current.union(&building.timeframe),
            None => building.timeframe.clone(),
        });
        meters += building.elec_meters.len();
        appliances += building.appliances.len();

        info!(
            building = building.instance,
            meters = building.elec_meters.len(),
            appliances = building.appliances.len(),
            "assembled household record"
        );
        documents.render(format!("building{}.yaml", building.instance), &building)?;
    }

    let timeframe = span.ok_or_else(|| {
        MetadataError::Validation("catalog lists no buildings; nothing to convert".to_string())
    })?;

    let dataset = DatasetDocument {
        description: catalog.dataset.clone(),
        date: timeframe.end.date_naive().format("%Y-%m-%d").to_string(),
        timeframe,
    };
    documents.render("dataset.yaml", &dataset)?;

    let summary = ConvertSummary {
        buildings: catalog.buildings.len(),
        meters,
        appliances,
        documents: documents.len(),
        timeframe: dataset.timeframe.clone(),
    };

    documents.write_all(out_dir)?;
    info!(documents = summary.documents, "wrote metadata document set");

    Ok(summary)
}

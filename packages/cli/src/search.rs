//! Interactive terminal search session.
//!
//! Loads the catalog once behind a spinner, then repeatedly asks for a ZIP,
//! radius and filters and prints the same summary the map UI shows. A blank
//! ZIP ends the session.

use std::fmt::Write;

use dialoguer::{Input, MultiSelect, Select};
use facility_map_catalog::Catalog;
use facility_map_cli_utils::{MultiProgress, Spinner};
use facility_map_facility_models::AdditionalFilter;
use facility_map_search_models::{
    Presentation, SearchOutcome, SearchQuery, SearchRadius, SummaryView,
};

/// Maximum number of facilities listed after the summary.
const MAX_LISTED: usize = 10;

/// Runs the interactive search session.
///
/// # Errors
///
/// Returns an error if a dataset cannot be loaded or a prompt fails.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = Spinner::start(multi, "Loading facility catalog and ZIP gazetteer...");
    let catalog = match Catalog::load().await {
        Ok(catalog) => catalog,
        Err(e) => {
            spinner.finish_and_clear();
            log::error!("Dataset unavailable: {e}");
            return Err(e.into());
        }
    };
    spinner.finish(format!(
        "Loaded {} facilities and {} ZIP codes",
        catalog.facilities().len(),
        catalog.gazetteer().len()
    ));

    loop {
        println!();
        let Some(query) = prompt_query(&catalog)? else {
            break;
        };

        let (outcome, presentation) = facility_map_search::search(&catalog, &query);
        println!();
        print!("{}", format_report(&outcome, &presentation)?);
    }

    Ok(())
}

/// Prompts for one query. Returns `None` when the user leaves the ZIP blank.
fn prompt_query(catalog: &Catalog) -> Result<Option<SearchQuery>, dialoguer::Error> {
    let zip: String = Input::new()
        .with_prompt("ZIP code (blank to quit)")
        .allow_empty(true)
        .interact_text()?;
    let zip = zip.trim();
    if zip.is_empty() {
        return Ok(None);
    }

    let miles: u32 = Input::new()
        .with_prompt(format!("Radius in miles (0-{})", SearchRadius::MAX_MILES))
        .default(u32::from(SearchRadius::DEFAULT.miles()))
        .validate_with(|m: &u32| SearchRadius::from_miles(*m).map(|_| ()))
        .interact_text()?;
    let radius = SearchRadius::from_miles(miles).unwrap_or_default();

    let mut query = SearchQuery::new(zip, radius);

    let type_labels: Vec<&str> = std::iter::once("All facility types")
        .chain(catalog.facility_types().iter().map(String::as_str))
        .collect();
    let type_idx = Select::new()
        .with_prompt("Facility type")
        .items(&type_labels)
        .default(0)
        .interact()?;
    if type_idx > 0 {
        query = query.with_facility_type(type_labels[type_idx]);
    }

    let filter_labels: Vec<&str> = AdditionalFilter::all()
        .iter()
        .map(|f| f.label())
        .collect();
    let chosen = MultiSelect::new()
        .with_prompt("Additional filters (space to toggle)")
        .items(&filter_labels)
        .interact()?;
    for idx in chosen {
        query = query.with_filter(AdditionalFilter::all()[idx]);
    }

    Ok(Some(query))
}

/// Renders the summary panel and the nearest facilities as plain text.
fn format_report(
    outcome: &SearchOutcome,
    presentation: &Presentation,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, outcome, presentation)?;
    Ok(out)
}

fn write_report(
    out: &mut impl Write,
    outcome: &SearchOutcome,
    presentation: &Presentation,
) -> std::fmt::Result {
    match &presentation.summary {
        SummaryView::Placeholder { text } => writeln!(out, "{text}")?,
        SummaryView::Statistics { lines } => {
            let width = lines.iter().map(|l| l.label.len()).max().unwrap_or(0);
            for line in lines {
                writeln!(out, "{:<width$}  {}", line.label, line.value)?;
            }
        }
    }

    let Some(result) = outcome.result() else {
        return Ok(());
    };

    writeln!(out)?;
    for m in result.facilities.iter().take(MAX_LISTED) {
        writeln!(
            out,
            "{:>7.2} mi  {} ({}), {}, {}",
            m.distance_miles,
            m.facility.name,
            m.facility.facility_type,
            m.facility.address,
            m.facility.city
        )?;
    }

    let remaining = result.facilities.len().saturating_sub(MAX_LISTED);
    if remaining > 0 {
        writeln!(out, "... and {remaining} more")?;
    }

    Ok(())
}

//! Find command - fetch, rank and optionally drill into route candidates.

use std::path::PathBuf;
use std::sync::Arc;

use routelens::backend::HttpRouteBackend;
use routelens::directions::GoogleDirectionsProvider;
use routelens::http::ReqwestClient;
use routelens::map::HeadlessSurface;
use routelens::place::{EndpointState, PlaceSelector, StaticPlaceSelector};
use routelens::{Place, PlannerConfig, RouteCandidateSet, RoutePlanner, SelectionOutcome};

use crate::error::CliError;

/// Environment variable supplying the Directions API key.
const GOOGLE_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Arguments for the find command.
pub struct FindArgs {
    pub from: String,
    pub to: String,
    pub select: Option<String>,
    pub steps: bool,
    pub google_api_key: Option<String>,
    pub backend_url: Option<String>,
    pub config: Option<PathBuf>,
}

/// Run the find command.
pub async fn run(args: FindArgs) -> Result<(), CliError> {
    // CLI arguments stand in for the interactive place selector.
    let selector = StaticPlaceSelector::pair(
        parse_endpoint(&args.from, "origin")?,
        parse_endpoint(&args.to, "destination")?,
    );
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    selector.subscribe(tx);
    let mut endpoints = EndpointState::new();
    while let Ok(event) = rx.try_recv() {
        endpoints.apply(event);
    }
    let (origin, destination) = endpoints
        .pair()
        .map(|(o, d)| (o.clone(), d.clone()))
        .ok_or_else(|| CliError::Input("Both --from and --to are required".to_string()))?;

    let mut config =
        PlannerConfig::load(args.config.as_deref()).map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(url) = args.backend_url {
        config.backend_url = url.trim_end_matches('/').to_string();
    }

    let api_key = args
        .google_api_key
        .or_else(|| std::env::var(GOOGLE_API_KEY_ENV).ok())
        .unwrap_or_default();
    if args.steps && api_key.is_empty() {
        return Err(CliError::Input(format!(
            "--steps needs a Directions API key; pass --google-api-key or set {}",
            GOOGLE_API_KEY_ENV
        )));
    }

    let http = ReqwestClient::with_timeout(config.request_timeout_secs)?;
    let backend = HttpRouteBackend::new(http.clone(), config.backend_url.clone());
    let directions = GoogleDirectionsProvider::new(http, api_key);
    let planner = RoutePlanner::new(backend, directions, Arc::new(HeadlessSurface::new()), &config);

    planner.find_route(&origin, &destination).await?;
    let set = planner
        .current_set()
        .ok_or_else(|| CliError::Input("Backend returned no candidate set".to_string()))?;
    print_candidates(&set);

    if args.steps {
        let id = match args.select {
            Some(id) => id,
            None => set.chosen().map(|c| c.id.clone())?,
        };
        // Sequential use; a superseded pick cannot happen here.
        if let SelectionOutcome::Applied(directions) = planner.select_candidate(&id).await? {
            println!();
            println!("Directions for {}:", id);
            for (i, step) in directions.steps.iter().enumerate() {
                println!(
                    "  {:>2}. {} ({}, {})",
                    i + 1,
                    strip_markup(&step.instruction),
                    step.distance_label,
                    step.duration_label
                );
            }
        }
    }

    Ok(())
}

/// Parse a `lat,lon` argument into a route endpoint.
fn parse_endpoint(value: &str, label: &str) -> Result<Place, CliError> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| CliError::Input(format!("Invalid {}: expected lat,lon", label)))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("Invalid {} latitude: {}", label, lat)))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("Invalid {} longitude: {}", label, lon)))?;
    Ok(Place::resolved(label, lat, lon, value))
}

/// Print the ranked candidate list with the backend's pick marked.
fn print_candidates(set: &RouteCandidateSet) {
    println!("Found {} route(s):", set.len());
    for candidate in &set.candidates {
        let marker = if candidate.id == set.chosen_id { "*" } else { " " };
        let summary = candidate
            .legs
            .first()
            .map(|leg| format!("{}, {}", leg.distance_label, leg.duration_label))
            .unwrap_or_else(|| format!("{} points", candidate.path.len()));
        println!(
            " {} {}  [{}]  score {:.2}  {}",
            marker, candidate.id, candidate.classification, candidate.score, summary
        );
    }
    if let Some(explanation) = &set.explanation {
        println!();
        println!("{}", explanation);
    }
}

/// Remove HTML tags from an instruction string.
fn strip_markup(instruction: &str) -> String {
    let mut out = String::with_capacity(instruction.len());
    let mut in_tag = false;
    for c in instruction.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

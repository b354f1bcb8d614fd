use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_planner::config::PlannerConfig;
use transit_planner::graph::{InMemoryGraph, NodeId};
use transit_planner::search::{self, Itinerary};
use transit_planner::traversal::{NoSorting, SortsPositions, StationPositions, TraversalContext, TripServiceIndex};

const USAGE: &str = "usage: transit-planner <graph.json> <config.json> <start-node-id>";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("TRANSIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [graph_path, config_path, start] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let Ok(start) = start.parse::<u64>().map(NodeId) else {
        eprintln!("start node must be a numeric node id, got {start:?}");
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(graph_path, config_path, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(graph_path: &str, config_path: &str, start: NodeId) -> Result<(), Box<dyn std::error::Error>> {
    let graph = InMemoryGraph::from_json_file(graph_path)?;
    let config = PlannerConfig::from_json_file(config_path)?;
    info!(
        nodes = graph.node_count(),
        relationships = graph.relationship_count(),
        "loaded graph"
    );

    let trips = TripServiceIndex::from_nodes(graph.nodes());
    let sorter: Arc<dyn SortsPositions> = if config.station_positions.is_empty() {
        Arc::new(NoSorting)
    } else {
        Arc::new(StationPositions::new(config.station_positions))
    };
    let ctx = TraversalContext::new(config.traversal, Arc::new(graph), Arc::new(trips), sorter);

    let outcome = search::explore(&ctx, start, &config.search)?;
    info!(
        found = outcome.itineraries.len(),
        expanded = outcome.expanded,
        abandoned = outcome.abandoned,
        "search complete"
    );

    if outcome.itineraries.is_empty() {
        println!("No journeys found from node {start}");
    }
    for (idx, itinerary) in outcome.itineraries.iter().enumerate() {
        print_itinerary(idx + 1, itinerary);
    }
    Ok(())
}

fn print_itinerary(rank: usize, itinerary: &Itinerary) {
    let journey = &itinerary.journey;
    let path: Vec<String> = itinerary.nodes().iter().map(NodeId::to_string).collect();

    print!(
        "{rank}. {} min, {} boarding(s), arrive {}",
        itinerary.total_cost(),
        journey.boardings(),
        journey.journey_clock(itinerary.total_cost()).format("%H:%M"),
    );
    if let Some(boarded) = journey.boarding_time() {
        print!(", first boarding {}", boarded.format("%H:%M"));
    }
    println!();
    println!("   {}", path.join(" -> "));
}

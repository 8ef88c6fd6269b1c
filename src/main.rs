mod cli;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Command};
use otflow::config::OtflowConfig;
use otflow::fixture::ShopSnapshot;
use otflow::{
    Advance, Correlator, MemoryStore, Navigator, NoFurtherTransition, StatusCatalog,
    StatusStore, UtilizationBoard, WorkOrder, advance_stored, board_order, telemetry,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => OtflowConfig::load_from(path)?,
        None => OtflowConfig::load()?,
    };
    telemetry::init(&config, cli.verbose)?;

    match cli.command {
        Command::Stages => ui::print_catalog(),
        Command::Show { status, strict } => {
            let stage = if strict {
                StatusCatalog::stage_by_key(&status)?
            } else {
                Navigator::current_stage_info(&status)
            };
            ui::print_stage(stage);
        }
        Command::Next { status } => match Navigator::next_stage(&status) {
            Some(stage) => ui::print_stage(stage),
            None => {
                let reason = if StatusCatalog::stage_by_key(&status).is_ok() {
                    NoFurtherTransition::Terminal
                } else {
                    NoFurtherTransition::UnknownStatus
                };
                ui::print_no_transition(&status, reason);
            }
        },
        Command::Orders { file, search, all } => {
            let snapshot = ShopSnapshot::load(&file)?;
            let mut orders = filter_orders(snapshot.work_orders, search.as_deref());
            if !all {
                orders.retain(WorkOrder::is_active);
            }
            board_order(&mut orders);
            ui::print_orders(&orders);
        }
        Command::Board { file, search, json } => {
            let snapshot = ShopSnapshot::load(&file)?;
            info!(
                machines = snapshot.machines.len(),
                work_orders = snapshot.work_orders.len(),
                "Loaded shop snapshot"
            );
            let orders = filter_orders(snapshot.work_orders, search.as_deref());
            let board =
                UtilizationBoard::build(&snapshot.machines, &orders, config.board_options());
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                ui::print_board(&board);
            }
        }
        Command::Demo {
            ot_number,
            client,
            quantity,
        } => run_demo(ot_number, client, quantity)?,
    }

    Ok(())
}

/// Keeps the orders matching `search`; no term keeps them all.
fn filter_orders(orders: Vec<WorkOrder>, search: Option<&str>) -> Vec<WorkOrder> {
    let term = search.unwrap_or_default();
    orders
        .into_iter()
        .filter(|order| order.matches_search(term))
        .collect()
}

/// Walks a fresh order to completion through the compare-and-swap store.
fn run_demo(ot_number: String, client: String, quantity: u32) -> Result<()> {
    let store = MemoryStore::new();
    let order = WorkOrder::new(ot_number, client, quantity);
    let id = order.id.clone();
    let progress = ui::StageProgress::start(&order);
    store.insert(order);

    loop {
        let seen = store.load(&id)?.status;
        let result = advance_stored(&store, &id, &seen)?;
        match &result {
            Advance::Moved { to, .. } => {
                progress.step(to.stage(), &Correlator::categories_serving(*to));
            }
            Advance::Unchanged { reason, .. } => {
                info!(id = %result.order().id, %reason, "Demo walk finished");
                progress.complete(result.order());
                break;
            }
        }
    }

    Ok(())
}

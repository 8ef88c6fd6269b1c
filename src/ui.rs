//! Terminal output for otflow: colored stage badges, the utilization
//! board and a progress bar for the demo walk.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use otflow::{
    MachineCategory, Navigator, NoFurtherTransition, Stage, StageCategory, StatusCatalog,
    UtilizationBoard, WorkOrder,
    utilization::{MachineActivity, MachineRow},
};

/// Badge style for a stage category.
fn category_style(category: StageCategory) -> Style {
    match category {
        StageCategory::Gray => Style::new().dim(),
        StageCategory::Blue => Style::new().blue(),
        StageCategory::Purple => Style::new().magenta(),
        StageCategory::Orange => Style::new().color256(208),
        StageCategory::Indigo => Style::new().color256(63),
        StageCategory::Pink => Style::new().color256(205),
        StageCategory::Green => Style::new().green(),
        StageCategory::Teal => Style::new().cyan(),
        StageCategory::Yellow => Style::new().yellow(),
        StageCategory::Emerald => Style::new().green().bold(),
    }
}

/// Stage label in brackets, colored by category.
pub fn badge(stage: &Stage) -> String {
    category_style(stage.category)
        .apply_to(format!("[{}]", stage.label))
        .to_string()
}

/// Prints every stage with its order and key.
pub fn print_catalog() {
    for stage in StatusCatalog::all_stages() {
        println!("{:>3}  {:<22} {}", stage.order, stage.key.as_str(), badge(stage));
    }
}

pub fn print_stage(stage: &Stage) {
    println!("{} {}", stage.key.as_str(), badge(stage));
}

/// Explains why a status has no next stage.
pub fn print_no_transition(status: &str, reason: NoFurtherTransition) {
    let yellow = Style::new().yellow();
    println!("{} {status}: {reason}", yellow.apply_to("■"));
}

/// One line per order: number, client, priority, current and next stage.
pub fn print_orders(orders: &[WorkOrder]) {
    if orders.is_empty() {
        println!("{}", Style::new().dim().apply_to("No matching work orders."));
        return;
    }
    for order in orders {
        let next = match Navigator::next_stage(&order.status) {
            Some(stage) => format!("→ {}", stage.label),
            None if order.is_active() => "→ ?".to_string(),
            None => String::new(),
        };
        println!(
            "{:<12} {:<24} P{:<3} {} {}",
            order.ot_number,
            order.client_name,
            order.priority,
            badge(order.stage()),
            Style::new().dim().apply_to(next)
        );
    }
}

fn print_row(row: &MachineRow) {
    let label = row
        .category
        .parse::<MachineCategory>()
        .map(MachineCategory::label)
        .unwrap_or(row.category.as_str());
    let name = Style::new().bold().apply_to(&row.machine_name);
    match &row.activity {
        MachineActivity::Serving { orders } => {
            println!("{} {name} ({label})", Style::new().green().apply_to("●"));
            for order in orders {
                println!(
                    "    {:<12} {:<24} P{:<3} {}",
                    order.ot_number,
                    order.client_name,
                    order.priority,
                    badge(order.stage.stage())
                );
            }
        }
        MachineActivity::Idle => {
            println!("{} {name} ({label}) idle", Style::new().dim().apply_to("○"));
        }
        MachineActivity::Unavailable { status } => {
            println!("{} {name} ({label}) {status}", Style::new().red().apply_to("✗"));
        }
    }
}

/// Prints one block per machine row.
pub fn print_board(board: &UtilizationBoard) {
    if board.rows.is_empty() {
        println!("{}", Style::new().dim().apply_to("No machines to show."));
        return;
    }
    for row in &board.rows {
        print_row(row);
    }
}

/// Progress bar tracking an order across the catalog.
pub struct StageProgress {
    pb: ProgressBar,
    green: Style,
}

impl StageProgress {
    /// Starts the bar at the order's current stage.
    pub fn start(order: &WorkOrder) -> Self {
        let steps = StatusCatalog::all_stages().len().saturating_sub(1) as u64;
        let pb = ProgressBar::new(steps);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("{}: {}", order.ot_number, order.stage().label));

        Self {
            pb,
            green: Style::new().green().bold(),
        }
    }

    /// Records one advance and the machine categories now serving it.
    pub fn step(&self, stage: &Stage, serving: &[MachineCategory]) {
        let machines = if serving.is_empty() {
            "no machine".to_string()
        } else {
            serving
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        self.pb.println(format!("  → {} served by {machines}", badge(stage)));
        self.pb.set_message(stage.label);
        self.pb.inc(1);
    }

    /// Clears the bar and prints the final order as JSON.
    pub fn complete(&self, order: &WorkOrder) {
        self.pb.finish_and_clear();
        println!(
            "  {} {} completed",
            self.green.apply_to("✓"),
            order.ot_number
        );
        println!(
            "{}",
            serde_json::to_string_pretty(order).unwrap_or_default()
        );
    }
}

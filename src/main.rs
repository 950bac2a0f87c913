use anyhow::Result;
use std::env;

use ice_planner::SeedParams;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let params = if args.len() > 2 && args[1] == "config" {
        // Seed from a JSON config file
        SeedParams::from_file(&args[2])?
    } else if args.len() > 1 {
        // Any other argument is treated as a query string,
        // e.g. "iceCost=250&hours=40&numPlayers=12"
        SeedParams::from_query(&args[1])
    } else {
        SeedParams::default()
    };

    run_ui_mode(params)
}

#[cfg(feature = "tui")]
fn run_ui_mode(params: SeedParams) -> Result<()> {
    use ice_planner::ui;

    println!("🏒 Loading Ice Planner UI...\n");

    if !params.is_empty() {
        println!("🌱 Seeded overrides: {:?}\n", params);
    }

    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(&params)?;
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");
    println!(
        "   Final plan: total {} / per player {}",
        app.plan.total_display(),
        app.plan.cost_per_player_display()
    );

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_params: SeedParams) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin ice-server --features server");
    std::process::exit(1);
}

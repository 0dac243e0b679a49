use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cityroute;

#[derive(Parser)]
struct Cli {
    /// Name of the start city
    start_city: String,

    /// Name of the goal city
    goal_city: String,

    /// Path to the table of city coordinates (City:(lat,lon) lines)
    #[arg(long, default_value = "coordinates.txt")]
    coordinates: PathBuf,

    /// Path to the table of roads (City-Neighbor(distance),... lines)
    #[arg(long, default_value = "map.txt")]
    map: PathBuf,
}

pub fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    colog::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let g = cityroute::text::load_graph(&cli.coordinates, &cli.map)?;
    let route = cityroute::find_route(&g, &cli.start_city, &cli.goal_city)?;

    println!("From city: {}", cli.start_city);
    println!("To city: {}", cli.goal_city);

    if route.is_found() {
        println!(
            "Best Route: {} to {}: {}",
            cli.start_city,
            cli.goal_city,
            route.path.join(" -> ")
        );
        println!("Total distance: {:.2} miles", route.cost);
    } else {
        println!("No path found from {} to {}", cli.start_city, cli.goal_city);
    }

    Ok(())
}

//! Seeds a sample inventory file for poking at the front-ends by hand.

use anyhow::Result;
use clap::Parser;
use server::inventory::{next_id, CarFields, Store};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Where to write the inventory.
    #[arg(default_value = "inventory.json")]
    path: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let store = Store::open(&args.path)?;

    for fields in sample_cars() {
        let car = store.add(fields)?;
        println!("seeded {} {} {} as id {}", car.year, car.make, car.model, car.id);
    }

    println!(
        "{} cars in {}, next id {}",
        store.len(),
        args.path,
        next_id(&store.list())
    );

    Ok(())
}

fn sample_cars() -> Vec<CarFields> {
    vec![
        CarFields {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            price: 15000,
            mileage: 30000,
            color: "blue".to_string(),
        },
        CarFields {
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2019,
            price: 12500,
            mileage: 45000,
            color: "red".to_string(),
        },
        CarFields {
            make: "Hyundai".to_string(),
            model: "Tucson".to_string(),
            year: 2022,
            price: 24000,
            mileage: 8000,
            color: "white".to_string(),
        },
    ]
}

//! # Record Store
//!
//! The inventory is an ordered list of cars backed by a single JSON file.
//!
//! The whole list is loaded once when the store is opened and every mutation
//! rewrites the file in full. The store owns the only copy of the list and
//! serializes writers through one lock, so a mutation is load-mutate-save
//! from the caller's point of view.
//!
//! A missing file means an empty lot. A file that exists but does not parse
//! is surfaced as an error when the store is opened, not swallowed.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: u64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: i64,
    pub color: String,
}

/// Everything about a car except its id. The store assigns ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarFields {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: i64,
    pub color: String,
}

/// Next id to hand out: `1` on an empty lot, `max + 1` otherwise.
pub fn next_id(cars: &[Car]) -> u64 {
    cars.iter().map(|car| car.id).max().map_or(1, |max| max + 1)
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    cars: RwLock<Vec<Car>>,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let cars = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            cars: RwLock::new(cars),
        })
    }

    /// Snapshot of the lot in insertion order.
    pub fn list(&self) -> Vec<Car> {
        self.cars.read().expect("inventory lock poisoned").clone()
    }

    pub fn get(&self, id: u64) -> Option<Car> {
        self.cars
            .read()
            .expect("inventory lock poisoned")
            .iter()
            .find(|car| car.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.cars.read().expect("inventory lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a new car under a fresh id and flushes the file.
    pub fn add(&self, fields: CarFields) -> Result<Car, AppError> {
        let mut cars = self.cars.write().expect("inventory lock poisoned");

        let car = Car {
            id: next_id(&cars),
            make: fields.make,
            model: fields.model,
            year: fields.year,
            price: fields.price,
            mileage: fields.mileage,
            color: fields.color,
        };
        cars.push(car.clone());

        self.persist(&cars)?;
        Ok(car)
    }

    /// Replaces every mutable field of the car with the given id.
    pub fn update(&self, id: u64, fields: CarFields) -> Result<Car, AppError> {
        let mut cars = self.cars.write().expect("inventory lock poisoned");

        let updated = {
            let car = cars
                .iter_mut()
                .find(|car| car.id == id)
                .ok_or(AppError::NotFound(id))?;

            car.make = fields.make;
            car.model = fields.model;
            car.year = fields.year;
            car.price = fields.price;
            car.mileage = fields.mileage;
            car.color = fields.color;
            car.clone()
        };

        self.persist(&cars)?;
        Ok(updated)
    }

    /// Removes the car with the given id, keeping the order of the survivors.
    ///
    /// Removing an id that is not on the lot is a no-op: nothing changes,
    /// the file is not rewritten, and `false` comes back.
    pub fn remove(&self, id: u64) -> Result<bool, AppError> {
        let mut cars = self.cars.write().expect("inventory lock poisoned");

        let before = cars.len();
        cars.retain(|car| car.id != id);
        let removed = cars.len() < before;

        if removed {
            self.persist(&cars)?;
        }
        Ok(removed)
    }

    // Full-file overwrite, 4-space indent. The indent is cosmetic.
    fn persist(&self, cars: &[Car]) -> Result<(), AppError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        cars.serialize(&mut ser)?;

        fs::write(&self.path, buf)?;
        Ok(())
    }
}

//! # Validation Policy
//!
//! Raw form text comes in, a typed [`CarFields`] comes out, or a list of
//! user-facing messages and the write is rejected in full. Free-text fields
//! pass through verbatim.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::inventory::CarFields;

/// Raw form submission for an add or edit. All six fields arrive as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarForm {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub color: String,
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Numeric conversion first, then domain checks. A conversion failure
/// rejects on its own; domain violations are collected so one submission
/// can report several at once.
pub fn validate(form: &CarForm, current_year: i32) -> Result<CarFields, Vec<String>> {
    let (Ok(year), Ok(price), Ok(mileage)) = (
        form.year.trim().parse::<i32>(),
        form.price.trim().parse::<i64>(),
        form.mileage.trim().parse::<i64>(),
    ) else {
        return Err(vec![
            "Year, price, and mileage must be numeric.".to_string()
        ]);
    };

    let mut messages = Vec::new();
    if price < 0 || mileage < 0 {
        messages.push("Price and mileage cannot be negative.".to_string());
    }
    if year > current_year {
        messages.push(format!("Year cannot be greater than {current_year}."));
    }
    if !messages.is_empty() {
        return Err(messages);
    }

    Ok(CarFields {
        make: form.make.clone(),
        model: form.model.clone(),
        year,
        price,
        mileage,
        color: form.color.clone(),
    })
}

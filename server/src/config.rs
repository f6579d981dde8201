use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Which of the three front-ends this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Full CRUD surface, no login gate.
    Seller,
    /// Read-only browsing.
    Customer,
    /// Embeddable variant with the admin login gate.
    Gateway,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seller" => Ok(Self::Seller),
            "customer" => Ok(Self::Customer),
            "gateway" => Ok(Self::Gateway),
            other => Err(format!("unknown variant: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub variant: Variant,
    pub port: u16,
    pub inventory_file: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            variant: try_load("APP_VARIANT", "seller"),
            port: try_load("APP_PORT", "5000"),
            inventory_file: try_load("INVENTORY_FILE", "inventory.json"),
            admin_username: try_load("ADMIN_USERNAME", "admin"),
            admin_password: try_load("ADMIN_PASSWORD", "admin123"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::Variant;

    #[test]
    fn variant_parses_known_names() {
        assert_eq!("seller".parse(), Ok(Variant::Seller));
        assert_eq!("customer".parse(), Ok(Variant::Customer));
        assert_eq!("gateway".parse(), Ok(Variant::Gateway));
    }

    #[test]
    fn variant_rejects_unknown_names() {
        assert!("admin".parse::<Variant>().is_err());
        assert!("".parse::<Variant>().is_err());
    }
}

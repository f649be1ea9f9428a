use heapless::String;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;

use crate::nvs::NVStore;

const APS_KEY: &str = "known_aps";

/// Stored station credentials. Capacities match the esp-idf wifi
/// configuration limits.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ApConfig {
    pub ssid: String<32>,
    pub password: String<64>,
}

impl ApConfig {
    pub fn new(ssid: &str, password: &str) -> anyhow::Result<Self> {
        Ok(ApConfig {
            ssid: ssid
                .try_into()
                .map_err(|_| anyhow::anyhow!("SSID too long"))?,
            password: password
                .try_into()
                .map_err(|_| anyhow::anyhow!("Password too long"))?,
        })
    }
}

/// Known networks, persisted in NVS as a single ssid-keyed map
pub struct ApStore(());

impl ApStore {
    fn load() -> anyhow::Result<HashMap<std::string::String, ApConfig>> {
        Ok(NVStore::get(APS_KEY)?.unwrap_or_default())
    }

    pub fn get_aps() -> anyhow::Result<Vec<ApConfig>> {
        Ok(ApStore::load()?.into_values().collect())
    }

    pub fn get_ap(ssid: &str) -> anyhow::Result<Option<ApConfig>> {
        Ok(ApStore::load()?.get(ssid).cloned())
    }

    pub fn add_ap(ap: &ApConfig) -> anyhow::Result<()> {
        let mut aps = ApStore::load()?;
        aps.insert(ap.ssid.to_string(), ap.clone());
        NVStore::set(APS_KEY, &aps)
    }

    pub fn delete_ap(ssid: &str) -> anyhow::Result<()> {
        let mut aps = ApStore::load()?;
        aps.remove(ssid);
        NVStore::set(APS_KEY, &aps)
    }
}

use esp_idf_svc::nvs::{EspDefaultNvs, EspNvs, EspNvsPartition, NvsDefault};

use serde::de::DeserializeOwned;
use serde::Serialize;

use std::sync::Mutex;

static NV_STORE: Mutex<Option<EspNvs<NvsDefault>>> = Mutex::new(None);

const NV_STORE_MAX: usize = 2048; // Maximum size for serialised data

/// Namespaced NVS wrapper. Typed access serialises through serde_json;
/// the raw accessors back the /nvs debug endpoints.
pub struct NVStore(());

impl NVStore {
    pub fn init(nvs_partition: EspNvsPartition<NvsDefault>, namespace: &str) -> anyhow::Result<()> {
        let mut nvs = NV_STORE.lock().unwrap();
        *nvs = Some(EspDefaultNvs::new(nvs_partition, namespace, true)?);
        Ok(())
    }

    pub fn get<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match NVStore::get_raw(key)? {
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
            None => Ok(None),
        }
    }

    pub fn set<T>(key: &str, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        NVStore::set_raw(key, &serde_json::to_vec(value)?)
    }

    pub fn get_raw(key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let nvs = NV_STORE.lock().unwrap();
        let nvs = nvs
            .as_ref()
            .ok_or(anyhow::anyhow!("NV_STORE not initialized"))?;
        let mut buf = [0_u8; NV_STORE_MAX];
        Ok(nvs.get_raw(key, &mut buf)?.map(|data| data.to_vec()))
    }

    pub fn set_raw(key: &str, data: &[u8]) -> anyhow::Result<()> {
        let mut nvs = NV_STORE.lock().unwrap();
        let nvs = nvs
            .as_mut()
            .ok_or(anyhow::anyhow!("NV_STORE not initialized"))?;
        nvs.set_raw(key, data)
            .map_err(|e| anyhow::anyhow!("Error updating key {key}: [{e}]"))?;
        Ok(())
    }

    pub fn delete(key: &str) -> anyhow::Result<()> {
        let mut nvs = NV_STORE.lock().unwrap();
        let nvs = nvs
            .as_mut()
            .ok_or(anyhow::anyhow!("NV_STORE not initialized"))?;
        nvs.remove(key)
            .map_err(|e| anyhow::anyhow!("Error deleting key {key}: [{e}]"))?;
        Ok(())
    }
}

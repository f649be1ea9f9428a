use serde::{Deserialize, Serialize};

/// One-shot status message carried to the next page in a cookie and
/// rendered client-side by the navbar include.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct FlashMsg<'a> {
    pub level: &'a str,
    pub message: &'a str,
}

impl<'a> FlashMsg<'a> {
    pub fn cookie(level: &'a str, message: &'a str) -> anyhow::Result<String> {
        Ok(format!(
            "flash_msg={}; path=/",
            urlencoding::encode(&serde_json::to_string(&FlashMsg { level, message })?)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_url_safe() {
        let cookie = FlashMsg::cookie("success", "Saved network: home; maybe").unwrap();
        assert!(cookie.starts_with("flash_msg="));
        assert!(cookie.ends_with("; path=/"));
        // No separators allowed inside the value
        let value = &cookie["flash_msg=".len()..cookie.len() - "; path=/".len()];
        assert!(!value.contains(';'));
        assert!(!value.contains(' '));
    }

    #[test]
    fn cookie_round_trips() {
        let cookie = FlashMsg::cookie("error", "Unknown network: attic").unwrap();
        let value = &cookie["flash_msg=".len()..cookie.len() - "; path=/".len()];
        let decoded = urlencoding::decode(value).unwrap();
        let msg: FlashMsg = serde_json::from_str(&decoded).unwrap();
        assert_eq!(msg.level, "error");
        assert_eq!(msg.message, "Unknown network: attic");
    }
}

// Four-slot credential settings edited from the settings dialog.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CredentialId {
    Default,
    Api1,
    Api2,
    Api3,
}

impl CredentialId {
    pub const ALL: [CredentialId; 4] = [
        CredentialId::Default,
        CredentialId::Api1,
        CredentialId::Api2,
        CredentialId::Api3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CredentialId::Default => "default",
            CredentialId::Api1 => "api1",
            CredentialId::Api2 => "api2",
            CredentialId::Api3 => "api3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CredentialId::Default => "API Default",
            CredentialId::Api1 => "API 1",
            CredentialId::Api2 => "API 2",
            CredentialId::Api3 => "API 3",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub label: String,
    #[serde(rename = "key", default)]
    pub secret: String,
    #[serde(default)]
    pub enabled: bool,
}

impl Credential {
    fn blank(id: CredentialId) -> Credential {
        Credential {
            id,
            label: id.label().to_string(),
            secret: String::new(),
            enabled: false,
        }
    }
}

/// Always exactly the four well-known slots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialSettings {
    pub default: Credential,
    pub api1: Credential,
    pub api2: Credential,
    pub api3: Credential,
}

impl CredentialSettings {
    /// Start-of-process shape. The default slot carries the process key, which
    /// may be empty, and starts enabled.
    pub fn initial(process_key: &str) -> CredentialSettings {
        let mut default = Credential::blank(CredentialId::Default);
        default.secret = process_key.to_string();
        default.enabled = true;

        CredentialSettings {
            default,
            api1: Credential::blank(CredentialId::Api1),
            api2: Credential::blank(CredentialId::Api2),
            api3: Credential::blank(CredentialId::Api3),
        }
    }

    /// Rebuilds settings from a previously persisted value, tolerating missing
    /// slots, unknown slots, and partial entries.
    pub fn merge_saved(process_key: &str, saved: &Value) -> CredentialSettings {
        let mut merged = CredentialSettings::initial(process_key);

        let Some(map) = saved.as_object() else {
            warn!("Ignoring saved API settings: not an object");
            return merged;
        };

        for id in CredentialId::ALL {
            let Some(entry) = map.get(id.as_str()).and_then(Value::as_object) else {
                continue;
            };
            let slot = merged.get_mut(id);
            if let Some(label) = entry.get("label").and_then(Value::as_str) {
                slot.label = label.to_string();
            }
            if let Some(key) = entry.get("key").and_then(Value::as_str) {
                slot.secret = key.to_string();
            }
            if let Some(enabled) = entry.get("enabled").and_then(Value::as_bool) {
                slot.enabled = enabled;
            }
        }

        merged.pin_default_secret(process_key);
        merged
    }

    /// The default secret never comes from user input.
    pub fn pin_default_secret(&mut self, process_key: &str) {
        self.default.secret = process_key.to_string();
        self.default.id = CredentialId::Default;
        self.api1.id = CredentialId::Api1;
        self.api2.id = CredentialId::Api2;
        self.api3.id = CredentialId::Api3;
    }

    pub fn get(&self, id: CredentialId) -> &Credential {
        match id {
            CredentialId::Default => &self.default,
            CredentialId::Api1 => &self.api1,
            CredentialId::Api2 => &self.api2,
            CredentialId::Api3 => &self.api3,
        }
    }

    pub fn get_mut(&mut self, id: CredentialId) -> &mut Credential {
        match id {
            CredentialId::Default => &mut self.default,
            CredentialId::Api1 => &mut self.api1,
            CredentialId::Api2 => &mut self.api2,
            CredentialId::Api3 => &mut self.api3,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        CredentialId::ALL.into_iter().map(|id| self.get(id))
    }

    /// Secrets eligible for rotation, in slot order. The default slot is a
    /// master switch: when it is off nothing is active.
    pub fn active_secrets(&self) -> Vec<String> {
        if !self.default.enabled {
            return Vec::new();
        }
        self.iter()
            .filter(|c| c.enabled && !c.secret.is_empty())
            .map(|c| c.secret.clone())
            .collect()
    }

    /// Copy safe to hand back to a client: secrets reduced to a hint.
    pub fn masked(&self) -> CredentialSettings {
        let mut out = self.clone();
        for id in CredentialId::ALL {
            let slot = out.get_mut(id);
            slot.secret = mask(&slot.secret);
        }
        out
    }

    /// Restores real secrets for slots a client sent back still masked.
    pub fn unmask_from(&mut self, current: &CredentialSettings) {
        for id in CredentialId::ALL {
            let real = &current.get(id).secret;
            let slot = self.get_mut(id);
            if !real.is_empty() && slot.secret == mask(real) {
                slot.secret = real.clone();
            }
        }
    }
}

fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

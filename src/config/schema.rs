//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay
//! and the driver. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Remote API used when the operator leaves the base URL blank.
pub const DEFAULT_BASE_URL: &str = "https://zv9jw8m7vj.execute-api.us-east-1.amazonaws.com/prod";

/// Root configuration shared by `rx-relay` and `rx-console`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Invoke endpoint settings.
    pub relay: RelayConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Driver settings (where the relay lives, default remote).
    pub driver: DriverConfig,

    /// Demo step catalog, in display order.
    pub steps: Vec<StepConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            relay: RelayConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            driver: DriverConfig::default(),
            steps: default_steps(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Invoke endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Route the invoke handler is mounted on.
    pub invoke_path: String,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,

    /// Honor HTTP_PROXY / HTTPS_PROXY for outbound calls.
    pub use_env_proxy: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            invoke_path: "/api/invoke".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            use_env_proxy: true,
        }
    }
}

/// Timeout configuration for outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for the remote call. Unset means wait forever.
    pub upstream_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Full URL of the relay's invoke endpoint.
    pub relay_url: String,

    /// Remote base URL used when the operator input is blank.
    pub default_base_url: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:3000/api/invoke".to_string(),
            default_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// One demo step as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StepConfig {
    /// Identifier used by commands (e.g. "emit").
    pub key: String,

    /// Short ordinal label shown above the title.
    #[serde(default)]
    pub label: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// HTTP method shown in the log. The relay always POSTs.
    #[serde(default = "default_method")]
    pub method: String,

    /// Path appended to the base URL.
    pub path: String,

    /// Fixed example payload sent with the step.
    #[serde(default = "empty_object")]
    pub example_body: serde_json::Value,
}

fn default_method() -> String {
    "POST".to_string()
}

fn empty_object() -> serde_json::Value {
    json!({})
}

/// The four prescription-redemption demo steps.
pub fn default_steps() -> Vec<StepConfig> {
    vec![
        StepConfig {
            key: "emit".to_string(),
            label: "STEP 1".to_string(),
            title: "Emit prescription".to_string(),
            description: "Registers a prescription and the system confirms receipt.".to_string(),
            method: default_method(),
            path: "/prescriptions/emit".to_string(),
            example_body: json!({
                "doctorName": "Dr. Juan Perez",
                "doctorLicense": "MED-999",
                "patientName": "Maria Lopez",
                "patientIdentification": "0102030405",
                "issueDate": "2026-01-18T23:00:00Z",
                "items": [
                    {
                        "medicineName": "Amoxicilina",
                        "quantity": 2,
                        "dosage": "500mg cada 8h",
                        "notes": "Tomar con comida"
                    }
                ]
            }),
        },
        StepConfig {
            key: "search".to_string(),
            label: "STEP 2".to_string(),
            title: "Search pharmacies".to_string(),
            description: "Looks up available pharmacies (demo).".to_string(),
            method: default_method(),
            path: "/pharmacies/search".to_string(),
            example_body: json!({
                "request": {
                    "prescriptionCode": "RX-12345",
                    "userLocation": {
                        "latitude": -2.90055,
                        "longitude": -79.00453
                    },
                    "searchRadiusKM": 3
                }
            }),
        },
        StepConfig {
            key: "check".to_string(),
            label: "STEP 3".to_string(),
            title: "Check stock".to_string(),
            description: "Verifies medicine availability (demo).".to_string(),
            method: default_method(),
            path: "/stock/check".to_string(),
            example_body: json!({
                "request": {
                    "requestId": "REQ-001",
                    "items": [
                        { "medicineCode": "AMOX500", "quantityRequired": 2 },
                        { "medicineCode": "IBU400", "quantityRequired": 1 }
                    ]
                }
            }),
        },
        StepConfig {
            key: "redeem".to_string(),
            label: "STEP 4".to_string(),
            title: "Process redemption".to_string(),
            description: "Processes the dispensation (demo).".to_string(),
            method: default_method(),
            path: "/redemptions/process".to_string(),
            example_body: json!({
                "request": {
                    "transactionId": "tx-demo-001",
                    "prescriptionCode": "RX-12345",
                    "pharmacyId": "PHARM-01",
                    "items": [
                        { "medicineCode": "AMOX500", "quantity": 2 }
                    ]
                }
            }),
        },
    ]
}

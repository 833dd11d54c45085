use std::path::PathBuf;

/// Runtime settings, read from the environment with local-friendly defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let db_path =
            std::env::var("PATIENT_DB_PATH").unwrap_or_else(|_| "data/patients.json".to_string());

        Self {
            listen_addr,
            db_path: PathBuf::from(db_path),
        }
    }
}

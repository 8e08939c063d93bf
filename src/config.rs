use std::env;

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub key: String,
    pub total_days: u32,
    pub name: String,
}

impl ExperimentConfig {
    pub fn from_env() -> Self {
        let key = env::var("EXPERIMENT_KEY").unwrap_or_else(|_| "default-experiment".to_string());
        let total_days = env::var("TOTAL_DAYS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(30);
        let name = env::var("EXPERIMENT_NAME").unwrap_or_else(|_| "Habit Experiment".to_string());

        Self {
            key,
            total_days,
            name,
        }
    }
}

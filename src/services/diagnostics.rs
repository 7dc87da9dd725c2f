use crate::config::Config;
use crate::db::DocumentStore;
use serde::Serialize;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct RootInfo {
    pub message: &'static str,
}

pub fn root() -> RootInfo {
    RootInfo {
        message: "Racing UI Backend Ready",
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EnvironmentCheck {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn set_or_not(present: bool) -> String {
    let label = if present { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

/// Reports whether the store is reachable and which settings are present,
/// without revealing their values.
pub fn check_environment(store: Option<&dyn DocumentStore>, config: &Config) -> EnvironmentCheck {
    let mut report = EnvironmentCheck {
        backend: "✅ Running".into(),
        database: "❌ Not Available".into(),
        database_url: set_or_not(config.database_url.is_some()),
        database_name: set_or_not(config.database_name_set),
        connection_status: "Not Connected".into(),
        collections: Vec::new(),
    };

    let Some(store) = store else {
        report.database = "⚠️  Available but not initialized".into();
        return report;
    };

    report.database = "✅ Available".into();
    report.connection_status = "Connected".into();
    match store.list_collection_names() {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            report.collections = names;
            report.database = format!("✅ Connected & Working ({})", store.name());
        }
        Err(e) => {
            let msg: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
            report.database = format!("❌ Error: {}", msg);
        }
    }
    report
}

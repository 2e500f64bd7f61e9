use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub knowledge_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let project_root = discover_project_root();

        let knowledge_dir = env::var("HRDESK_KNOWLEDGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| project_root.join("knowledge_base"));

        let log_dir = env::var("HRDESK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| project_root.join("logs"));

        let _ = fs::create_dir_all(&log_dir);

        AppPaths {
            project_root,
            knowledge_dir,
            log_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_project_root() -> PathBuf {
    if let Ok(root) = env::var("HRDESK_ROOT") {
        return PathBuf::from(root);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("config.yml").exists() || manifest_dir.join("knowledge_base").exists() {
        return manifest_dir;
    }

    env::current_dir().unwrap_or(manifest_dir)
}

use std::path::PathBuf;

pub const USER_AGENT_ENV: &str = "MCP_WEB_BROWSING_USER_AGENT";
pub const WEATHER_BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";

pub fn load_env() {
    let _ = dotenvy::dotenv();

    if let Ok(mut exe_path) = std::env::current_exe() {
        exe_path.pop();
        let env_path: PathBuf = exe_path.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
    }
}

/// Non-empty value of an environment variable.
pub fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn user_agent_override() -> Option<String> {
    var(USER_AGENT_ENV)
}

pub fn weather_base_url_override() -> Option<String> {
    var(WEATHER_BASE_URL_ENV)
}

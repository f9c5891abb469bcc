use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Settings for `poll-scheduler web`
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub admin_password: String,
    /// Accepted votes are appended to `<data_dir>/<poll_id>_responses.csv`
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the port from `web <port>` (else `POLL_PORT`), the rest from the environment
    pub fn from_args_and_env(args: &[String]) -> Self {
        Self::from_lookup(args, |key| std::env::var(key).ok())
    }

    fn from_lookup<F>(args: &[String], lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .or_else(|| lookup("POLL_PORT").and_then(|p| p.parse::<u16>().ok()))
            .unwrap_or(DEFAULT_PORT);

        let admin_password = lookup("ADMIN_PASSWORD")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| {
                log::warn!("ADMIN_PASSWORD not set, using the development default");
                DEFAULT_ADMIN_PASSWORD.to_string()
            });

        let data_dir = lookup("POLL_DATA_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            port,
            admin_password,
            data_dir,
        }
    }

    pub fn responses_csv(&self, poll_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}_responses.csv", poll_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn config(list: &[&str], env: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = env.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(&args(list), |key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&["poll-scheduler", "web"], &[]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.admin_password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_port_argument_wins_over_env() {
        let cfg = config(&["poll-scheduler", "web", "9000"], &[("POLL_PORT", "7000")]);
        assert_eq!(cfg.port, 9000);

        let cfg = config(&["poll-scheduler", "web", "not-a-port"], &[("POLL_PORT", "7000")]);
        assert_eq!(cfg.port, 7000);
    }

    #[test]
    fn test_env_overrides() {
        let cfg = config(
            &["poll-scheduler", "web"],
            &[("ADMIN_PASSWORD", "s3cret"), ("POLL_DATA_DIR", "/var/polls")],
        );
        assert_eq!(cfg.admin_password, "s3cret");
        assert_eq!(cfg.responses_csv("team"), PathBuf::from("/var/polls/team_responses.csv"));
    }
}

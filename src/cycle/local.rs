use crate::models::cycle::ForecastCycle;
use crate::traits::CycleProvider;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves the current forecast cycle from a layer tree on disk.
///
/// The ETL pipeline writes each cycle under `<root>/<YYYY-MM-DDTHH>/` with one
/// subdirectory per forecast hour, then repoints the `<root>/current` symlink
/// at the newest complete cycle. The symlink target's name is the cycle start
/// hour; the number of entries inside it is the number of forecast steps.
pub struct LocalCycleProvider {
    root: PathBuf,
}

impl LocalCycleProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current_link(&self) -> PathBuf {
        self.root.join("current")
    }

    fn resolve(&self) -> Result<ForecastCycle, String> {
        let link = self.current_link();

        let meta = fs::symlink_metadata(&link)
            .map_err(|e| format!("no current cycle at {:?}: {}", link, e))?;
        if !meta.file_type().is_symlink() {
            return Err(format!("{:?} exists but is not a symbolic link", link));
        }

        let target = fs::read_link(&link).map_err(|e| format!("broken link {:?}: {}", link, e))?;
        let start_datetime = parse_cycle_name(&target)?;

        // Count forecast-step entries through the link. An unreadable target
        // means the link dangles.
        let num_forecasts = WalkDir::new(&link)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .count() as u32;
        if num_forecasts == 0 {
            return Err(format!("cycle directory {:?} is empty or unreadable", target));
        }

        Ok(ForecastCycle {
            start_datetime,
            num_forecasts,
        })
    }
}

/// Parse a cycle directory name (`YYYY-MM-DDTHH`) into its start timestamp.
fn parse_cycle_name(target: &Path) -> Result<chrono::DateTime<Utc>, String> {
    let name = target
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("unreadable cycle name in {:?}", target))?;

    NaiveDateTime::parse_from_str(&format!("{}:00:00", name), "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("cycle name '{}' is not YYYY-MM-DDTHH: {}", name, e))
}

#[async_trait]
impl CycleProvider for LocalCycleProvider {
    async fn current_cycle(&self) -> Result<ForecastCycle, String> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::os::unix::fs::symlink;
    use tempfile::tempdir;

    fn make_cycle_tree(root: &Path, name: &str, hours: &[&str]) {
        let cycle_dir = root.join(name);
        fs::create_dir_all(&cycle_dir).unwrap();
        for hour in hours {
            fs::create_dir(cycle_dir.join(hour)).unwrap();
        }
        symlink(&cycle_dir, root.join("current")).unwrap();
    }

    #[tokio::test]
    async fn test_resolves_cycle_from_symlink() {
        let dir = tempdir().unwrap();
        make_cycle_tree(dir.path(), "2024-01-01T06", &["0", "3", "6", "9"]);

        let provider = LocalCycleProvider::new(dir.path());
        let cycle = provider.current_cycle().await.unwrap();

        assert_eq!(
            cycle.start_datetime,
            Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap()
        );
        assert_eq!(cycle.num_forecasts, 4);
    }

    #[tokio::test]
    async fn test_missing_link_is_an_error() {
        let dir = tempdir().unwrap();
        let provider = LocalCycleProvider::new(dir.path());
        assert!(provider.current_cycle().await.is_err());
    }

    #[tokio::test]
    async fn test_plain_directory_is_not_a_cycle() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("current")).unwrap();

        let provider = LocalCycleProvider::new(dir.path());
        let err = provider.current_cycle().await.unwrap_err();
        assert!(err.contains("not a symbolic link"), "{}", err);
    }

    #[tokio::test]
    async fn test_dangling_link_is_an_error() {
        let dir = tempdir().unwrap();
        symlink(dir.path().join("2024-01-01T00"), dir.path().join("current")).unwrap();

        let provider = LocalCycleProvider::new(dir.path());
        assert!(provider.current_cycle().await.is_err());
    }

    #[tokio::test]
    async fn test_bad_cycle_name_is_an_error() {
        let dir = tempdir().unwrap();
        make_cycle_tree(dir.path(), "latest-run", &["0"]);

        let provider = LocalCycleProvider::new(dir.path());
        let err = provider.current_cycle().await.unwrap_err();
        assert!(err.contains("YYYY-MM-DDTHH"), "{}", err);
    }
}

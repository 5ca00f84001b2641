//! Game data files: locating them and loading mission step records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::program::{header_code, MissionProgram};

/// File name of the mission flight-path records.
pub const MISSION_STEPS_FILE: &str = "missSteps.json";

/// Category directories under the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Data,
    Audio,
    Image,
}

impl FileType {
    pub fn dir(self) -> &'static str {
        match self {
            Self::Data => "gamedata",
            Self::Audio => "audio",
            Self::Image => "images",
        }
    }
}

/// Resolves game files under a data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<category>/<name>`, without checking it exists.
    pub fn path_of(&self, name: &str, kind: FileType) -> PathBuf {
        self.root.join(kind.dir()).join(name)
    }

    /// Locate an existing file; a missing file is `ErrorKind::NotFound`.
    pub fn locate(&self, name: &str, kind: FileType) -> std::io::Result<PathBuf> {
        let path = self.path_of(name, kind);
        if path.is_file() {
            Ok(path)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        }
    }
}

/// All mission flight-path records, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionSteps {
    records: Vec<String>,
}

impl MissionSteps {
    pub fn new(records: Vec<String>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of record strings.
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `missSteps.json` from the data category.
    pub fn load(paths: &DataPaths) -> Result<Self, PathError> {
        let path = paths.locate(MISSION_STEPS_FILE, FileType::Data)?;
        let json = std::fs::read_to_string(&path)?;
        let steps = Self::from_json(&json)?;
        log::debug!(
            "Loaded {} mission step records from {}",
            steps.len(),
            path.display()
        );
        Ok(steps)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Mission codes in file order (records without a header are skipped).
    pub fn codes(&self) -> Vec<u8> {
        self.records.iter().filter_map(|r| header_code(r)).collect()
    }

    /// First record whose header matches `code`.
    pub fn record(&self, code: u8) -> Option<&str> {
        self.records
            .iter()
            .find(|r| header_code(r) == Some(code))
            .map(String::as_str)
    }

    /// Look up and parse the program for `code`.
    pub fn program(&self, code: u8) -> Result<MissionProgram, PathError> {
        let record = self.record(code).ok_or(PathError::MissionNotFound(code))?;
        MissionProgram::parse(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spacerace-data-{}-{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("gamedata")).unwrap();
        dir
    }

    #[test]
    fn test_lookup_first_match() {
        let steps = MissionSteps::new(vec![
            "01A0Z".into(),
            "02KZ".into(),
            "02LZ".into(),
        ]);
        assert_eq!(steps.record(2), Some("02KZ"));
        assert_eq!(steps.codes(), vec![1, 2, 2]);
    }

    #[test]
    fn test_missing_mission_is_an_error() {
        let steps = MissionSteps::new(vec!["01A0Z".into()]);
        assert!(matches!(steps.program(55), Err(PathError::MissionNotFound(55))));
    }

    #[test]
    fn test_from_json() {
        let steps = MissionSteps::from_json(r#"["01A0Z", "03NZ"]"#).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps.program(3).unwrap().steps.len(), 1);
        assert!(matches!(
            MissionSteps::from_json("{"),
            Err(PathError::Json(_))
        ));
    }

    #[test]
    fn test_path_layout() {
        let paths = DataPaths::new("/opt/game");
        assert_eq!(
            paths.path_of("usa_001.ogg", FileType::Audio),
            PathBuf::from("/opt/game/audio/usa_001.ogg")
        );
    }

    #[test]
    fn test_locate_missing_file() {
        let root = temp_root("missing");
        let err = DataPaths::new(&root)
            .locate("nope.json", FileType::Data)
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_load_from_disk() {
        let root = temp_root("load");
        std::fs::write(
            root.join("gamedata").join(MISSION_STEPS_FILE),
            r#"["07D01Z"]"#,
        )
        .unwrap();
        let steps = MissionSteps::load(&DataPaths::new(&root)).unwrap();
        assert_eq!(steps.codes(), vec![7]);
        std::fs::remove_dir_all(root).ok();
    }
}

use log::info;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 讀取資料夾清單時的錯誤
#[derive(Debug, Error)]
pub enum DirectoryListError {
    #[error("failed to read directory list {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no valid directories found in {}", path.display())]
    Empty { path: PathBuf },
}

/// 候選根目錄清單，讀入後不再變動且保證非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryList {
    directories: Vec<PathBuf>,
}

impl DirectoryList {
    /// 從文字檔讀取清單（每行一個路徑）
    pub fn load(path: &Path) -> Result<Self, DirectoryListError> {
        let content = fs::read_to_string(path).map_err(|source| DirectoryListError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::parse(&content).ok_or_else(|| DirectoryListError::Empty {
            path: path.to_path_buf(),
        })?;
        info!(
            "Loaded {} candidate directories from {}",
            list.len(),
            path.display()
        );
        Ok(list)
    }

    /// 解析清單內容，支援 LF 與 CRLF，去除空白與空行
    ///
    /// 結果為空時回傳 `None`
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        let directories: Vec<PathBuf> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();

        if directories.is_empty() {
            None
        } else {
            Some(Self { directories })
        }
    }

    /// 均勻隨機挑選一個根目錄
    pub fn choose<R>(&self, rng: &mut R) -> &Path
    where
        R: Rng + ?Sized,
    {
        &self.directories[rng.random_range(0..self.directories.len())]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.directories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mixed_line_endings() {
        let list = DirectoryList::parse("/media/a\r\n  /media/b  \n\n\r\n/media/c").unwrap();
        assert_eq!(
            list.as_slice(),
            &[
                PathBuf::from("/media/a"),
                PathBuf::from("/media/b"),
                PathBuf::from("/media/c"),
            ]
        );
    }

    #[test]
    fn test_parse_blank_content() {
        assert!(DirectoryList::parse("").is_none());
        assert!(DirectoryList::parse("  \n\r\n\t\n").is_none());
    }

    #[test]
    fn test_choose_returns_listed_entry() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let list = DirectoryList::parse("/a\n/b\n/c\n").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let picked = list.choose(&mut rng);
            assert!(list.as_slice().iter().any(|d| d == picked));
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = DirectoryList::load(&temp_dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, DirectoryListError::Read { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dirs.txt");
        fs::write(&path, "\n\n").unwrap();

        let err = DirectoryList::load(&path).unwrap_err();
        assert!(matches!(err, DirectoryListError::Empty { .. }));
    }

    #[test]
    fn test_load_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dirs.txt");
        fs::write(&path, "/b\n/a\n").unwrap();

        let list = DirectoryList::load(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[0], PathBuf::from("/b"));
    }
}

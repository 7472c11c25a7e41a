#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use album_selector::album::Album;
use album_selector::fs::{
    AlbumProps, AlbumPropsReader, Collaborators, DirEntryInfo, DirLister, FileStat, FileStatInfo,
};
use album_selector::selector::{AlbumListener, PageInfo};
use album_selector::Error;

/// Listener that keeps every notification it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub albums: Vec<Album>,
    pub pages: Vec<PageInfo>,
}

impl Recorder {
    pub fn names(&self) -> Vec<&str> {
        self.albums.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.albums.clear();
        self.pages.clear();
    }
}

impl AlbumListener for Recorder {
    fn on_album(&mut self, album: &Album) {
        self.albums.push(album.clone());
    }

    fn on_page_info(&mut self, info: PageInfo) {
        self.pages.push(info);
    }
}

/// In-memory folder tree with deterministic listing order and injectable failures.
#[derive(Debug, Default)]
pub struct MemFs {
    children: HashMap<PathBuf, Vec<DirEntryInfo>>,
    created: HashMap<PathBuf, SystemTime>,
    props: HashMap<PathBuf, AlbumProps>,
    broken_list: HashSet<PathBuf>,
    broken_stat: HashSet<PathBuf>,
}

impl MemFs {
    pub fn root(&mut self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        self.children.entry(path.clone()).or_default();
        path
    }

    pub fn dir(&mut self, parent: &Path, name: &str) -> PathBuf {
        let path = parent.join(name);
        self.push(parent, name, true);
        self.children.entry(path.clone()).or_default();
        path
    }

    pub fn file(&mut self, parent: &Path, name: &str) {
        self.push(parent, name, false);
    }

    /// A folder with `images` image files named `img0.jpg`, `img1.jpg`, ...
    pub fn album(&mut self, parent: &Path, name: &str, images: usize) -> PathBuf {
        let path = self.dir(parent, name);
        for i in 0..images {
            self.file(&path, &format!("img{i}.jpg"));
        }
        path
    }

    pub fn created_at(&mut self, path: &Path, secs: u64) {
        self.created
            .insert(path.to_path_buf(), UNIX_EPOCH + Duration::from_secs(secs));
    }

    pub fn cover(&mut self, folder: &Path, cover: &str) {
        self.props.insert(
            folder.to_path_buf(),
            AlbumProps {
                cover: Some(cover.to_string()),
            },
        );
    }

    pub fn break_listing(&mut self, path: &Path) {
        self.broken_list.insert(path.to_path_buf());
    }

    pub fn break_stat(&mut self, path: &Path) {
        self.broken_stat.insert(path.to_path_buf());
    }

    pub fn into_collaborators(self) -> Collaborators {
        let fs = Arc::new(self);
        Collaborators {
            lister: fs.clone(),
            stat: fs.clone(),
            props: fs,
        }
    }

    fn push(&mut self, parent: &Path, name: &str, is_dir: bool) {
        self.children
            .entry(parent.to_path_buf())
            .or_default()
            .push(DirEntryInfo {
                name: name.to_string(),
                path: parent.join(name),
                is_dir,
                is_file: !is_dir,
            });
    }
}

impl DirLister for MemFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        if self.broken_list.contains(dir) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.children
            .get(dir)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

impl FileStat for MemFs {
    fn stat(&self, path: &Path) -> io::Result<FileStatInfo> {
        if self.broken_stat.contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(FileStatInfo {
            is_file: !self.children.contains_key(path),
            created: self.created.get(path).copied().unwrap_or(UNIX_EPOCH),
        })
    }
}

impl AlbumPropsReader for MemFs {
    fn read_props(&self, folder: &Path) -> Result<Option<AlbumProps>, Error> {
        Ok(self.props.get(folder).cloned())
    }
}

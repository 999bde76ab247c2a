// Shared helpers for integration tests.
//
// Provides a temporary local-app-data directory laid out like a Creator
// Companion installation, plus in-process stand-ins for the network, the
// process table, and the host binary's version resource.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fvpr_installer::config::{InstallerConfig, Mode};
use fvpr_installer::console::{Key, Prompt, ScriptedKeys};
use fvpr_installer::error::InstallerError;
use fvpr_installer::exec::{ExecResult, Executor};
use fvpr_installer::logging::Logger;
use fvpr_installer::platform::{Os, Platform};
use fvpr_installer::resources::{Downloader, VersionProbe};
use fvpr_installer::tasks::Context;

/// Executor for a machine where the host application is never running.
///
/// Every command succeeds with empty output and is recorded.
#[derive(Debug, Default)]
pub struct IdleExecutor {
    pub calls: Mutex<Vec<String>>,
}

impl Executor for IdleExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.run_unchecked(program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.calls
            .lock()
            .expect("calls poisoned")
            .push(format!("{program} {}", args.join(" ")));
        Ok(ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }

    fn which(&self, _: &str) -> bool {
        true
    }
}

/// Serves fixed bodies for known URLs and fails for everything else.
#[derive(Debug, Default)]
pub struct FakeDownloader {
    bodies: HashMap<String, Vec<u8>>,
    pub requests: Mutex<Vec<String>>,
    pub destinations: Mutex<Vec<PathBuf>>,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests poisoned").clone()
    }

    /// Paths each request was asked to write to, in request order.
    pub fn destinations(&self) -> Vec<PathBuf> {
        self.destinations
            .lock()
            .expect("destinations poisoned")
            .clone()
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<(), InstallerError> {
        self.requests
            .lock()
            .expect("requests poisoned")
            .push(url.to_string());
        self.destinations
            .lock()
            .expect("destinations poisoned")
            .push(dest.to_path_buf());
        let Some(body) = self.bodies.get(url) else {
            return Err(InstallerError::Download {
                url: url.to_string(),
                source: "http status: 404".into(),
            });
        };
        std::fs::write(dest, body).map_err(|e| InstallerError::Download {
            url: url.to_string(),
            source: e.into(),
        })
    }
}

/// Reports a fixed file version and counts probes.
#[derive(Debug, Default)]
pub struct FixedVersion {
    version: Option<String>,
    pub probes: Mutex<usize>,
}

impl FixedVersion {
    pub fn new(version: Option<&str>) -> Self {
        Self {
            version: version.map(ToString::to_string),
            probes: Mutex::new(0),
        }
    }

    pub fn probes(&self) -> usize {
        *self.probes.lock().expect("probes poisoned")
    }
}

impl VersionProbe for FixedVersion {
    fn file_version(&self, _: &Path) -> Option<String> {
        *self.probes.lock().expect("probes poisoned") += 1;
        self.version.clone()
    }
}

/// Build an in-memory zip archive from `(name, contents)` pairs.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(contents.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

/// Prompt answering with `keys` in order and capturing its output.
pub fn scripted(keys: &[Key]) -> Prompt<ScriptedKeys, Vec<u8>> {
    Prompt::new(ScriptedKeys::new(keys.iter().copied()), Vec::new())
}

/// Keys left over and text written by a finished prompt.
pub fn finish(prompt: Prompt<ScriptedKeys, Vec<u8>>) -> (usize, String) {
    let (keys, out) = prompt.into_parts();
    (
        keys.remaining(),
        String::from_utf8(out).expect("prompt output is UTF-8"),
    )
}

/// An isolated local-app-data directory backed by a [`tempfile::TempDir`].
pub struct HostFixture {
    pub root: tempfile::TempDir,
}

impl HostFixture {
    /// Empty local-app-data directory: the host has never been run.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Local-app-data directory with `settings.json` containing `content`.
    pub fn with_settings(content: &str) -> Self {
        let fixture = Self::new();
        fixture.write_settings(content);
        fixture
    }

    pub fn local_app_data(&self) -> &Path {
        self.root.path()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root
            .path()
            .join("VRChatCreatorCompanion")
            .join("settings.json")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.root
            .path()
            .join("Programs")
            .join("VRChatCreatorCompanion")
    }

    pub fn write_settings(&self, content: &str) {
        let path = self.settings_path();
        std::fs::create_dir_all(path.parent().expect("settings parent"))
            .expect("create settings dir");
        std::fs::write(path, content).expect("write settings");
    }

    pub fn read_settings(&self) -> String {
        std::fs::read_to_string(self.settings_path()).expect("read settings")
    }

    pub fn settings_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_settings()).expect("settings are JSON")
    }

    /// Create the host executable so the patch step can find it.
    pub fn install_host_binary(&self) {
        let dir = self.install_dir();
        std::fs::create_dir_all(&dir).expect("create install dir");
        std::fs::write(dir.join("CreatorCompanion.exe"), "MZ").expect("write host binary");
    }

    /// Context for `mode` on `os` with the given collaborators.  Uses the
    /// real filesystem and zip extractor.
    pub fn context(
        &self,
        mode: Mode,
        os: Os,
        downloader: Arc<FakeDownloader>,
        versions: Arc<FixedVersion>,
    ) -> Context {
        Context::new(
            InstallerConfig::new(mode, self.local_app_data()),
            Platform::new(os),
            Logger::silent(),
        )
        .with_executor(Arc::new(IdleExecutor::default()))
        .with_downloader(downloader)
        .with_versions(versions)
    }

    /// Context for `mode` with no host executable, so the patch step stops early.
    pub fn toggle_context(&self, mode: Mode) -> Context {
        self.context(
            mode,
            Os::Windows,
            Arc::new(FakeDownloader::new()),
            Arc::new(FixedVersion::new(None)),
        )
    }
}

//! Common test utilities for rnpm integration tests

use std::path::PathBuf;

use tempfile::TempDir;

/// A disposable directory tree for integration tests
#[allow(dead_code)]
pub struct TestTree {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to tree root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a package directory with a manifest at a relative path
    pub fn add_package(&self, rel: &str) -> PathBuf {
        let dir = self.path.join(rel);
        std::fs::create_dir_all(&dir).expect("Failed to create package directory");
        std::fs::write(
            dir.join("package.json"),
            r#"{ "name": "fixture", "version": "1.0.0" }"#,
        )
        .expect("Failed to write manifest");
        dir
    }

    /// Drop a marker file the fake installer reacts to (".fail", ".slow")
    pub fn add_marker(&self, rel: &str, marker: &str) {
        std::fs::write(self.path.join(rel).join(marker), "")
            .expect("Failed to write marker file");
    }

    /// Whether the installer materialized dependencies at a relative path
    pub fn has_node_modules(&self, rel: &str) -> bool {
        self.path.join(rel).join("node_modules").is_dir()
    }

    /// Whether the dev-dependency stand-in was materialized at a relative path
    pub fn has_dev_dependency(&self, rel: &str) -> bool {
        self.path
            .join(rel)
            .join("node_modules")
            .join("right-pad")
            .is_dir()
    }

    /// Arguments the fake installer recorded at a relative path
    pub fn recorded_args(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path.join(rel).join(".installer-args"))
            .expect("Installer never ran here")
            .trim()
            .to_string()
    }

    /// Write the fake installer script standing in for npm
    ///
    /// It materializes node_modules/left-pad always and node_modules/right-pad
    /// (the dev-dependency stand-in) unless --production was passed. Marker
    /// files in the working directory script failures: ".fail" exits non-zero,
    /// ".slow" hangs until killed.
    #[cfg(unix)]
    pub fn fake_installer(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path.join("fake-npm.sh");
        std::fs::write(
            &script,
            concat!(
                "#!/bin/sh\n",
                "if [ -f .fail ]; then\n",
                "  echo \"npm ERR! install failed\" >&2\n",
                "  exit 1\n",
                "fi\n",
                "if [ -f .slow ]; then\n",
                "  sleep 30\n",
                "fi\n",
                "printf '%s\\n' \"$*\" > .installer-args\n",
                "mkdir -p node_modules/left-pad\n",
                "case \" $* \" in\n",
                "  *\" --production \"*) : ;;\n",
                "  *) mkdir -p node_modules/right-pad ;;\n",
                "esac\n",
                "exit 0\n",
            ),
        )
        .expect("Failed to write fake installer");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake installer");
        script
    }
}

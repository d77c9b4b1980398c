//! Integration tests for PyPy 3 source enumeration against fake installations.

use isoenv_core::{
    InterpreterDescriptor, InterpreterVersion, PathMapping, PlatformFamily, ResolverConfig,
    Result, Target,
};
use isoenv_pypy::PyPy3Layout;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fake PyPy installation rooted in a temp directory.
struct FakeInstall {
    _temp: TempDir,
    prefix: PathBuf,
}

impl FakeInstall {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let prefix = temp.path().join("opt").join("pypy");
        fs::create_dir_all(prefix.join("bin")).unwrap();
        Self {
            _temp: temp,
            prefix,
        }
    }

    fn file(&self, relative: &str) -> &Self {
        let path = self.prefix.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
        self
    }

    fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.prefix.join(relative)).unwrap();
        self
    }

    fn posix(&self, minor: u32) -> InterpreterDescriptor {
        InterpreterDescriptor::new(
            InterpreterVersion::new(3, minor, 0),
            PlatformFamily::Posix,
            &self.prefix,
            self.prefix.join("lib").join(format!("pypy3.{minor}")),
            self.prefix.join("bin").join("pypy3"),
        )
    }

    fn windows(&self, minor: u32) -> InterpreterDescriptor {
        InterpreterDescriptor::new(
            InterpreterVersion::new(3, minor, 0),
            PlatformFamily::Windows,
            &self.prefix,
            self.prefix.join("Lib"),
            self.prefix.join("pypy3.exe"),
        )
    }
}

fn collect(layout: &PyPy3Layout, descriptor: &InterpreterDescriptor) -> Vec<PathMapping> {
    layout
        .sources(descriptor)
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap()
}

fn library_names(mappings: &[PathMapping]) -> Vec<String> {
    let mut names: Vec<String> = mappings
        .iter()
        .filter(|m| m.target == Target::Library)
        .filter_map(|m| m.source.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Library entries whose source sits directly in `<prefix>/lib`.
fn scan_entries<'a>(mappings: &'a [PathMapping], prefix: &Path) -> Vec<&'a PathMapping> {
    let host_lib = prefix.join("lib");
    mappings
        .iter()
        .filter(|m| m.target == Target::Library && m.source.parent() == Some(host_lib.as_path()))
        .collect()
}

#[test]
fn test_portable_scan_skips_stdlib() {
    let install = FakeInstall::new();
    install
        .file("bin/pypy3")
        .dir("lib/pypy3.9")
        .dir("lib/tcl8.6");
    let descriptor = install.posix(9);
    let layout = PyPy3Layout::new();

    let mappings = collect(&layout, &descriptor);
    let scanned = scan_entries(&mappings, &install.prefix);

    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].source, install.prefix.join("lib").join("tcl8.6"));

    let dest = Path::new("/envs/demo");
    let dirs = layout.env_dirs(&descriptor, dest).unwrap();
    assert_eq!(scanned[0].destination(&dirs), dest.join("lib").join("tcl8.6"));
    assert!(
        mappings
            .iter()
            .all(|m| m.source != descriptor.system_stdlib)
    );
}

#[test]
fn test_every_other_child_included_once() {
    let install = FakeInstall::new();
    install
        .file("bin/pypy3")
        .dir("lib/pypy3.10")
        .dir("lib/tcl8.6")
        .dir("lib/tk8.6")
        .file("lib/libtcl8.6.so")
        .file("lib/libgdbm.so.4");
    let descriptor = install.posix(10);

    let mappings = collect(&PyPy3Layout::new(), &descriptor);
    let mut scanned: Vec<String> = scan_entries(&mappings, &install.prefix)
        .iter()
        .filter_map(|m| m.source.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    scanned.sort();

    assert_eq!(
        scanned,
        vec!["libgdbm.so.4", "libtcl8.6.so", "tcl8.6", "tk8.6"]
    );
}

#[test]
fn test_system_prefix_skips_scan() {
    let install = FakeInstall::new();
    install
        .file("bin/pypy3")
        .file("bin/libpypy3-c.so")
        .dir("lib/pypy3.9")
        .dir("lib/tcl8.6");
    let descriptor = install.posix(9);
    let config = ResolverConfig {
        system_prefix: install.prefix.clone(),
        ..ResolverConfig::default()
    };
    let layout = PyPy3Layout::new().with_config(config);

    let mappings = collect(&layout, &descriptor);

    assert!(scan_entries(&mappings, &install.prefix).is_empty());
    assert_eq!(library_names(&mappings), vec!["libpypy3-c.so"]);
}

#[cfg(unix)]
#[test]
fn test_default_system_prefix_skips_scan() {
    let layout = PyPy3Layout::new();
    let host_lib = Path::new("/usr/lib");

    for prefix in ["/usr", "/usr/"] {
        let descriptor = InterpreterDescriptor::new(
            InterpreterVersion::new(3, 9, 18),
            PlatformFamily::Posix,
            prefix,
            "/usr/lib/pypy3.9",
            "/usr/bin/pypy3",
        );

        let mappings = collect(&layout, &descriptor);

        assert!(
            mappings.iter().all(|m| m.source.parent() != Some(host_lib)),
            "prefix {prefix} must not scan /usr/lib"
        );
    }
}

#[test]
fn test_missing_lib_dir_contributes_nothing() {
    let install = FakeInstall::new();
    install.file("bin/pypy3").file("bin/libpypy3-c.so");
    let descriptor = install.posix(9);

    let mappings = collect(&PyPy3Layout::new(), &descriptor);

    assert_eq!(library_names(&mappings), vec!["libpypy3-c.so"]);
}

#[test]
fn test_posix_shared_libs_flatten_into_lib() {
    let install = FakeInstall::new();
    install
        .file("bin/pypy3")
        .file("bin/libpypy3-c.so")
        .file("bin/libpypy3.9-c.so")
        .file("bin/libffi.so.8");
    let descriptor = install.posix(9);
    let layout = PyPy3Layout::new();
    let dest = Path::new("/envs/demo");
    let dirs = layout.env_dirs(&descriptor, dest).unwrap();

    let mappings = collect(&layout, &descriptor);
    let mut destinations: Vec<PathBuf> = mappings
        .iter()
        .filter(|m| m.target == Target::Library)
        .map(|m| m.destination(&dirs))
        .collect();
    destinations.sort();

    assert_eq!(
        destinations,
        vec![
            dest.join("lib").join("libpypy3-c.so"),
            dest.join("lib").join("libpypy3.9-c.so"),
        ]
    );
}

#[test]
fn test_order_base_then_shared_then_scan() {
    let install = FakeInstall::new();
    install
        .file("bin/pypy3")
        .file("bin/libpypy3-c.so")
        .dir("lib/tcl8.6");
    let descriptor = install.posix(9);
    let layout = PyPy3Layout::new();

    let mappings = collect(&layout, &descriptor);
    let base_count = layout.exe_names(&descriptor).len();

    assert_eq!(mappings.len(), base_count + 2);
    assert!(
        mappings[..base_count]
            .iter()
            .all(|m| matches!(m.target, Target::Executable(_)))
    );
    assert!(mappings[base_count].source.ends_with("libpypy3-c.so"));
    assert_eq!(
        mappings[base_count + 1].source,
        install.prefix.join("lib").join("tcl8.6")
    );
}

#[test]
fn test_windows_layout() {
    let install = FakeInstall::new();
    install
        .file("pypy3.exe")
        .file("libpypy3-c.dll")
        .file("libffi-8.dll")
        .file("python3.dll")
        .dir("lib/tcl8.6");
    let descriptor = install.windows(9);
    let layout = PyPy3Layout::new();
    let dest = Path::new("/envs/demo");

    let mappings = collect(&layout, &descriptor);

    // No portable scan on Windows, even with a populated lib directory
    assert_eq!(
        library_names(&mappings),
        vec!["libffi-8.dll", "libpypy3-c.dll"]
    );
    assert!(
        mappings
            .iter()
            .any(|m| m.target == Target::Executable("pypy3.exe".to_string()))
    );

    let dirs = layout.env_dirs(&descriptor, dest).unwrap();
    assert_eq!(dirs.bin_dir, dest.join("Scripts"));
    assert_eq!(dirs.site_packages, dest.join("Lib").join("site-packages"));
}

#[test]
fn test_windows_legacy_stdlib() {
    let install = FakeInstall::new();
    let layout = PyPy3Layout::new();
    let dest = Path::new("/envs/demo");

    assert_eq!(
        layout.stdlib(&install.windows(6), dest).unwrap(),
        dest.join("site-packages")
    );
    assert_eq!(
        layout.stdlib(&install.windows(9), dest).unwrap(),
        dest.join("Lib").join("site-packages")
    );
}

#[test]
fn test_sources_idempotent() {
    let install = FakeInstall::new();
    install
        .file("bin/pypy3")
        .file("bin/libpypy3-c.so")
        .dir("lib/pypy3.9")
        .dir("lib/tcl8.6")
        .dir("lib/tk8.6");
    let descriptor = install.posix(9);
    let layout = PyPy3Layout::new();

    let mut first = collect(&layout, &descriptor);
    let mut second = collect(&layout, &descriptor);
    first.sort();
    second.sort();

    assert_eq!(first, second);
}

#[test]
fn test_descriptor_from_json_drives_resolution() {
    let install = FakeInstall::new();
    install.file("bin/pypy3").dir("lib/pypy3.9").dir("lib/tcl8.6");
    let json = format!(
        r#"{{
            "version": "3.9.18",
            "platform": "posix",
            "systemPrefix": {prefix:?},
            "systemStdlib": {stdlib:?},
            "systemExecutable": {exe:?}
        }}"#,
        prefix = install.prefix.to_string_lossy(),
        stdlib = install.prefix.join("lib/pypy3.9").to_string_lossy(),
        exe = install.prefix.join("bin/pypy3").to_string_lossy(),
    );
    let descriptor = InterpreterDescriptor::from_json(&json).unwrap();

    let mappings = collect(&PyPy3Layout::new(), &descriptor);

    assert_eq!(scan_entries(&mappings, &install.prefix).len(), 1);
}

//! Default file selection when a spec names no file

use docli_registry::VersionAssets;

/// Reads one candidate entry point from a version's metadata
pub type AssetField = fn(&VersionAssets) -> Option<&str>;

/// Candidate fields in priority order: CDN-optimized bundle, alternate CDN
/// bundle, ES module entry, generic main entry.
pub const DEFAULT_FILE_FIELDS: &[(&str, AssetField)] = &[
    ("jsdelivr", jsdelivr),
    ("unpkg", unpkg),
    ("module", module),
    ("main", main),
];

/// First populated candidate as `(field, file)`
pub fn default_file(assets: &VersionAssets) -> Option<(&'static str, &str)> {
    DEFAULT_FILE_FIELDS.iter().find_map(|(field, read)| {
        read(assets)
            .filter(|file| !file.is_empty())
            .map(|file| (*field, file))
    })
}

fn jsdelivr(assets: &VersionAssets) -> Option<&str> {
    assets.jsdelivr.as_deref()
}

fn unpkg(assets: &VersionAssets) -> Option<&str> {
    assets.unpkg.as_deref()
}

fn module(assets: &VersionAssets) -> Option<&str> {
    assets.module.as_deref()
}

fn main(assets: &VersionAssets) -> Option<&str> {
    assets.main.as_deref()
}

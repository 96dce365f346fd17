//! Component selection and the source location table
//!
//! A selection is a per-operation set of toggles choosing which
//! configuration categories participate in a capture or apply. It is pure
//! configuration, never persisted. Capture and Apply both iterate the same
//! table produced by [`source_locations`], so a profile round-trips exactly
//! when the same selection is used on both sides.

use std::path::PathBuf;

use crate::config::ProfilePaths;

/// Toggles choosing which categories participate in a capture/apply
///
/// The two core configuration directories are always included and have no
/// toggle. `local_share` selects the `~/.local/share` variants of each
/// category independently of the home-dotdir variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSelection {
    /// Include theme directories
    pub themes: bool,
    /// Include icon directories
    pub icons: bool,
    /// Include font directories
    pub fonts: bool,
    /// Include the dconf settings dump
    pub dconf: bool,
    /// Include the `~/.local/share` variants of enabled categories
    pub local_share: bool,
}

impl Default for ComponentSelection {
    fn default() -> Self {
        Self {
            themes: true,
            icons: true,
            fonts: true,
            dconf: true,
            local_share: true,
        }
    }
}

/// One row of the capture/apply source location table
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Archive subdirectory name for this location
    pub key: &'static str,
    /// Live path of this location under the user's home
    pub live_path: PathBuf,
    /// Whether the selection enables this location
    pub enabled: bool,
    /// Whether apply empties this location before restoring
    pub wipe_on_apply: bool,
}

/// Resolve a selection against the configured paths into the location table
///
/// Row order is fixed; the core configuration directories come first and are
/// always enabled.
pub fn source_locations(
    paths: &ProfilePaths,
    selection: &ComponentSelection,
) -> Vec<SourceLocation> {
    let row = |key, live_path, enabled, wipe_on_apply| SourceLocation {
        key,
        live_path,
        enabled,
        wipe_on_apply,
    };

    vec![
        row("cinnamon-config", paths.cinnamon_config_dir(), true, true),
        row("gtk-config", paths.gtk_config_dir(), true, true),
        row("themes", paths.themes_dir(), selection.themes, false),
        row("icons", paths.icons_dir(), selection.icons, false),
        row("fonts", paths.fonts_dir(), selection.fonts, false),
        row(
            "themes-local",
            paths.local_themes_dir(),
            selection.themes && selection.local_share,
            false,
        ),
        row(
            "icons-local",
            paths.local_icons_dir(),
            selection.icons && selection.local_share,
            false,
        ),
        row(
            "fonts-local",
            paths.local_fonts_dir(),
            selection.fonts && selection.local_share,
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_paths() -> ProfilePaths {
        ProfilePaths::with_base_dirs(PathBuf::from("/tmp/root"), PathBuf::from("/tmp/home"))
    }

    #[test]
    fn test_core_locations_always_enabled() {
        let paths = test_paths();
        let selection = ComponentSelection {
            themes: false,
            icons: false,
            fonts: false,
            dconf: false,
            local_share: false,
        };

        let locations = source_locations(&paths, &selection);
        let enabled: Vec<_> = locations.iter().filter(|l| l.enabled).collect();

        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled[0].key, "cinnamon-config");
        assert_eq!(enabled[1].key, "gtk-config");
        assert!(enabled.iter().all(|l| l.wipe_on_apply));
    }

    #[test]
    fn test_full_selection_enables_all_rows() {
        let paths = test_paths();
        let locations = source_locations(&paths, &ComponentSelection::default());

        assert_eq!(locations.len(), 8);
        assert!(locations.iter().all(|l| l.enabled));
        assert_eq!(
            locations.iter().filter(|l| l.wipe_on_apply).count(),
            2,
            "only the core config dirs are wiped"
        );
    }

    #[test]
    fn test_local_share_toggles_independently() {
        let paths = test_paths();
        let selection = ComponentSelection {
            local_share: false,
            ..ComponentSelection::default()
        };

        let locations = source_locations(&paths, &selection);
        let by_key = |key: &str| locations.iter().find(|l| l.key == key).unwrap();

        assert!(by_key("themes").enabled);
        assert!(!by_key("themes-local").enabled);
        assert!(by_key("fonts").enabled);
        assert!(!by_key("fonts-local").enabled);
    }

    #[test]
    fn test_disabled_category_disables_both_variants() {
        let paths = test_paths();
        let selection = ComponentSelection {
            icons: false,
            ..ComponentSelection::default()
        };

        let locations = source_locations(&paths, &selection);
        let by_key = |key: &str| locations.iter().find(|l| l.key == key).unwrap();

        assert!(!by_key("icons").enabled);
        assert!(!by_key("icons-local").enabled);
    }

    #[test]
    fn test_live_paths_resolve_under_home() {
        let paths = test_paths();
        let locations = source_locations(&paths, &ComponentSelection::default());
        let by_key = |key: &str| locations.iter().find(|l| l.key == key).unwrap();

        assert_eq!(
            by_key("cinnamon-config").live_path,
            Path::new("/tmp/home/.config/cinnamon")
        );
        assert_eq!(
            by_key("themes-local").live_path,
            Path::new("/tmp/home/.local/share/themes")
        );
    }
}

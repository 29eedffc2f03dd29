//! The built-in preference profile.
//!
//! The one canonical declaration set this tool converges a workstation to:
//! interface, fonts, input, window-manager, and shell settings, in the
//! order they are reported. Extension schemas (dash-to-dock) are declared
//! unconditionally - on systems without the extension they reconcile as
//! skips, not failures.

use reconcile::Declaration;

/// Desktop-entry ids pinned to the dash, in order.
pub const DOCK_FAVORITES: [&str; 4] = [
    "firefox.desktop",
    "kitty.desktop",
    "org.gnome.Nautilus.desktop",
    "code.desktop",
];

/// Build the canonical declaration set.
pub fn declarations() -> Vec<Declaration> {
    vec![
        // Interface
        Declaration::set("org.gnome.desktop.interface", "color-scheme", "prefer-dark"),
        Declaration::set("org.gnome.desktop.interface", "gtk-theme", "Adwaita-dark"),
        Declaration::set("org.gnome.desktop.interface", "icon-theme", "Papirus-Dark"),
        Declaration::set("org.gnome.desktop.interface", "accent-color", "teal"),
        Declaration::set("org.gnome.desktop.interface", "clock-show-weekday", true),
        Declaration::set("org.gnome.desktop.interface", "clock-show-seconds", false),
        Declaration::set(
            "org.gnome.desktop.interface",
            "show-battery-percentage",
            true,
        ),
        Declaration::set("org.gnome.desktop.interface", "enable-hot-corners", false),
        // Fonts
        Declaration::set("org.gnome.desktop.interface", "font-name", "Inter 11"),
        Declaration::set("org.gnome.desktop.interface", "document-font-name", "Inter 11"),
        Declaration::set(
            "org.gnome.desktop.interface",
            "monospace-font-name",
            "JetBrainsMono Nerd Font 11",
        ),
        Declaration::set("org.gnome.desktop.interface", "font-antialiasing", "rgba"),
        Declaration::set("org.gnome.desktop.interface", "font-hinting", "slight"),
        Declaration::set(
            "org.gnome.desktop.wm.preferences",
            "titlebar-font",
            "Inter Bold 11",
        ),
        // Input
        Declaration::set(
            "org.gnome.desktop.peripherals.touchpad",
            "tap-to-click",
            true,
        ),
        Declaration::set(
            "org.gnome.desktop.peripherals.touchpad",
            "natural-scroll",
            true,
        ),
        Declaration::set(
            "org.gnome.desktop.peripherals.touchpad",
            "two-finger-scrolling-enabled",
            true,
        ),
        // Window manager
        Declaration::set(
            "org.gnome.desktop.wm.preferences",
            "button-layout",
            "appmenu:minimize,maximize,close",
        ),
        Declaration::set("org.gnome.desktop.wm.preferences", "focus-mode", "click"),
        Declaration::set("org.gnome.mutter", "center-new-windows", true),
        Declaration::set("org.gnome.mutter", "dynamic-workspaces", true),
        Declaration::set("org.gnome.mutter", "edge-tiling", true),
        // Files
        Declaration::set(
            "org.gnome.nautilus.preferences",
            "default-folder-viewer",
            "list-view",
        ),
        Declaration::set("org.gnome.nautilus.preferences", "show-hidden-files", true),
        Declaration::set(
            "org.gtk.gtk4.settings.file-chooser",
            "sort-directories-first",
            true,
        ),
        // Power and session
        Declaration::set("org.gnome.desktop.session", "idle-delay", 600),
        Declaration::set(
            "org.gnome.settings-daemon.plugins.power",
            "sleep-inactive-ac-type",
            "nothing",
        ),
        Declaration::set(
            "org.gnome.settings-daemon.plugins.color",
            "night-light-enabled",
            true,
        ),
        // Shell and dash
        Declaration::set("org.gnome.shell", "favorite-apps", &DOCK_FAVORITES[..]),
        Declaration::set(
            "org.gnome.shell.extensions.dash-to-dock",
            "dock-position",
            "BOTTOM",
        ),
        Declaration::set(
            "org.gnome.shell.extensions.dash-to-dock",
            "dash-max-icon-size",
            40,
        ),
        Declaration::set(
            "org.gnome.shell.extensions.dash-to-dock",
            "click-action",
            "minimize",
        ),
        Declaration::set("org.gnome.shell.extensions.dash-to-dock", "show-trash", false),
        // Text editor
        Declaration::set("org.gnome.TextEditor", "show-line-numbers", true),
        Declaration::set("org.gnome.TextEditor", "highlight-current-line", true),
        Declaration::set("org.gnome.TextEditor", "indent-style", "space"),
        Declaration::set("org.gnome.TextEditor", "tab-width", 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn profile_is_not_empty() {
        assert!(!declarations().is_empty());
    }

    #[test]
    fn keys_are_unique_within_the_profile() {
        let declarations = declarations();
        let mut seen = HashSet::new();
        for declaration in &declarations {
            assert!(
                seen.insert(&declaration.key),
                "duplicate declaration for {}",
                declaration.key
            );
        }
    }

    #[test]
    fn dock_favorites_match_the_favorite_apps_declaration() {
        let declarations = declarations();
        let favorites = declarations
            .iter()
            .find(|d| d.key.key == "favorite-apps")
            .expect("profile pins the dash");
        assert_eq!(favorites.value, (&DOCK_FAVORITES[..]).into());
    }
}

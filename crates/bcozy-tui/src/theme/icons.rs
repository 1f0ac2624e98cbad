//! Icon set for the TUI.
//!
//! `IconSet` resolves glyphs at runtime from the configured `IconMode`.
//! - `IconMode::Unicode`: characters that render in every terminal
//! - `IconMode::NerdFonts`: Nerd Font glyphs (requires a Nerd Font)

use bcozy_app::config::IconMode;
use bcozy_app::notice::Severity;
use bcozy_app::pane::UnitIcon;
use bcozy_app::state::UiMode;

#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    fn pick(&self, nerd: &'static str, unicode: &'static str) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => nerd,
            IconMode::Unicode => unicode,
        }
    }

    /// Glyph for a pane's header icon
    pub fn unit(&self, icon: UnitIcon) -> &'static str {
        match icon {
            UnitIcon::Power => self.pick("\u{f0e7}", "\u{21af}"), // nf-fa-bolt / ↯
            UnitIcon::PowerOff => self.pick("\u{f1e6}", "\u{25cb}"), // nf-fa-plug / ○
            UnitIcon::SwitchOn => self.pick("\u{f205}", "\u{25c9}"), // nf-fa-toggle_on / ◉
            UnitIcon::SwitchOff => self.pick("\u{f204}", "\u{25ce}"), // nf-fa-toggle_off / ◎
            UnitIcon::Motion => self.pick("\u{f06e}", "\u{25c6}"), // nf-fa-eye / ◆
            UnitIcon::NoMotion => self.pick("\u{f070}", "\u{25c7}"), // nf-fa-eye_slash / ◇
            UnitIcon::Heating => self.pick("\u{f06d}", "\u{25b2}"), // nf-fa-fire / ▲
            UnitIcon::Thermometer => self.pick("\u{f2c9}", "\u{2248}"), // nf-fa-thermometer / ≈
        }
    }

    /// Glyph of a main menu entry
    pub fn screen(&self, mode: UiMode) -> &'static str {
        match mode {
            UiMode::Units => self.pick("\u{f015}", "\u{2302}"), // nf-fa-home / ⌂
            UiMode::Groups => self.pick("\u{f0c0}", "\u{2261}"), // nf-fa-users / ≡
            UiMode::Settings => self.pick("\u{f013}", "*"),      // nf-fa-cog
            UiMode::Login => self.pick("\u{f007}", "@"),         // nf-fa-user
        }
    }

    pub fn notice(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Success => self.pick("\u{f00c}", "\u{2713}"), // nf-fa-check / ✓
            Severity::Error => self.pick("\u{f071}", "\u{26a0}"),   // nf-fa-warning / ⚠
        }
    }

    pub fn dot(&self) -> &'static str {
        self.pick("\u{f444}", "\u{25cf}") // nf-oct-dot_fill / ●
    }

    pub fn busy(&self) -> &'static str {
        self.pick("\u{f110}", "\u{2026}") // nf-fa-spinner / …
    }

    pub fn selected(&self) -> &'static str {
        self.pick("\u{f054}", "\u{25b8}") // nf-fa-chevron_right / ▸
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_mode_avoids_private_use_area() {
        let icons = IconSet::new(IconMode::Unicode);
        let glyphs = [
            icons.unit(UnitIcon::Power),
            icons.unit(UnitIcon::Thermometer),
            icons.screen(UiMode::Groups),
            icons.notice(Severity::Error),
            icons.dot(),
        ];
        for glyph in glyphs {
            assert!(
                glyph.chars().all(|c| !('\u{e000}'..='\u{f8ff}').contains(&c)),
                "{glyph:?} needs a Nerd Font"
            );
        }
    }

    #[test]
    fn test_nerd_fonts_mode_differs() {
        let unicode = IconSet::new(IconMode::Unicode);
        let nerd = IconSet::new(IconMode::NerdFonts);
        assert_ne!(unicode.unit(UnitIcon::Power), nerd.unit(UnitIcon::Power));
    }

    #[test]
    fn test_active_and_idle_icons_differ() {
        let icons = IconSet::new(IconMode::Unicode);
        assert_ne!(icons.unit(UnitIcon::Power), icons.unit(UnitIcon::PowerOff));
        assert_ne!(icons.unit(UnitIcon::SwitchOn), icons.unit(UnitIcon::SwitchOff));
    }
}
